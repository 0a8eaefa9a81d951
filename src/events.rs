//! Publish/subscribe boundary for game signals
//!
//! Engines only queue [`GameEvent`]s; the host drains them and publishes
//! here. Subscribers (telemetry overlays, score tickers) register closures
//! instead of listening on a global window bus.

use crate::sim::GameEvent;

type Subscriber = Box<dyn FnMut(&GameEvent)>;

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u32);

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn publish(&mut self, event: &GameEvent) {
        log::debug!("Publishing {:?} to {} subscribers", event, self.subscribers.len());
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for _ in 0..2 {
            let seen = seen.clone();
            bus.subscribe(move |e| seen.borrow_mut().push(*e));
        }

        let event = GameEvent::Over {
            game: GameKind::MirrorSnake,
            score: 4,
        };
        bus.publish(&event);
        assert_eq!(*seen.borrow(), vec![event, event]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let id = {
            let count = count.clone();
            bus.subscribe(move |_| *count.borrow_mut() += 1)
        };
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&GameEvent::Started {
            game: GameKind::TunnelRun,
        });
        assert_eq!(*count.borrow(), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
