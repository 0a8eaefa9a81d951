//! Mirror snake simulation
//!
//! One player snake on a wraparound grid, plus a ghost that is always the
//! point reflection of the player through the grid center. Both snakes eat
//! from the same food set; whichever eats, the player's body grows.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::food::{is_valid_food_cell, spawn_food};
use super::grid::{GridSize, Heading, Point, mirror_point, mirror_snake};
use super::session::{GameEvent, GameKind, GamePhase, GameSession, RngState};
use crate::consts::*;

/// Why a tick ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Head entered the player's own body (neck excluded)
    SelfBody,
    /// Head entered the mirror's body
    MirrorBody,
    /// Head and mirror head landed on the same cell
    MirrorHead,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing advanced (paused, over, or no grid yet)
    Idle,
    Moved {
        grew: bool,
        /// Food taken by the player head
        ate: bool,
        /// Food taken by the mirror head
        stole: bool,
    },
    Collided(Collision),
}

/// Complete mirror snake state
#[derive(Debug, Clone)]
pub struct SnakeGame {
    pub grid: GridSize,
    /// Player body, head first
    pub snake: Vec<Point>,
    pub heading: Heading,
    /// Food cells, order irrelevant
    pub food: Vec<Point>,
    pub session: GameSession,
    pub rng_state: RngState,
    /// Chance of a bonus item after the player eats
    pub bonus_chance: f64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

/// Spawn cell, wrapped into the grid once its size is known
fn start_cell(grid: GridSize) -> Point {
    let (x, y) = SNAKE_START;
    if grid.is_valid() {
        Point::new(x.rem_euclid(grid.cols), y.rem_euclid(grid.rows))
    } else {
        Point::new(x, y)
    }
}

impl SnakeGame {
    /// Create a new run. With an invalid grid the run waits for `resize`.
    pub fn new(grid: GridSize, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let mut game = Self {
            grid,
            snake: vec![start_cell(grid)],
            heading: Heading::RIGHT,
            food: Vec::new(),
            session: GameSession::new(GamePhase::Playing),
            rng: rng_state.to_rng(),
            rng_state,
            bonus_chance: BONUS_FOOD_CHANCE,
            events: Vec::new(),
        };
        game.ensure_food();
        game.events.push(GameEvent::Started {
            game: GameKind::MirrorSnake,
        });
        game
    }

    /// Restore the initial state: fresh snake, new food, zero score
    pub fn reset(&mut self) {
        self.snake = vec![start_cell(self.grid)];
        self.heading = Heading::RIGHT;
        self.food.clear();
        self.session = GameSession::new(GamePhase::Playing);
        self.ensure_food();
        self.events.push(GameEvent::Started {
            game: GameKind::MirrorSnake,
        });
        log::info!("Snake reset on {}x{} grid", self.grid.cols, self.grid.rows);
    }

    /// Adopt new grid dimensions (e.g. after a viewport resize)
    pub fn resize(&mut self, grid: GridSize) {
        if grid == self.grid {
            return;
        }
        log::debug!(
            "Snake grid {}x{} -> {}x{}",
            self.grid.cols,
            self.grid.rows,
            grid.cols,
            grid.rows
        );
        self.grid = grid;
        if !grid.is_valid() {
            return;
        }
        for p in self.snake.iter_mut() {
            p.x = p.x.rem_euclid(grid.cols);
            p.y = p.y.rem_euclid(grid.rows);
        }

        // Food that no longer fits the new grid is replaced, not wrapped
        let before = self.food.len();
        let mut kept: Vec<Point> = Vec::with_capacity(before);
        for &p in &self.food {
            if is_valid_food_cell(p, &self.snake, &kept, grid) {
                kept.push(p);
            }
        }
        self.food = kept;
        if !self.session.is_over() {
            for _ in self.food.len()..before {
                let p = spawn_food(&self.snake, &self.food, grid, &mut self.rng);
                self.food.push(p);
            }
        }
        self.ensure_food();
    }

    /// Spawn the opening food pair once the grid is usable
    fn ensure_food(&mut self) {
        if !self.grid.is_valid() || !self.food.is_empty() || self.session.is_over() {
            return;
        }
        let opening = [start_cell(self.grid)];
        for _ in 0..INITIAL_FOOD {
            let p = spawn_food(&opening, &self.food, self.grid, &mut self.rng);
            self.food.push(p);
        }
    }

    /// Turn toward `requested`. Only perpendicular turns are accepted;
    /// `invert` flips the resulting heading.
    pub fn steer(&mut self, requested: Heading, invert: bool) {
        if self.session.is_over() {
            return;
        }
        let perpendicular = if requested.is_vertical() {
            self.heading.is_horizontal()
        } else {
            self.heading.is_vertical()
        };
        if perpendicular {
            self.heading = if invert { requested.negated() } else { requested };
        }
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    /// Exit is only honoured once the run is over
    pub fn can_exit(&self) -> bool {
        self.session.is_over()
    }

    /// Derived ghost body, head first
    pub fn mirror(&self) -> Vec<Point> {
        mirror_snake(&self.snake, self.grid)
    }

    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn collide(&mut self, collision: Collision) -> TickOutcome {
        if self.session.end() {
            log::info!(
                "Snake game over ({:?}), score {}",
                collision,
                self.session.score
            );
            self.events.push(GameEvent::Over {
                game: GameKind::MirrorSnake,
                score: self.session.score,
            });
        }
        TickOutcome::Collided(collision)
    }

    /// Advance the simulation by one fixed tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.grid.is_valid() || !self.session.is_playing() {
            return TickOutcome::Idle;
        }
        self.ensure_food();

        let Some(head) = self.head() else {
            return TickOutcome::Idle;
        };
        let grid = self.grid;
        let new_head = grid.step(head, self.heading);
        let mirror_head = mirror_point(new_head, grid);

        // Neck (index 1) is exempt so a same-tick reversal is survivable
        if self
            .snake
            .iter()
            .enumerate()
            .any(|(i, &s)| i != 1 && s == new_head)
        {
            return self.collide(Collision::SelfBody);
        }
        if self.snake.iter().any(|&s| mirror_point(s, grid) == new_head) {
            return self.collide(Collision::MirrorBody);
        }
        if mirror_head == new_head {
            return self.collide(Collision::MirrorHead);
        }

        self.snake.insert(0, new_head);

        let mut grew = false;
        let mut stole = false;
        let mut ate = false;

        if let Some(i) = self.food.iter().position(|&f| f == mirror_head) {
            self.food.swap_remove(i);
            let replacement = spawn_food(&self.snake, &self.food, grid, &mut self.rng);
            self.food.push(replacement);
            stole = true;
            grew = true;
        }

        if let Some(i) = self.food.iter().position(|&f| f == new_head) {
            self.session.score += 1;
            self.food.swap_remove(i);
            let replacement = spawn_food(&self.snake, &self.food, grid, &mut self.rng);
            self.food.push(replacement);

            if self.food.len() < BONUS_FOOD_LIMIT
                && self.rng.random_bool(self.bonus_chance)
            {
                let bonus = spawn_food(&self.snake, &self.food, grid, &mut self.rng);
                self.food.push(bonus);
            }
            ate = true;
            grew = true;
        }

        // Growth is credited to the player body even when the mirror ate
        if !grew {
            self.snake.pop();
        }

        TickOutcome::Moved { grew, ate, stole }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn game(cols: i32, rows: i32) -> SnakeGame {
        SnakeGame::new(GridSize::new(cols, rows), 12345)
    }

    /// Park food far from anything the test walks through
    fn park_food(game: &mut SnakeGame, cells: &[(i32, i32)]) {
        game.food = cells.iter().map(|&(x, y)| Point::new(x, y)).collect();
    }

    #[test]
    fn test_new_spawns_two_food() {
        let mut g = game(25, 25);
        assert_eq!(g.snake, vec![Point::new(10, 10)]);
        assert_eq!(g.heading, Heading::RIGHT);
        assert_eq!(g.food.len(), 2);
        assert_ne!(g.food[0], g.food[1]);
        assert_eq!(
            g.drain_events(),
            vec![GameEvent::Started {
                game: GameKind::MirrorSnake
            }]
        );
    }

    #[test]
    fn test_zero_grid_defers_everything() {
        let mut g = SnakeGame::new(GridSize::default(), 1);
        assert!(g.food.is_empty());
        assert_eq!(g.tick(), TickOutcome::Idle);
        assert_eq!(g.snake, vec![Point::new(10, 10)]);

        g.resize(GridSize::new(25, 25));
        assert_eq!(g.food.len(), 2);
        assert!(matches!(g.tick(), TickOutcome::Moved { .. }));
    }

    #[test]
    fn test_wraparound_walk() {
        let mut g = game(25, 25);
        g.snake = vec![Point::new(23, 10)];
        park_food(&mut g, &[(5, 20), (6, 20)]);

        g.tick();
        g.tick();
        g.steer(Heading::DOWN, false);
        g.tick();
        g.tick();

        assert_eq!(g.snake, vec![Point::new(0, 12)]);
        assert!(!g.session.is_over());
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn test_wrap_at_right_edge_is_not_collision() {
        let mut g = game(20, 20);
        g.snake = vec![Point::new(19, 4)];
        park_food(&mut g, &[(5, 15), (6, 15)]);
        assert!(matches!(g.tick(), TickOutcome::Moved { grew: false, .. }));
        assert_eq!(g.head(), Some(Point::new(0, 4)));
    }

    #[test]
    fn test_path_through_center_hits_mirror_head() {
        // On odd grids the center is its own reflection
        let mut g = game(25, 25);
        park_food(&mut g, &[(3, 20), (4, 20)]);
        g.tick();
        g.tick();
        g.steer(Heading::DOWN, false);
        g.tick();
        assert_eq!(g.tick(), TickOutcome::Collided(Collision::MirrorHead));
        assert!(g.session.is_over());
        assert_eq!(g.head(), Some(Point::new(12, 11)));
    }

    #[test]
    fn test_eating_food_scores_and_respawns() {
        let mut g = game(25, 25);
        park_food(&mut g, &[(11, 10), (3, 3)]);
        let before = g.food.len();

        let outcome = g.tick();
        assert!(matches!(
            outcome,
            TickOutcome::Moved {
                grew: true,
                ate: true,
                ..
            }
        ));
        assert_eq!(g.score(), 1);
        assert_eq!(g.snake.len(), 2);
        assert!(!g.food.contains(&Point::new(11, 10)));
        // One eaten, one respawned, maybe one bonus
        assert!(g.food.len() == before || g.food.len() == before + 1);
    }

    #[test]
    fn test_bonus_food_never_exceeds_limit() {
        let mut g = game(25, 25);
        g.bonus_chance = 1.0;
        park_food(&mut g, &[(11, 10), (3, 3), (4, 4)]);
        g.tick();
        assert_eq!(g.food.len(), 3);
    }

    #[test]
    fn test_bonus_food_spawns_below_limit() {
        let mut g = game(25, 25);
        g.bonus_chance = 1.0;
        park_food(&mut g, &[(11, 10), (3, 3)]);
        g.tick();
        assert_eq!(g.score(), 1);
        assert_eq!(g.food.len(), 3);
        assert!(g.food.iter().all(|&f| is_valid_food_cell(f, &g.snake, &[], g.grid)));
    }

    #[test]
    fn test_no_bonus_when_roll_fails() {
        let mut g = game(25, 25);
        g.bonus_chance = 0.0;
        park_food(&mut g, &[(11, 10), (3, 3)]);
        g.tick();
        assert_eq!(g.score(), 1);
        assert_eq!(g.food.len(), 2);
    }

    #[test]
    fn test_default_bonus_chance_sometimes_fires() {
        let mut fired = 0;
        for seed in 0..200 {
            let mut g = SnakeGame::new(GridSize::new(25, 25), seed);
            park_food(&mut g, &[(11, 10), (3, 3)]);
            g.tick();
            match g.food.len() {
                3 => fired += 1,
                2 => {}
                n => panic!("unexpected food count {}", n),
            }
        }
        assert!(fired > 0 && fired < 200, "bonus fired {} of 200 runs", fired);
    }

    #[test]
    fn test_both_heads_eat_same_tick() {
        let mut g = game(25, 25);
        g.bonus_chance = 1.0;
        // Player enters (11,10) while the mirror head enters (13,14)
        park_food(&mut g, &[(11, 10), (13, 14)]);

        let outcome = g.tick();
        assert_eq!(
            outcome,
            TickOutcome::Moved {
                grew: true,
                ate: true,
                stole: true
            }
        );
        assert_eq!(g.snake.len(), 2);
        assert_eq!(g.score(), 1);
        assert_eq!(g.food.len(), 3);
        assert!(!g.food.contains(&Point::new(11, 10)));
    }

    #[test]
    fn test_shrinking_grid_keeps_food_interior() {
        let mut g = game(25, 25);
        park_food(&mut g, &[(20, 5), (3, 3)]);
        g.resize(GridSize::new(20, 20));

        assert_eq!(g.food.len(), 2);
        assert!(g.food.contains(&Point::new(3, 3)));
        assert!(!g.food.contains(&Point::new(0, 5)));
        for (i, &f) in g.food.iter().enumerate() {
            assert!(g.grid.is_interior(f), "{:?} on border", f);
            assert!(is_valid_food_cell(f, &g.snake, &g.food[..i], g.grid));
        }
    }

    #[test]
    fn test_resize_replaces_food_under_mirror() {
        let mut g = game(30, 30);
        g.snake = vec![Point::new(25, 4)];
        park_food(&mut g, &[(4, 5), (2, 2)]);
        g.resize(GridSize::new(10, 10));

        // Snake wraps to (5,4), so its mirror now covers (4,5)
        assert_eq!(g.snake, vec![Point::new(5, 4)]);
        assert_eq!(g.mirror(), vec![Point::new(4, 5)]);
        assert_eq!(g.food.len(), 2);
        assert!(g.food.contains(&Point::new(2, 2)));
        assert!(!g.food.contains(&Point::new(4, 5)));
    }

    proptest! {
        #[test]
        fn ticks_grow_by_at_most_one_and_mirror_tracks(
            seed in any::<u64>(),
            turns in prop::collection::vec(0u8..5, 1..60),
        ) {
            let mut g = SnakeGame::new(GridSize::new(23, 17), seed);
            for turn in turns {
                match turn {
                    0 => g.steer(Heading::UP, false),
                    1 => g.steer(Heading::DOWN, false),
                    2 => g.steer(Heading::LEFT, false),
                    3 => g.steer(Heading::RIGHT, false),
                    _ => {}
                }
                let before = g.snake.len();
                let outcome = g.tick();
                let after = g.snake.len();
                match outcome {
                    TickOutcome::Moved { grew, .. } => {
                        prop_assert_eq!(after, before + usize::from(grew));
                    }
                    _ => prop_assert_eq!(after, before),
                }
                let mirror = g.mirror();
                prop_assert_eq!(mirror.len(), g.snake.len());
                for (m, s) in mirror.iter().zip(&g.snake) {
                    prop_assert_eq!(m.x, 22 - s.x);
                    prop_assert_eq!(m.y, 16 - s.y);
                }
                if g.session.is_over() {
                    break;
                }
            }
        }
    }
}
