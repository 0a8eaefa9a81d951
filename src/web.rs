//! Browser bindings
//!
//! The host page owns the animation frame and the overlay; it forwards key
//! events and frame timestamps here and reads back JSON snapshots.

use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::host::{ActiveGame, Arcade, KeyResponse};
use crate::input::Key;
use crate::render::{SnakeFrame, TunnelFrame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameKind};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already set: {e}").into());
    }
    log::info!("Schematic arcade loaded");
}

fn parse_kind(name: &str) -> Result<GameKind, JsValue> {
    match name {
        "PYTHON_SNAKE" => Ok(GameKind::MirrorSnake),
        "SPACE_RUN" => Ok(GameKind::TunnelRun),
        other => Err(JsValue::from_str(&format!("unknown game: {other}"))),
    }
}

fn to_js(json: serde_json::Result<String>) -> Result<String, JsValue> {
    json.map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub struct WebArcade {
    arcade: Arcade,
    last_time: f64,
}

#[wasm_bindgen]
impl WebArcade {
    /// `settings` is optional JSON; bad input falls back to defaults
    #[wasm_bindgen(constructor)]
    pub fn new(settings: Option<String>) -> WebArcade {
        let settings = settings
            .as_deref()
            .map(Settings::from_json_or_default)
            .unwrap_or_default();
        WebArcade {
            arcade: Arcade::new(settings),
            last_time: 0.0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.arcade.set_viewport(width, height);
    }

    pub fn launch(&mut self, game: &str) -> Result<(), JsValue> {
        let kind = parse_kind(game)?;
        self.last_time = 0.0;
        self.arcade.launch(kind, js_sys::Date::now() as u64);
        Ok(())
    }

    pub fn exit(&mut self) {
        self.arcade.exit();
    }

    pub fn restart(&mut self) {
        self.arcade.restart();
    }

    #[wasm_bindgen(js_name = toggleInvert)]
    pub fn toggle_invert(&mut self) -> bool {
        self.arcade.toggle_invert();
        self.arcade.settings.invert_controls
    }

    /// Returns true if the key closed the active game
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, event: &KeyboardEvent) -> bool {
        let key = Key::from_dom(&event.key());
        if self.arcade.active().is_some() && key != Key::Other {
            event.prevent_default();
        }
        self.arcade.key_down(key) == KeyResponse::Exited
    }

    /// Advance by one animation frame (`time` from requestAnimationFrame)
    pub fn frame(&mut self, time: f64) {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            0.0
        };
        self.last_time = time;
        self.arcade.advance(dt);
    }

    /// Register a JS callback receiving each event as JSON
    pub fn subscribe(&mut self, callback: js_sys::Function) {
        self.arcade.bus_mut().subscribe(move |event: &GameEvent| {
            match serde_json::to_string(event) {
                Ok(json) => {
                    if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                        log::warn!("Event subscriber threw: {:?}", e);
                    }
                }
                Err(e) => log::error!("Failed to encode event: {}", e),
            }
        });
    }

    pub fn score(&self) -> u64 {
        self.arcade.active().map(ActiveGame::score).unwrap_or(0)
    }

    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.arcade.active().is_some_and(ActiveGame::is_over)
    }

    /// JSON render snapshot of the active game (`null` when idle)
    pub fn snapshot(&self) -> Result<String, JsValue> {
        match self.arcade.active() {
            Some(ActiveGame::Snake(game)) => to_js(serde_json::to_string(&SnakeFrame::sample(game))),
            Some(ActiveGame::Tunnel(run)) => to_js(serde_json::to_string(&TunnelFrame::sample(run))),
            None => Ok("null".to_string()),
        }
    }
}
