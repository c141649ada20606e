//! WebAssembly Moji game
//!
//! Exposes the daily session to JavaScript. Results persist in `localStorage`
//! under the same key and format as the browser game, and every view is
//! handed over as a plain JS object for the page to render.

use moji_core::{
    MojiConfig, PlayMode, ResultView, RevealTimeline, Session, StatsEngine, StoreError,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

mod clock;
mod storage;

// WASM tests require wasm-pack test to run
#[cfg(all(test, target_arch = "wasm32"))]
mod tests;

pub use clock::JsClock;
pub use storage::LocalStorageStore;

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[moji] {}", record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayPayload<'a> {
    mode: PlayMode,
    view: ResultView,
    timeline: &'a RevealTimeline,
    share_text: String,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn store_error(e: StoreError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// The main WASM game controller
#[wasm_bindgen]
pub struct MojiGame {
    session: Session<LocalStorageStore, JsClock>,
}

#[wasm_bindgen]
impl MojiGame {
    #[wasm_bindgen(constructor)]
    pub fn new(unlimited_plays: bool) -> MojiGame {
        let config = MojiConfig::default().with_unlimited_plays(unlimited_plays);
        let engine = StatsEngine::new(LocalStorageStore::new(), JsClock, config);
        MojiGame {
            session: Session::new(engine),
        }
    }

    #[wasm_bindgen(js_name = puzzleNumber)]
    pub fn puzzle_number(&self) -> u32 {
        self.session.puzzle_number()
    }

    #[wasm_bindgen(js_name = hasPlayedToday)]
    pub fn has_played_today(&self) -> bool {
        self.session.has_played_today()
    }

    #[wasm_bindgen(js_name = storageAvailable)]
    pub fn storage_available(&self) -> bool {
        self.session.engine().store().is_available()
    }

    /// Today's recorded result with an instant timeline, or `null`
    pub fn resume(&mut self) -> Result<JsValue, JsValue> {
        match self.session.resume() {
            Some(play) => to_js(&PlayPayload {
                mode: play.mode,
                view: play.view(),
                timeline: &play.timeline(),
                share_text: play.share_text(),
            }),
            None => Ok(JsValue::NULL),
        }
    }

    /// Play today's puzzle; the result is persisted before this returns
    pub fn play(&mut self) -> Result<JsValue, JsValue> {
        let play = self.session.play_now().map_err(store_error)?;
        to_js(&PlayPayload {
            mode: play.mode,
            view: play.view(),
            timeline: &play.timeline(),
            share_text: play.share_text(),
        })
    }

    #[wasm_bindgen(js_name = shareText)]
    pub fn share_text(&self) -> Option<String> {
        self.session.share_text()
    }

    /// Statistics panel as a JS object
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.stats_view())
    }

    /// Raw statistics record as stored
    #[wasm_bindgen(js_name = statsJson)]
    pub fn stats_json(&self) -> String {
        serde_json::to_string(&self.session.engine().load()).unwrap_or_default()
    }

    /// Time until the next puzzle as HH:MM:SS
    pub fn countdown(&self) -> String {
        self.session.next_puzzle_countdown()
    }
}
