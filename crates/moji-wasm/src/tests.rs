//! Browser tests for the WASM bindings

use crate::{JsClock, LocalStorageStore, MojiGame};
use moji_core::{Clock, KeyValueStore};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_clock_reads_local_date() {
    let clock = JsClock;
    let now = clock.now();
    assert!(now.date() >= chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert!(clock.timestamp_millis() > 0);
}

#[wasm_bindgen_test]
fn test_local_storage_round_trip() {
    let mut store = LocalStorageStore::new();
    assert!(store.is_available());

    store.set("moji-test", "{\"gamesPlayed\":3}").unwrap();
    assert_eq!(
        store.get("moji-test").unwrap().as_deref(),
        Some("{\"gamesPlayed\":3}")
    );
    assert_eq!(store.backend_name(), "localStorage");
}

#[wasm_bindgen_test]
fn test_practice_game_is_not_recorded() {
    let mut game = MojiGame::new(true);
    let before = game.stats_json();

    let payload = game.play().unwrap();
    assert!(payload.is_object());
    assert!(game.share_text().is_some());
    assert!(!game.has_played_today());
    assert_eq!(game.stats_json(), before);
}

#[wasm_bindgen_test]
fn test_countdown_format() {
    let game = MojiGame::new(false);
    let countdown = game.countdown();
    assert_eq!(countdown.len(), 8);
    assert_eq!(countdown.matches(':').count(), 2);
}
