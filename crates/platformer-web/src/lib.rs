//! WASM exports for the editor's preview mode.
//!
//! The runner lives in `thread_local!` storage and every export is a free
//! function over it. Calls made before `preview_init` are ignored with a
//! warning.

pub mod clock;
pub mod runner;

use std::cell::RefCell;

use platformer_engine::{EngineConfig, InputEvent, PlatformerEngine};
use wasm_bindgen::prelude::*;

pub use clock::WebClock;
pub use runner::PreviewRunner;

thread_local! {
    static RUNNER: RefCell<Option<PreviewRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut PreviewRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("preview not initialized, call preview_init() first");
                None
            }
        }
    })
}

fn report<T>(what: &str, result: platformer_engine::Result<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            log::warn!("{}: {}", what, err);
            false
        }
    }
}

/// Create the runner. `config_json` is an optional `EngineConfig` document;
/// an unparsable one falls back to the defaults.
#[wasm_bindgen]
pub fn preview_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref().map(EngineConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("invalid preview config, using defaults: {}", err);
            EngineConfig::default()
        }
        None => EngineConfig::default(),
    };

    let engine = PlatformerEngine::with_config(config).with_clock(WebClock);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(PreviewRunner::new(engine));
    });
    log::info!("platformer preview: initialized");
}

// ---- Object lifecycle ----

#[wasm_bindgen]
pub fn preview_load_project(json: &str) -> bool {
    with_runner(|r| report("load project", r.load_project(json))).unwrap_or(false)
}

#[wasm_bindgen]
pub fn preview_add_object(json: &str) -> bool {
    with_runner(|r| report("add object", r.add_object(json))).unwrap_or(false)
}

#[wasm_bindgen]
pub fn preview_update_object(json: &str) -> bool {
    with_runner(|r| report("update object", r.update_object(json))).unwrap_or(false)
}

#[wasm_bindgen]
pub fn preview_remove_object(id: &str) -> bool {
    with_runner(|r| r.remove_object(id)).unwrap_or(false)
}

// ---- Input ----

#[wasm_bindgen]
pub fn preview_key_down(key: &str) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key: key.to_string() }));
}

#[wasm_bindgen]
pub fn preview_key_up(key: &str) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key: key.to_string() }));
}

#[wasm_bindgen]
pub fn preview_blur() {
    with_runner(|r| r.push_input(InputEvent::Blur));
}

// ---- Frame loop ----

/// `timestamp` is the `requestAnimationFrame` time in milliseconds.
#[wasm_bindgen]
pub fn preview_tick(timestamp: f64) {
    with_runner(|r| r.tick(timestamp));
}

#[wasm_bindgen]
pub fn preview_reset() {
    with_runner(|r| r.reset());
}

// ---- Per-object commands ----

#[wasm_bindgen]
pub fn preview_move_left(id: &str) {
    with_runner(|r| r.engine_mut().move_left(id));
}

#[wasm_bindgen]
pub fn preview_move_right(id: &str) {
    with_runner(|r| r.engine_mut().move_right(id));
}

#[wasm_bindgen]
pub fn preview_jump(id: &str) {
    with_runner(|r| r.engine_mut().jump(id));
}

// ---- Queries ----

/// `{"x":..,"y":..}` as a JSON string, or `null`.
#[wasm_bindgen]
pub fn preview_object_velocity(id: &str) -> JsValue {
    match with_runner(|r| r.velocity_json(id)).flatten() {
        Some(json) => JsValue::from_str(&json),
        None => JsValue::NULL,
    }
}

#[wasm_bindgen]
pub fn preview_is_on_ground(id: &str) -> bool {
    with_runner(|r| r.engine().is_object_on_ground(id)).unwrap_or(false)
}

// ---- Snapshot accessors ----

#[wasm_bindgen]
pub fn preview_snapshot_ptr() -> *const f32 {
    with_runner(|r| r.snapshot_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn preview_snapshot_count() -> u32 {
    with_runner(|r| r.snapshot_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn preview_snapshot_floats_per_instance() -> u32 {
    platformer_engine::ObjectInstance::FLOATS as u32
}

/// Id of the object at `index` in the last snapshot.
#[wasm_bindgen]
pub fn preview_snapshot_id(index: u32) -> Option<String> {
    with_runner(|r| r.snapshot_id(index as usize).map(str::to_string)).flatten()
}
