use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use reef_engine::{export_file_name, OrbitConfig};
use reef_web::{js_error, ReefRunner};

thread_local! {
    static RUNNER: RefCell<Option<Rc<RefCell<ReefRunner>>>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut ReefRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let borrow = cell.borrow();
        let runner = borrow.as_ref().expect("Reef not initialized. Call reef_init() first.");
        let mut runner = runner.borrow_mut();
        f(&mut runner)
    })
}

#[wasm_bindgen]
pub fn reef_init(area_id: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = ReefRunner::attach(area_id, OrbitConfig::default())?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("coral-reef: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn reef_configure(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.configure(json)).map_err(js_error)
}

// ---- Swim mode ----

#[wasm_bindgen]
pub fn reef_toggle_swim() -> bool {
    with_runner(|r| r.toggle_swim())
}

#[wasm_bindgen]
pub fn reef_is_swimming() -> bool {
    with_runner(|r| r.is_swimming())
}

#[wasm_bindgen]
pub fn reef_viewport_changed() {
    with_runner(|r| r.viewport_changed());
}

// ---- Position buffer ----

#[wasm_bindgen]
pub fn reef_positions_ptr() -> *const f32 {
    with_runner(|r| r.positions_ptr())
}

#[wasm_bindgen]
pub fn reef_position_count() -> u32 {
    with_runner(|r| r.position_count())
}

#[wasm_bindgen]
pub fn reef_position_id(slot: u32) -> Option<String> {
    with_runner(|r| r.position_id(slot as usize))
}

// ---- Roster ----

#[wasm_bindgen]
pub fn reef_add_creature(emoji: &str, name: &str, timestamp: &str, id: f64) -> u32 {
    with_runner(|r| r.add_creature(emoji, name, timestamp, id)) as u32
}

#[wasm_bindgen]
pub fn reef_creature_count() -> u32 {
    with_runner(|r| r.creature_count()) as u32
}

#[wasm_bindgen]
pub fn reef_load_saved(json: &str) -> Result<u32, JsValue> {
    with_runner(|r| r.load_saved(json))
        .map(|count| count as u32)
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn reef_merge_remote(json: &str) -> Result<u32, JsValue> {
    with_runner(|r| r.merge_remote(json))
        .map(|added| added as u32)
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn reef_saved_json() -> Result<String, JsValue> {
    with_runner(|r| r.saved_json()).map_err(js_error)
}

#[wasm_bindgen]
pub fn reef_snapshot_json(now: &str) -> Result<String, JsValue> {
    with_runner(|r| r.snapshot_json(now)).map_err(js_error)
}

#[wasm_bindgen]
pub fn reef_export_file_name(now: &str) -> String {
    export_file_name(now)
}
