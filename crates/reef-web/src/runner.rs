use std::cell::RefCell;
use std::rc::Rc;
use log::{info, warn};
use reef_engine::{AnimationController, Creature, OrbitConfig, Reef, ReefError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;
use crate::dom::DomHost;
use crate::frames::RafFrames;

/// Owns the reef roster, the swim controller and the page host.
///
/// Lives behind `Rc<RefCell<_>>` because the frame closure calls back into it;
/// the closure holds only a weak reference, so dropping the runner ends the loop.
pub struct ReefRunner {
    controller: AnimationController,
    host: DomHost,
    reef: Reef,
}

impl ReefRunner {
    /// Bind to the element with id `area_id` and install the frame callback.
    pub fn attach(area_id: &str, config: OrbitConfig) -> Result<Rc<RefCell<Self>>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let area = document
            .get_element_by_id(area_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{area_id}")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str(&format!("#{area_id} is not an HTML element")))?;

        config.validate().map_err(js_error)?;
        let runner = Rc::new(RefCell::new(Self {
            controller: AnimationController::new(config, entropy_seed()),
            host: DomHost::new(area, RafFrames::new(window)),
            reef: Reef::default(),
        }));

        let weak = Rc::downgrade(&runner);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            if let Some(runner) = weak.upgrade() {
                runner.borrow_mut().on_animation_frame(timestamp);
            }
        });
        runner.borrow_mut().host.frames.set_callback(callback);
        info!("reef runner attached to #{}", area_id);
        Ok(runner)
    }

    fn on_animation_frame(&mut self, timestamp: f64) {
        let Some(ticket) = self.host.frames.take_fired() else {
            return;
        };
        self.controller.tick(ticket, timestamp, &mut self.host);
    }

    // ---- Swim mode ----

    pub fn toggle_swim(&mut self) -> bool {
        self.controller.toggle(&mut self.host)
    }

    pub fn is_swimming(&self) -> bool {
        self.controller.is_enabled()
    }

    pub fn viewport_changed(&mut self) {
        self.controller.on_viewport_changed();
    }

    pub fn configure(&mut self, json: &str) -> Result<(), ReefError> {
        let config = OrbitConfig::from_json(json)?;
        self.controller.set_config(config);
        Ok(())
    }

    // ---- Position buffer accessors for shared-memory reads ----

    pub fn positions_ptr(&self) -> *const f32 {
        self.host.positions().instances_ptr()
    }

    pub fn position_count(&self) -> u32 {
        self.host.positions().instance_count()
    }

    /// Creature id occupying `slot` of the position buffer.
    pub fn position_id(&self, slot: usize) -> Option<String> {
        self.host.positions().ids().get(slot).map(|id| id.as_str().to_owned())
    }

    // ---- Roster ----

    /// Add a creature. A running swim restarts so the newcomer gets an orbit
    /// alongside freshly drawn ones for everybody else.
    pub fn add_creature(&mut self, emoji: &str, name: &str, timestamp: &str, id: f64) -> usize {
        self.reef.add(Creature::new(emoji, name, timestamp, id));
        self.controller.restart(&mut self.host);
        self.reef.len()
    }

    pub fn creature_count(&self) -> usize {
        self.reef.len()
    }

    pub fn load_saved(&mut self, json: &str) -> Result<usize, ReefError> {
        self.reef.load_saved(json).map_err(|err| {
            warn!("saved reef unreadable, starting empty: {}", err);
            err
        })
    }

    pub fn merge_remote(&mut self, json: &str) -> Result<usize, ReefError> {
        self.reef.merge_remote(json)
    }

    pub fn saved_json(&self) -> Result<String, ReefError> {
        self.reef.saved_json()
    }

    pub fn snapshot_json(&self, now: &str) -> Result<String, ReefError> {
        self.reef.snapshot_json(now)
    }
}

/// Surface an engine error to JavaScript as a string.
pub fn js_error(err: ReefError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Seed for orbit randomness. Runs need not be reproducible.
fn entropy_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    now ^ (noise << 32)
}
