use glam::Vec2;
use log::warn;
use reef_engine::{
    EntityId, EntitySource, FrameHost, FrameTicket, PositionBuffer, RenderSink, Viewport,
    ViewportSource,
};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use crate::frames::RafFrames;

/// Class of every creature element inside the reef area.
pub const CREATURE_SELECTOR: &str = ".reef-creature";
/// Class added while a creature is positioned by the swim animation.
pub const SWIMMING_CLASS: &str = "fish-circling";

const OVERRIDDEN_PROPERTIES: [&str; 4] = ["left", "top", "transform", "animation-delay"];

/// Host backed by the page: creatures are DOM elements keyed by `data-id`,
/// the viewport is the reef area's client box.
///
/// Every position written to the page is mirrored into a `PositionBuffer`,
/// so canvas or WebGL layers can read the same frame from wasm memory.
pub struct DomHost {
    area: HtmlElement,
    pub(crate) frames: RafFrames,
    positions: PositionBuffer,
}

impl DomHost {
    pub fn new(area: HtmlElement, frames: RafFrames) -> Self {
        Self {
            area,
            frames,
            positions: PositionBuffer::new(),
        }
    }

    pub fn positions(&self) -> &PositionBuffer {
        &self.positions
    }

    fn creature_elements(&self) -> Vec<HtmlElement> {
        let list = match self.area.query_selector_all(CREATURE_SELECTOR) {
            Ok(list) => list,
            Err(err) => {
                warn!("creature query failed: {:?}", err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn creature_element(&self, id: &EntityId) -> Option<HtmlElement> {
        let selector = format!("{CREATURE_SELECTOR}[data-id=\"{}\"]", css_escape(id.as_str()));
        match self.area.query_selector(&selector) {
            Ok(found) => found.and_then(|el| el.dyn_into::<HtmlElement>().ok()),
            Err(err) => {
                warn!("creature lookup for {} failed: {:?}", id, err);
                None
            }
        }
    }
}

/// Escape a value for use inside a double-quoted CSS attribute selector.
fn css_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

impl EntitySource for DomHost {
    fn active_entity_ids(&self) -> Vec<EntityId> {
        // Elements without an id cannot keep an orbit across frames, so they stay put.
        self.creature_elements()
            .iter()
            .filter_map(|el| el.get_attribute("data-id"))
            .map(EntityId)
            .collect()
    }
}

impl ViewportSource for DomHost {
    fn viewport_size(&self) -> Viewport {
        Viewport::new(self.area.client_width() as f32, self.area.client_height() as f32)
    }
}

impl RenderSink for DomHost {
    fn apply_position(&mut self, id: &EntityId, pos: Vec2) {
        self.positions.apply_position(id, pos);
        let Some(el) = self.creature_element(id) else {
            return;
        };
        if let Err(err) = el.class_list().add_1(SWIMMING_CLASS) {
            warn!("could not mark {} as swimming: {:?}", id, err);
        }
        let style = el.style();
        let updates = [
            ("left", format!("{}px", pos.x)),
            ("top", format!("{}px", pos.y)),
            ("transform", "translate(-50%, -50%)".to_owned()),
        ];
        for (property, value) in &updates {
            if let Err(err) = style.set_property(property, value) {
                warn!("could not set {} on {}: {:?}", property, id, err);
            }
        }
    }

    fn clear_position_override(&mut self, id: &EntityId) {
        self.positions.clear_position_override(id);
        let Some(el) = self.creature_element(id) else {
            return;
        };
        if let Err(err) = el.class_list().remove_1(SWIMMING_CLASS) {
            warn!("could not unmark {}: {:?}", id, err);
        }
        let style = el.style();
        for property in OVERRIDDEN_PROPERTIES {
            if let Err(err) = style.remove_property(property) {
                warn!("could not clear {} on {}: {:?}", property, id, err);
            }
        }
    }
}

impl FrameHost for DomHost {
    fn request_frame(&mut self, ticket: FrameTicket) -> bool {
        self.frames.request_frame(ticket)
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        self.frames.cancel_frame(ticket);
    }
}
