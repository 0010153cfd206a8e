use log::warn;
use reef_engine::{FrameHost, FrameTicket};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// `requestAnimationFrame` driven frame host.
///
/// One persistent JS closure is reused for every request; the ticket of the
/// single outstanding request is kept next to its browser handle.
pub struct RafFrames {
    window: Window,
    callback: Option<Closure<dyn FnMut(f64)>>,
    pending: Option<(FrameTicket, i32)>,
}

impl RafFrames {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
            pending: None,
        }
    }

    /// Install the closure the browser calls on every frame.
    pub fn set_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
    }

    /// Ticket of the request that just fired. Called once from the frame callback.
    pub fn take_fired(&mut self) -> Option<FrameTicket> {
        self.pending.take().map(|(ticket, _)| ticket)
    }
}

impl FrameHost for RafFrames {
    fn request_frame(&mut self, ticket: FrameTicket) -> bool {
        let Some(callback) = &self.callback else {
            warn!("frame requested before the callback was installed");
            return false;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => {
                self.pending = Some((ticket, handle));
                true
            }
            Err(err) => {
                warn!("requestAnimationFrame failed: {:?}", err);
                false
            }
        }
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        match self.pending {
            Some((pending, handle)) if pending == ticket => {
                if let Err(err) = self.window.cancel_animation_frame(handle) {
                    warn!("cancelAnimationFrame failed: {:?}", err);
                }
                self.pending = None;
            }
            _ => {}
        }
    }
}
