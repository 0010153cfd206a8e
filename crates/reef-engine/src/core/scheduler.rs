use log::{debug, warn};
use crate::api::host::FrameHost;

/// Identifies one frame request. A fresh ticket is issued for every request,
/// so a callback that fires after `stop` or a restart can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket(pub u64);

/// Self re-arming frame loop with an explicit single-request invariant.
///
/// The host fires the pending ticket, the scheduler turns its timestamp into
/// session-relative seconds, and the caller re-arms once the frame is done.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    running: bool,
    /// The only ticket `begin_frame` will accept.
    pending: Option<FrameTicket>,
    next_ticket: u64,
    /// Host timestamp (ms) of the first frame of the current session.
    session_start_ms: Option<f64>,
    last_elapsed: f32,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new session. A loop that is already running is stopped first.
    pub fn start(&mut self, host: &mut impl FrameHost) {
        self.stop(host);
        self.running = true;
        self.arm(host);
    }

    /// Cancel the pending request and end the session. Safe to call when idle.
    pub fn stop(&mut self, host: &mut impl FrameHost) {
        if let Some(ticket) = self.pending.take() {
            debug!("frame scheduler: cancelling {:?}", ticket);
            host.cancel_frame(ticket);
        }
        self.running = false;
        self.reset_session();
    }

    /// Forget the session zero point; the next accepted frame becomes t = 0.
    pub fn reset_session(&mut self) {
        self.session_start_ms = None;
        self.last_elapsed = 0.0;
    }

    /// Accept a fired frame. Returns the elapsed seconds of the session, or
    /// `None` if the ticket is not the pending one (stale or cancelled).
    pub fn begin_frame(&mut self, ticket: FrameTicket, timestamp_ms: f64) -> Option<f32> {
        if !self.running || self.pending != Some(ticket) {
            return None;
        }
        self.pending = None;
        let start = *self.session_start_ms.get_or_insert(timestamp_ms);
        let elapsed = ((timestamp_ms - start) / 1000.0) as f32;
        // Hosts may report a slightly earlier timestamp; never run time backwards.
        self.last_elapsed = elapsed.max(self.last_elapsed);
        Some(self.last_elapsed)
    }

    /// Schedule the next frame if the loop is running and nothing is pending.
    pub fn rearm(&mut self, host: &mut impl FrameHost) {
        if self.running && self.pending.is_none() {
            self.arm(host);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    /// Whether the current session has seen its first frame.
    pub fn has_session_start(&self) -> bool {
        self.session_start_ms.is_some()
    }

    /// A refused request ends the loop: nothing would ever fire to re-arm it.
    fn arm(&mut self, host: &mut impl FrameHost) {
        let ticket = FrameTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        if host.request_frame(ticket) {
            self.pending = Some(ticket);
        } else {
            warn!("frame request {:?} refused, frame loop stopped", ticket);
            self.pending = None;
            self.running = false;
        }
    }
}
