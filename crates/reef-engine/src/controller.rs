use log::{debug, info};
use crate::api::config::OrbitConfig;
use crate::api::host::ReefHost;
use crate::core::rng::{Rng, UniformSource};
use crate::core::scheduler::{FrameScheduler, FrameTicket};
use crate::orbit::{compute_position, OrbitGenerator, OrbitStore};

/// Whether the swim animation is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Running,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Animation is off or the ticket was stale. Nothing rendered, nothing re-armed.
    Ignored,
    /// The viewport is not laid out yet. Nothing generated, next frame requested.
    Deferred,
    /// Positions were emitted for this many entities.
    Rendered { entities: usize },
}

/// Orchestrates the swim mode: session lifecycle, lazy orbit generation and
/// per-tick position updates.
///
/// The controller owns no platform state. Every operation that touches the
/// outside world takes the host explicitly.
pub struct AnimationController<S: UniformSource = Rng> {
    state: AnimationState,
    scheduler: FrameScheduler,
    store: OrbitStore,
    generator: OrbitGenerator,
    rng: S,
}

impl AnimationController<Rng> {
    pub fn new(config: OrbitConfig, seed: u64) -> Self {
        Self::with_source(config, Rng::new(seed))
    }
}

impl<S: UniformSource> AnimationController<S> {
    /// Build a controller drawing orbit parameters from `rng`.
    pub fn with_source(config: OrbitConfig, rng: S) -> Self {
        Self {
            state: AnimationState::Idle,
            scheduler: FrameScheduler::new(),
            store: OrbitStore::new(),
            generator: OrbitGenerator::new(config),
            rng,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == AnimationState::Running
    }

    pub fn store(&self) -> &OrbitStore {
        &self.store
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &OrbitConfig {
        self.generator.config()
    }

    /// Swap the tuning. Existing orbits were drawn with the old one, so they are dropped.
    pub fn set_config(&mut self, config: OrbitConfig) {
        self.generator = OrbitGenerator::new(config);
        self.store.clear();
    }

    /// Turn the swim on. No-op if already running, unless the host refused a
    /// frame request and the loop died; then a fresh session is started.
    pub fn enable(&mut self, host: &mut impl ReefHost) {
        if self.is_enabled() {
            if !self.scheduler.is_running() {
                self.begin_session(host);
                info!("swim loop resumed");
            }
            return;
        }
        self.state = AnimationState::Running;
        self.begin_session(host);
        info!("swim mode on");
    }

    /// Turn the swim off and hand every creature back to its static layout.
    /// No-op if already idle.
    pub fn disable(&mut self, host: &mut impl ReefHost) {
        if !self.is_enabled() {
            return;
        }
        self.state = AnimationState::Idle;
        self.scheduler.stop(host);
        self.store.clear();
        for id in host.active_entity_ids() {
            host.clear_position_override(&id);
        }
        info!("swim mode off");
    }

    /// Flip the mode. Returns the new `is_enabled()`.
    pub fn toggle(&mut self, host: &mut impl ReefHost) -> bool {
        if self.is_enabled() {
            self.disable(host);
        } else {
            self.enable(host);
        }
        self.is_enabled()
    }

    /// Start a fresh session while running (new orbits, time back to zero).
    /// Used when the roster changes under a running swim.
    pub fn restart(&mut self, host: &mut impl ReefHost) {
        if !self.is_enabled() {
            return;
        }
        self.begin_session(host);
        debug!("swim session restarted");
    }

    /// The swim area changed size: every orbit is regenerated on the next tick.
    /// The loop and the session clock keep going.
    pub fn on_viewport_changed(&mut self) {
        if !self.is_enabled() {
            return;
        }
        debug!("viewport changed, dropping {} orbits", self.store.len());
        self.store.clear();
    }

    /// Handle a fired frame request.
    pub fn tick(
        &mut self,
        ticket: FrameTicket,
        timestamp_ms: f64,
        host: &mut impl ReefHost,
    ) -> TickOutcome {
        if !self.is_enabled() {
            return TickOutcome::Ignored;
        }
        let Some(elapsed) = self.scheduler.begin_frame(ticket, timestamp_ms) else {
            debug!("ignoring stale frame {:?}", ticket);
            return TickOutcome::Ignored;
        };

        let viewport = host.viewport_size();
        if viewport.is_degenerate() {
            debug!("viewport {}x{} not laid out, deferring", viewport.width, viewport.height);
            self.scheduler.rearm(host);
            return TickOutcome::Deferred;
        }

        let ids = host.active_entity_ids();
        if self.store.len() > ids.len() {
            self.store.retain_ids(&ids);
        }

        let config = self.generator.config();
        for id in &ids {
            let orbit = self
                .store
                .get_or_insert_with(id, || self.generator.generate(viewport, &mut self.rng));
            let pos = compute_position(&orbit, elapsed, viewport, config);
            host.apply_position(id, pos);
        }

        self.scheduler.rearm(host);
        TickOutcome::Rendered { entities: ids.len() }
    }

    fn begin_session(&mut self, host: &mut impl ReefHost) {
        self.store.clear();
        self.scheduler.start(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use crate::api::host::{EntitySource, FrameHost, RenderSink, ViewportSource};
    use crate::api::types::{EntityId, Viewport};
    use crate::core::rng::FixedSequence;
    use crate::orbit::OrbitDescriptor;
    use crate::renderer::buffer::PositionBuffer;

    /// Records everything the controller asks of its environment.
    struct TestHost {
        ids: Vec<EntityId>,
        viewport: Viewport,
        positions: PositionBuffer,
        requested: Vec<FrameTicket>,
        cancelled: Vec<FrameTicket>,
        cleared: Vec<EntityId>,
        refuse_frames: bool,
    }

    impl TestHost {
        fn new(ids: &[&str], width: f32, height: f32) -> Self {
            Self {
                ids: ids.iter().map(|&id| EntityId::from(id)).collect(),
                viewport: Viewport::new(width, height),
                positions: PositionBuffer::new(),
                requested: Vec::new(),
                cancelled: Vec::new(),
                cleared: Vec::new(),
                refuse_frames: false,
            }
        }

        fn last_ticket(&self) -> FrameTicket {
            *self.requested.last().unwrap()
        }
    }

    impl EntitySource for TestHost {
        fn active_entity_ids(&self) -> Vec<EntityId> {
            self.ids.clone()
        }
    }

    impl ViewportSource for TestHost {
        fn viewport_size(&self) -> Viewport {
            self.viewport
        }
    }

    impl RenderSink for TestHost {
        fn apply_position(&mut self, id: &EntityId, pos: Vec2) {
            self.positions.apply_position(id, pos);
        }

        fn clear_position_override(&mut self, id: &EntityId) {
            self.cleared.push(id.clone());
            self.positions.clear_position_override(id);
        }
    }

    impl FrameHost for TestHost {
        fn request_frame(&mut self, ticket: FrameTicket) -> bool {
            self.requested.push(ticket);
            !self.refuse_frames
        }

        fn cancel_frame(&mut self, ticket: FrameTicket) {
            self.cancelled.push(ticket);
        }
    }

    fn fire<S: UniformSource>(
        ctl: &mut AnimationController<S>,
        host: &mut TestHost,
        ts: f64,
    ) -> TickOutcome {
        let ticket = host.last_ticket();
        ctl.tick(ticket, ts, host)
    }

    /// Centers at the middle of the padded area, every other sample at its band minimum.
    fn centered() -> FixedSequence {
        FixedSequence::new(vec![0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    fn snapshot(store: &OrbitStore) -> Vec<(EntityId, OrbitDescriptor)> {
        let mut orbits: Vec<_> = store.iter().map(|(id, o)| (id.clone(), *o)).collect();
        orbits.sort_by(|a, b| a.0.cmp(&b.0));
        orbits
    }

    #[test]
    fn enable_requests_first_frame() {
        let mut host = TestHost::new(&["a"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 1);
        assert_eq!(ctl.state(), AnimationState::Idle);
        ctl.enable(&mut host);
        assert!(ctl.is_enabled());
        assert_eq!(host.requested.len(), 1);
        // Enabling again does not start a second loop
        ctl.enable(&mut host);
        assert_eq!(host.requested.len(), 1);
    }

    #[test]
    fn first_tick_uses_time_zero() {
        let mut host = TestHost::new(&["A"], 400.0, 300.0);
        let mut ctl = AnimationController::with_source(OrbitConfig::default(), centered());
        ctl.enable(&mut host);

        let outcome = fire(&mut ctl, &mut host, 8_000.0);
        assert_eq!(outcome, TickOutcome::Rendered { entities: 1 });

        // center (200, 150), radius 15, drift 8 along +x at t = 0
        assert_eq!(host.positions.position(&EntityId::from("A")), Some(Vec2::new(223.0, 150.0)));
        assert_eq!(host.requested.len(), 2, "loop must re-arm");
    }

    #[test]
    fn descriptors_generated_once_per_entity() {
        let mut host = TestHost::new(&["a", "b"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 3);
        ctl.enable(&mut host);
        fire(&mut ctl, &mut host, 0.0);
        let first = snapshot(ctl.store());
        for frame in 1..10 {
            fire(&mut ctl, &mut host, frame as f64 * 16.0);
        }
        assert_eq!(snapshot(ctl.store()), first);
        assert_eq!(ctl.store().len(), 2);
    }

    #[test]
    fn zero_viewport_defers_without_generating() {
        let mut host = TestHost::new(&["a"], 0.0, 0.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 5);
        ctl.enable(&mut host);

        let outcome = fire(&mut ctl, &mut host, 16.0);
        assert_eq!(outcome, TickOutcome::Deferred);
        assert!(ctl.store().is_empty());
        assert!(host.positions.is_empty());
        assert_eq!(host.requested.len(), 2, "deferred tick must reschedule");

        host.viewport = Viewport::new(400.0, 300.0);
        assert_eq!(fire(&mut ctl, &mut host, 32.0), TickOutcome::Rendered { entities: 1 });
        assert_eq!(ctl.store().len(), 1);
    }

    #[test]
    fn disable_twice_matches_disable_once() {
        let mut host = TestHost::new(&["a", "b"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 9);
        ctl.enable(&mut host);
        fire(&mut ctl, &mut host, 0.0);

        ctl.disable(&mut host);
        let cancelled = host.cancelled.len();
        let cleared = host.cleared.len();
        ctl.disable(&mut host);

        assert_eq!(host.cancelled.len(), cancelled);
        assert_eq!(host.cleared.len(), cleared);
        assert_eq!(cleared, 2);
        assert!(!ctl.is_enabled());
        assert!(ctl.store().is_empty());
        assert!(host.positions.is_empty());
    }

    #[test]
    fn no_tick_after_disable() {
        let mut host = TestHost::new(&["a"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 11);
        ctl.enable(&mut host);
        let pending = host.last_ticket();
        ctl.disable(&mut host);

        assert_eq!(host.cancelled, vec![pending]);
        assert_eq!(ctl.tick(pending, 16.0, &mut host), TickOutcome::Ignored);
        assert!(host.positions.is_empty());
        assert_eq!(host.requested.len(), 1);
    }

    #[test]
    fn restart_after_disable_starts_from_zero() {
        let mut host = TestHost::new(&["A"], 400.0, 300.0);
        let mut ctl = AnimationController::with_source(OrbitConfig::default(), centered());
        ctl.enable(&mut host);
        fire(&mut ctl, &mut host, 1_000.0);
        fire(&mut ctl, &mut host, 3_500.0);

        ctl.disable(&mut host);
        ctl.enable(&mut host);
        assert!(ctl.store().is_empty());
        assert!(!ctl.scheduler().has_session_start());

        fire(&mut ctl, &mut host, 60_000.0);
        // Same position as the very first frame of a session
        assert_eq!(host.positions.position(&EntityId::from("A")), Some(Vec2::new(223.0, 150.0)));
    }

    #[test]
    fn viewport_change_regenerates_every_orbit() {
        let mut host = TestHost::new(&["a", "b", "c"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 21);
        ctl.enable(&mut host);
        fire(&mut ctl, &mut host, 0.0);
        let before = snapshot(ctl.store());

        host.viewport = Viewport::new(800.0, 600.0);
        ctl.on_viewport_changed();
        assert!(ctl.store().is_empty());
        assert!(ctl.scheduler().is_running());
        assert!(host.cancelled.is_empty(), "resize must not restart the loop");

        fire(&mut ctl, &mut host, 16.0);
        let after = snapshot(ctl.store());
        assert_eq!(after.len(), 3);
        for ((id, old), (_, new)) in before.iter().zip(after.iter()) {
            assert_ne!(old, new, "orbit for {id} survived the resize");
        }
    }

    #[test]
    fn viewport_change_keeps_session_clock() {
        let config = OrbitConfig::default();
        let mut host = TestHost::new(&["A"], 400.0, 300.0);
        let mut ctl = AnimationController::with_source(config.clone(), centered());
        ctl.enable(&mut host);
        fire(&mut ctl, &mut host, 1_000.0);

        host.viewport = Viewport::new(800.0, 600.0);
        ctl.on_viewport_changed();
        fire(&mut ctl, &mut host, 2_000.0);

        let viewport = Viewport::new(800.0, 600.0);
        let orbit = OrbitGenerator::new(config.clone()).generate(viewport, &mut centered());
        let expected = compute_position(&orbit, 1.0, viewport, &config);
        assert_eq!(host.positions.position(&EntityId::from("A")), Some(expected));
    }

    #[test]
    fn viewport_change_while_idle_is_ignored() {
        let mut ctl = AnimationController::new(OrbitConfig::default(), 2);
        ctl.on_viewport_changed();
        assert!(!ctl.is_enabled());
    }

    #[test]
    fn removed_entities_are_pruned() {
        let mut host = TestHost::new(&["a", "b", "c"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 4);
        ctl.enable(&mut host);
        fire(&mut ctl, &mut host, 0.0);
        assert_eq!(ctl.store().len(), 3);

        host.ids.retain(|id| id.as_str() != "b");
        fire(&mut ctl, &mut host, 16.0);
        assert_eq!(ctl.store().len(), 2);
        assert!(!ctl.store().has(&EntityId::from("b")));
    }

    #[test]
    fn new_entity_joins_without_disturbing_others() {
        let mut host = TestHost::new(&["a"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 6);
        ctl.enable(&mut host);
        fire(&mut ctl, &mut host, 0.0);
        let a = *ctl.store().get(&EntityId::from("a")).unwrap();

        host.ids.push(EntityId::from("b"));
        assert_eq!(fire(&mut ctl, &mut host, 16.0), TickOutcome::Rendered { entities: 2 });
        assert_eq!(ctl.store().get(&EntityId::from("a")), Some(&a));
        assert!(ctl.store().has(&EntityId::from("b")));
    }

    #[test]
    fn restart_while_running_resets_session() {
        let mut host = TestHost::new(&["A"], 400.0, 300.0);
        let mut ctl = AnimationController::with_source(OrbitConfig::default(), centered());
        ctl.enable(&mut host);
        fire(&mut ctl, &mut host, 1_000.0);
        let stale = host.last_ticket();

        ctl.restart(&mut host);
        assert_eq!(host.cancelled, vec![stale]);
        assert!(ctl.store().is_empty());
        assert_eq!(ctl.tick(stale, 2_000.0, &mut host), TickOutcome::Ignored);

        fire(&mut ctl, &mut host, 9_000.0);
        assert_eq!(host.positions.position(&EntityId::from("A")), Some(Vec2::new(223.0, 150.0)));
    }

    #[test]
    fn enable_resumes_after_refused_frame() {
        let mut host = TestHost::new(&["a"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 13);
        ctl.enable(&mut host);
        host.refuse_frames = true;
        fire(&mut ctl, &mut host, 0.0);
        assert!(ctl.is_enabled());
        assert!(!ctl.scheduler().is_running());

        host.refuse_frames = false;
        ctl.enable(&mut host);
        assert!(ctl.scheduler().is_running());
        assert_eq!(fire(&mut ctl, &mut host, 16.0), TickOutcome::Rendered { entities: 1 });
    }

    #[test]
    fn position_buffer_mirrors_session() {
        let mut host = TestHost::new(&["a", "b", "c"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 14);
        ctl.enable(&mut host);
        fire(&mut ctl, &mut host, 0.0);
        fire(&mut ctl, &mut host, 16.0);

        // One slot per creature, read as flat x/y pairs
        assert_eq!(host.positions.instance_count(), 3);
        assert_eq!(host.positions.as_floats().len(), 6);
        for id in host.positions.ids() {
            let pos = host.positions.position(id).unwrap();
            assert!(pos.x >= 24.0 && pos.x <= 376.0);
            assert!(pos.y >= 24.0 && pos.y <= 276.0);
        }

        ctl.disable(&mut host);
        assert_eq!(host.positions.instance_count(), 0);
    }

    #[test]
    fn toggle_flips_state() {
        let mut host = TestHost::new(&[], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 8);
        assert!(ctl.toggle(&mut host));
        assert!(!ctl.toggle(&mut host));
        assert_eq!(ctl.state(), AnimationState::Idle);
    }

    #[test]
    fn tick_while_idle_is_ignored() {
        let mut host = TestHost::new(&["a"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 10);
        assert_eq!(ctl.tick(FrameTicket(0), 0.0, &mut host), TickOutcome::Ignored);
        assert!(host.requested.is_empty());
    }

    #[test]
    fn set_config_drops_orbits() {
        let mut host = TestHost::new(&["a"], 400.0, 300.0);
        let mut ctl = AnimationController::new(OrbitConfig::default(), 12);
        ctl.enable(&mut host);
        fire(&mut ctl, &mut host, 0.0);
        ctl.set_config(OrbitConfig {
            edge_margin: 10.0,
            ..OrbitConfig::default()
        });
        assert!(ctl.store().is_empty());
        assert_eq!(ctl.config().edge_margin, 10.0);
    }
}
