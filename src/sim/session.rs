//! Game session: owns one round's state and drives its lifecycle
//!
//! Running ──hit──▶ GameOver ──input/restart──▶ Running
//!
//! The host calls `tick(now)` once per display frame and either forwards
//! its spawn timer (`on_spawn_timer`) or polls (`poll_spawner`). Both paths
//! go through `&mut self`, so a spawn can never land inside a tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::Clock;
use super::spawner::{ObstacleGenerator, SpawnTicket};
use super::state::{GameEvent, GamePhase, HitCause, Playfield, SessionState};
use super::tick;
use crate::tuning::Tuning;

/// What a player input did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Impulse applied to a running round
    Flapped,
    /// Round restarted; host timers must be rescheduled with this ticket
    Restarted(SpawnTicket),
}

/// Orchestrates clock, spawner, simulation and state machine
pub struct GameSession {
    tuning: Tuning,
    playfield: Playfield,
    state: SessionState,
    clock: Clock,
    spawner: ObstacleGenerator,
    ticket: SpawnTicket,
    rng: Pcg32,
    /// Events produced since the last drain
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a running round at `now_ms` with one pair already spawned
    pub fn new(tuning: Tuning, playfield: Playfield, seed: u64, now_ms: f64) -> Self {
        let mut clock = Clock::new(tuning.dt_cap);
        clock.reset(now_ms);
        let mut spawner = ObstacleGenerator::new(tuning.spawn_interval_ms);
        let ticket = spawner.start(now_ms);

        let mut session = Self {
            state: SessionState::new(&tuning, playfield),
            tuning,
            playfield,
            clock,
            spawner,
            ticket,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        session.spawn_pair();

        log::info!(
            "Session started: seed {}, playfield {}x{}, ui scale {}",
            seed,
            playfield.width,
            playfield.height,
            session.tuning.ui_scale
        );
        session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Read-only view for rendering
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.scoreboard.score()
    }

    /// Ticket for the spawn timer of the current round
    pub fn spawn_ticket(&self) -> SpawnTicket {
        self.ticket
    }

    /// Render-frame entry point: measure dt and advance the round
    pub fn tick(&mut self, now_ms: f64) -> Option<HitCause> {
        let dt = self.clock.advance(now_ms);
        self.update(dt)
    }

    /// Advance the round by an explicit `dt` in seconds, capped at `dt_cap`
    pub fn update(&mut self, dt: f32) -> Option<HitCause> {
        let dt = dt.min(self.tuning.dt_cap);
        let hit = tick::step(
            &mut self.state,
            &self.tuning,
            self.playfield,
            dt,
            &mut self.events,
        );
        if let Some(cause) = hit {
            self.spawner.cancel();
            log::info!("Game over ({:?}) with score {}", cause, self.score());
        }
        hit
    }

    /// Single input entry point for keys, pointer and touch alike
    pub fn on_input(&mut self, now_ms: f64) -> InputOutcome {
        match self.state.phase {
            GamePhase::Running => {
                tick::flap(&mut self.state, &self.tuning, &mut self.events);
                InputOutcome::Flapped
            }
            GamePhase::GameOver => {
                let ticket = self.begin_round(now_ms);
                InputOutcome::Restarted(ticket)
            }
        }
    }

    /// Start a new round. Ignored (returns `None`) while a round is running.
    pub fn restart(&mut self, now_ms: f64) -> Option<SpawnTicket> {
        match self.state.phase {
            GamePhase::Running => None,
            GamePhase::GameOver => Some(self.begin_round(now_ms)),
        }
    }

    fn begin_round(&mut self, now_ms: f64) -> SpawnTicket {
        self.spawner.cancel();
        self.state = SessionState::new(&self.tuning, self.playfield);
        self.clock.reset(now_ms);
        self.ticket = self.spawner.start(now_ms);
        self.spawn_pair();
        self.events.push(GameEvent::Restarted);
        log::info!("Round restarted");
        self.ticket
    }

    /// Host timer callback. Spawns only if the ticket belongs to this round.
    pub fn on_spawn_timer(&mut self, ticket: SpawnTicket) -> bool {
        if !self.spawner.accepts(ticket) {
            log::debug!(
                "Ignoring stale spawn ticket {} (current {})",
                ticket.generation(),
                self.ticket.generation()
            );
            return false;
        }
        self.spawn_pair();
        true
    }

    /// Polled cadence for hosts without their own timers
    pub fn poll_spawner(&mut self, now_ms: f64) -> bool {
        if self.spawner.poll(now_ms) {
            self.spawn_pair();
            true
        } else {
            false
        }
    }

    fn spawn_pair(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.state.obstacles.spawn(&mut self.rng, self.playfield);
    }

    /// Viewport changed: keep the round, reinterpret it against the new size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield = Playfield::new(width, height);
        log::info!("Playfield resized to {}x{}", width, height);
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(Tuning::default(), Playfield::new(800.0, 600.0), 42, 1000.0)
    }

    fn crash(s: &mut GameSession) {
        s.state.body.y = -1.0;
        assert_eq!(s.update(0.0), Some(HitCause::Ceiling));
    }

    #[test]
    fn test_new_session_spawns_immediately() {
        let s = session();
        assert_eq!(s.phase(), GamePhase::Running);
        assert_eq!(s.state().obstacles.len(), 1);
        assert_eq!(s.state().obstacles.front().map(|p| p.x), Some(800.0));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_input_flaps_while_running() {
        let mut s = session();
        assert_eq!(s.on_input(1010.0), InputOutcome::Flapped);
        assert_eq!(s.state().body.velocity, s.tuning().jump_velocity);
        assert_eq!(s.drain_events(), vec![GameEvent::Flap]);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut s = session();
        s.tick(1100.0);
        let y = s.state().body.y;
        assert_eq!(s.restart(1200.0), None);
        assert_eq!(s.state().body.y, y);
        assert_eq!(s.phase(), GamePhase::Running);
    }

    #[test]
    fn test_game_over_then_input_restarts() {
        let mut s = session();
        let mut events = Vec::new();
        for _ in 0..3 {
            s.state.scoreboard.on_passed(&mut events);
        }
        s.state.obstacles.spawn_with_top(100.0, s.playfield());
        s.state.background_offset = -123.0;
        crash(&mut s);
        assert_eq!(s.phase(), GamePhase::GameOver);

        let old_ticket = s.spawn_ticket();
        let outcome = s.on_input(5000.0);
        let InputOutcome::Restarted(new_ticket) = outcome else {
            panic!("expected restart, got {:?}", outcome);
        };
        assert_ne!(old_ticket, new_ticket);
        assert_eq!(s.phase(), GamePhase::Running);
        assert_eq!(s.score(), 0);
        assert_eq!(s.state().background_offset, 0.0);
        assert_eq!(s.state().body.velocity, 0.0);
        // Cleared, then one fresh pair spawned right away
        assert_eq!(s.state().obstacles.len(), 1);
        assert_eq!(s.state().obstacles.front().map(|p| p.x), Some(800.0));
        assert!(s.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_game_over_freezes_round() {
        let mut s = session();
        crash(&mut s);
        let before = serde_json::to_string(s.state()).unwrap();
        s.drain_events();
        for i in 0..10 {
            assert_eq!(s.tick(2000.0 + i as f64 * 16.0), None);
        }
        assert_eq!(serde_json::to_string(s.state()).unwrap(), before);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_stale_timer_cannot_spawn_into_new_round() {
        let mut s = session();
        let old_ticket = s.spawn_ticket();
        assert!(s.on_spawn_timer(old_ticket));
        assert_eq!(s.state().obstacles.len(), 2);

        crash(&mut s);
        // Spawner is cancelled at game over
        assert!(!s.on_spawn_timer(old_ticket));

        let new_ticket = s.restart(3000.0).unwrap();
        assert!(!s.on_spawn_timer(old_ticket));
        assert_eq!(s.state().obstacles.len(), 1);
        assert!(s.on_spawn_timer(new_ticket));
        assert_eq!(s.state().obstacles.len(), 2);
    }

    #[test]
    fn test_polled_spawns_follow_interval() {
        let mut s = session();
        assert!(!s.poll_spawner(2999.0));
        assert!(s.poll_spawner(3000.0));
        assert_eq!(s.state().obstacles.len(), 2);
        assert!(!s.poll_spawner(3500.0));
    }

    #[test]
    fn test_restart_resets_poll_cadence() {
        let mut s = session();
        crash(&mut s);
        assert!(!s.poll_spawner(10_000.0));
        s.restart(10_000.0);
        assert!(!s.poll_spawner(11_999.0));
        assert!(s.poll_spawner(12_000.0));
    }

    #[test]
    fn test_spawn_uses_current_playfield() {
        let mut s = session();
        s.resize(1024.0, 700.0);
        let ticket = s.spawn_ticket();
        s.on_spawn_timer(ticket);
        let newest = s.state().obstacles.pairs().last().cloned().unwrap();
        assert_eq!(newest.x, 1024.0);
        assert!((newest.bottom_y + newest.bottom_height - 700.0).abs() < 1e-3);
        // The older pair keeps its geometry
        assert_eq!(s.state().obstacles.front().map(|p| p.x), Some(800.0));
    }

    #[test]
    fn test_tick_caps_long_stall() {
        let mut s = session();
        let mut capped = session();
        s.tick(1000.0 + 60_000.0);
        capped.update(capped.tuning().dt_cap);
        assert_eq!(s.state().body.y, capped.state().body.y);
    }

    #[test]
    fn test_update_caps_explicit_dt() {
        let mut s = session();
        let mut capped = session();
        s.update(5.0);
        capped.update(capped.tuning().dt_cap);
        assert_eq!(s.state().body.y, capped.state().body.y);
        assert_eq!(
            s.state().obstacles.front().map(|p| p.x),
            capped.state().obstacles.front().map(|p| p.x)
        );
    }

    #[test]
    fn test_repeated_same_timestamp_is_idempotent() {
        let mut s = session();
        s.tick(1016.0);
        let before = serde_json::to_string(s.state()).unwrap();
        for _ in 0..10 {
            s.tick(1016.0);
        }
        assert_eq!(serde_json::to_string(s.state()).unwrap(), before);
    }

    #[test]
    fn test_resize_keeps_round() {
        let mut s = session();
        s.tick(1100.0);
        let y = s.state().body.y;
        s.resize(400.0, 900.0);
        assert_eq!(s.state().body.y, y);
        assert_eq!(s.playfield(), Playfield::new(400.0, 900.0));
    }
}
