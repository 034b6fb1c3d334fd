//! Variable-timestep simulation step
//!
//! One call advances a running round by `dt` seconds:
//! integrate body → scroll pipes → evict → collide → score.

use super::collision;
use super::state::{GameEvent, GamePhase, HitCause, Playfield, SessionState};
use crate::tuning::Tuning;

/// Advance the round by `dt` seconds.
///
/// Returns the hit cause if this step ended the round. Does nothing once the
/// round is over, so a hit is reported exactly once.
pub fn step(
    state: &mut SessionState,
    tuning: &Tuning,
    playfield: Playfield,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> Option<HitCause> {
    if state.phase != GamePhase::Running {
        return None;
    }

    state.body.integrate(tuning.gravity, dt);
    state.scroll_background(tuning.background_speed, dt, playfield.width);

    state.obstacles.advance(dt, tuning.pipe_speed);
    state.obstacles.evict_offscreen();

    if let Some(cause) = collision::detect(&state.body, &state.obstacles, playfield) {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::Hit { cause });
        return Some(cause);
    }

    let passed = state.obstacles.mark_passed(state.body.x);
    for _ in 0..passed {
        state.scoreboard.on_passed(events);
    }

    None
}

/// Apply a flap to a running round. Returns false if the round is over.
pub fn flap(state: &mut SessionState, tuning: &Tuning, events: &mut Vec<GameEvent>) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }
    state.body.apply_impulse(tuning.jump_velocity);
    events.push(GameEvent::Flap);
    true
}
