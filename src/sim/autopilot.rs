//! Demo pilot: decides when to flap so the game can play itself
//!
//! Used by the attract/demo toggle on the web and by the native headless run.

use super::state::{GamePhase, Playfield, SessionState};

/// Distance kept between the body's bottom edge and the lower pipe
const GAP_MARGIN: f32 = 20.0;

/// Should the pilot flap this frame?
///
/// Only flaps while falling, once the body's bottom edge drops below the
/// aim line: just above the lower segment of the next pipe still ahead of
/// the body, or the middle of the playfield when no pipe is ahead.
pub fn should_flap(state: &SessionState, playfield: Playfield) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }
    let body = &state.body;
    if body.velocity < 0.0 {
        return false;
    }

    let aim = match state.obstacles.next_unpassed() {
        Some(pair) => pair.bottom_y - GAP_MARGIN,
        None => (playfield.height + body.height) / 2.0,
    };
    body.bottom() > aim
}
