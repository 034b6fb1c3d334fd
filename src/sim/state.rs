//! Game state and core simulation types
//!
//! Everything a round needs lives in `SessionState`; restart swaps in a
//! fresh one rather than patching fields back to their defaults.

use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleField;
use super::score::Scoreboard;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Round ended; waits for an explicit restart
    GameOver,
}

/// What the body ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCause {
    /// Top or bottom segment of a pipe pair
    Pipe,
    /// Above the playfield
    Ceiling,
    /// Below the playfield
    Floor,
}

/// Events emitted by the simulation for the audio/visual collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player input applied an impulse
    Flap,
    /// A pair was passed; carries the new score
    Passed { score: u32 },
    /// Score reached a multiple of the milestone interval
    Milestone { score: u32 },
    /// Round ended on a collision
    Hit { cause: HitCause },
    /// A new round started
    Restarted,
}

/// Playfield dimensions in pixels (tracks the viewport)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Left edge; fixed for the whole round
    pub x: f32,
    /// Top edge (screen coordinates, y grows downward)
    pub y: f32,
    /// Vertical velocity (pixels/s, negative = upward)
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    /// Body at rest, vertically centred in the playfield
    pub fn new(tuning: &Tuning, playfield: Playfield) -> Self {
        Self {
            x: tuning.body_x,
            y: (playfield.height - tuning.body_height) / 2.0,
            velocity: 0.0,
            width: tuning.body_width,
            height: tuning.body_height,
        }
    }

    /// Flap: velocity becomes the jump constant, whatever it was before
    pub fn apply_impulse(&mut self, jump_velocity: f32) {
        self.velocity = jump_velocity;
    }

    /// Advance under constant gravity for `dt` seconds.
    ///
    /// Uses the exact constant-acceleration step so splitting an interval
    /// into any number of ticks lands on the same position.
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.y += self.velocity * dt + 0.5 * gravity * dt * dt;
        self.velocity += gravity * dt;
    }

    /// Display tilt in degrees (nose up when rising, down when falling)
    pub fn tilt_degrees(&self, velocity_normalizer: f32, max_deg: f32) -> f32 {
        (self.velocity / velocity_normalizer * max_deg).clamp(-max_deg, max_deg)
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: GamePhase,
    pub body: Body,
    /// Live pipe pairs in spawn order (= left-to-right on screen)
    pub obstacles: ObstacleField,
    pub scoreboard: Scoreboard,
    /// Background scroll offset, always in (-width, 0]
    pub background_offset: f32,
}

impl SessionState {
    /// Fresh round: body centred, no pipes, score 0
    pub fn new(tuning: &Tuning, playfield: Playfield) -> Self {
        Self {
            phase: GamePhase::Running,
            body: Body::new(tuning, playfield),
            obstacles: ObstacleField::new(tuning),
            scoreboard: Scoreboard::new(tuning.milestone_interval),
            background_offset: 0.0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Scroll the background left, wrapping every playfield width
    pub fn scroll_background(&mut self, speed: f32, dt: f32, width: f32) {
        if width <= 0.0 {
            return;
        }
        let offset = (self.background_offset - speed * dt).rem_euclid(width);
        // rem_euclid lands in [0, width); shift into (-width, 0]
        self.background_offset = if offset == 0.0 { 0.0 } else { offset - width };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body() -> Body {
        Body::new(&Tuning::default(), Playfield::new(800.0, 600.0))
    }

    #[test]
    fn test_body_starts_centred_at_rest() {
        let b = body();
        assert_eq!(b.x, crate::consts::BODY_X);
        assert_eq!(b.velocity, 0.0);
        assert!((b.y + b.height / 2.0 - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_impulse_overrides_velocity() {
        let jump = crate::consts::JUMP_VELOCITY;
        for prior in [-1000.0, -300.0, 0.0, 42.0, 5000.0] {
            let mut b = body();
            b.velocity = prior;
            b.apply_impulse(jump);
            assert_eq!(b.velocity, jump);
        }
    }

    #[test]
    fn test_integrate_zero_dt_is_noop() {
        let mut b = body();
        b.velocity = 123.0;
        let (y, v) = (b.y, b.velocity);
        for _ in 0..10 {
            b.integrate(crate::consts::GRAVITY, 0.0);
        }
        assert_eq!(b.y, y);
        assert_eq!(b.velocity, v);
    }

    #[test]
    fn test_tilt_clamps() {
        let mut b = body();
        b.velocity = 10_000.0;
        assert_eq!(b.tilt_degrees(600.0, 25.0), 25.0);
        b.velocity = -10_000.0;
        assert_eq!(b.tilt_degrees(600.0, 25.0), -25.0);
        b.velocity = 300.0;
        assert!((b.tilt_degrees(600.0, 25.0) - 12.5).abs() < 1e-4);
    }

    #[test]
    fn test_background_wraps() {
        let mut state = SessionState::new(&Tuning::default(), Playfield::new(800.0, 600.0));
        state.scroll_background(30.0, 1.0, 800.0);
        assert!((state.background_offset + 30.0).abs() < 1e-4);
        // 27 more seconds: 840px total, wraps once
        state.scroll_background(30.0, 27.0, 800.0);
        assert!((state.background_offset + 40.0).abs() < 1e-3);
        assert!(state.background_offset <= 0.0 && state.background_offset > -800.0);
    }

    proptest! {
        #[test]
        fn prop_integrate_is_frame_rate_independent(
            y0 in 0.0f32..600.0,
            v0 in -400.0f32..400.0,
            splits in prop::collection::vec(0.001f32..0.1, 1..20),
        ) {
            let total: f32 = splits.iter().sum();
            let gravity = crate::consts::GRAVITY;

            let mut stepped = Body { x: 50.0, y: y0, velocity: v0, width: 100.0, height: 70.0 };
            for dt in &splits {
                stepped.integrate(gravity, *dt);
            }

            let mut single = Body { x: 50.0, y: y0, velocity: v0, width: 100.0, height: 70.0 };
            single.integrate(gravity, total);

            prop_assert!((stepped.y - single.y).abs() < 0.05, "y {} vs {}", stepped.y, single.y);
            prop_assert!((stepped.velocity - single.velocity).abs() < 0.01);
        }

        #[test]
        fn prop_background_offset_stays_in_range(
            steps in prop::collection::vec(0.0f32..0.1, 1..200),
            width in 100.0f32..2000.0,
        ) {
            let mut state = SessionState::new(&Tuning::default(), Playfield::new(width, 600.0));
            for dt in steps {
                state.scroll_background(30.0, dt, width);
                prop_assert!(state.background_offset <= 0.0);
                prop_assert!(state.background_offset > -width);
            }
        }
    }
}
