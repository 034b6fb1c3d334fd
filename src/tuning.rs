//! Data-driven game balance
//!
//! Every gameplay number lives here so a JSON blob can retune the game
//! without a rebuild. Defaults come from `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Game balance for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Spatial scale applied to HUD text (1.0 on desktop)
    pub ui_scale: f32,

    // === Body ===
    pub gravity: f32,
    pub jump_velocity: f32,
    pub body_x: f32,
    pub body_width: f32,
    pub body_height: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_min_height: f32,
    pub pipe_speed: f32,
    pub spawn_interval_ms: f64,

    // === Presentation ===
    pub background_speed: f32,
    pub max_tilt_deg: f32,
    pub tilt_velocity_normalizer: f32,

    // === Rules ===
    pub dt_cap: f32,
    pub milestone_interval: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            body_x: BODY_X,
            body_width: BODY_WIDTH,
            body_height: BODY_HEIGHT,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_min_height: PIPE_MIN_HEIGHT,
            pipe_speed: PIPE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,

            background_speed: BACKGROUND_SPEED,
            max_tilt_deg: MAX_TILT_DEG,
            tilt_velocity_normalizer: TILT_VELOCITY_NORMALIZER,

            dt_cap: DT_CAP,
            milestone_interval: MILESTONE_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning blob. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Tuning from an optional JSON blob, falling back to the defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Scale every spatial quantity (sizes, speeds, accelerations) by `factor`.
    ///
    /// Times, angles and rules are scale-free and stay untouched.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            ui_scale: self.ui_scale * factor,
            gravity: self.gravity * factor,
            jump_velocity: self.jump_velocity * factor,
            body_x: self.body_x * factor,
            body_width: self.body_width * factor,
            body_height: self.body_height * factor,
            pipe_width: self.pipe_width * factor,
            pipe_gap: self.pipe_gap * factor,
            pipe_min_height: self.pipe_min_height * factor,
            pipe_speed: self.pipe_speed * factor,
            background_speed: self.background_speed * factor,
            tilt_velocity_normalizer: self.tilt_velocity_normalizer * factor,
            ..self.clone()
        }
    }

    /// Apply the small-screen scale when the viewport is phone-sized
    pub fn for_viewport(&self, viewport_width: f32) -> Self {
        if viewport_width <= SMALL_SCREEN_MAX_WIDTH {
            self.scaled(SMALL_SCREEN_SCALE)
        } else {
            self.clone()
        }
    }

    /// Reject values that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive: [(&'static str, f64); 10] = [
            ("gravity", self.gravity as f64),
            ("body_width", self.body_width as f64),
            ("body_height", self.body_height as f64),
            ("pipe_width", self.pipe_width as f64),
            ("pipe_gap", self.pipe_gap as f64),
            ("pipe_speed", self.pipe_speed as f64),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("dt_cap", self.dt_cap as f64),
            ("tilt_velocity_normalizer", self.tilt_velocity_normalizer as f64),
            ("milestone_interval", self.milestone_interval as f64),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        if !(self.pipe_min_height.is_finite() && self.pipe_min_height >= 0.0) {
            return Err(TuningError::NonPositive {
                field: "pipe_min_height",
                value: self.pipe_min_height as f64,
            });
        }
        Ok(())
    }

    /// Check the pipe layout fits a playfield of the given height
    pub fn check_playfield(&self, height: f32) -> Result<(), TuningError> {
        if self.pipe_gap + 2.0 * self.pipe_min_height > height {
            return Err(TuningError::GapTooLarge {
                gap: self.pipe_gap,
                min_height: self.pipe_min_height,
                height,
            });
        }
        Ok(())
    }
}
