//! Sky Flap - a side-scrolling flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, obstacles, collisions, scoring, session state machine)
//! - `renderer`: Scene projection and WebGPU sprite pipeline
//! - `platform`: Browser/native input mapping
//! - `audio`: Cued sound playback
//! - `assets`: Sprite/sound manifest and image decoding
//! - `settings`: Player preferences (volume, mute, FPS readout)
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{AssetError, RenderError, TuningError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// Physical units at scale 1.0: pixels, seconds, pixels/second.
pub mod consts {
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 360.0;
    /// Velocity set by a flap (negative = upward, pixels/s)
    pub const JUMP_VELOCITY: f32 = -300.0;

    /// Body geometry - x never changes during a round
    pub const BODY_X: f32 = 50.0;
    pub const BODY_WIDTH: f32 = 100.0;
    pub const BODY_HEIGHT: f32 = 70.0;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 90.0;
    pub const PIPE_GAP: f32 = 250.0;
    /// Shortest allowed top or bottom segment
    pub const PIPE_MIN_HEIGHT: f32 = 50.0;
    /// Horizontal scroll speed of pipes (pixels/s)
    pub const PIPE_SPEED: f32 = 120.0;
    /// Wall-clock interval between pipe spawns (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 2000.0;

    /// Background parallax scroll speed (pixels/s)
    pub const BACKGROUND_SPEED: f32 = 30.0;

    /// Largest elapsed time a single tick may integrate (seconds)
    pub const DT_CAP: f32 = 0.1;

    /// Body tilt shown while rising/falling
    pub const MAX_TILT_DEG: f32 = 25.0;
    /// Velocity that maps to a full `MAX_TILT_DEG` tilt (pixels/s)
    pub const TILT_VELOCITY_NORMALIZER: f32 = 600.0;

    /// A milestone cue plays every N points
    pub const MILESTONE_INTERVAL: u32 = 10;

    /// Viewports this narrow get the small-screen scale
    pub const SMALL_SCREEN_MAX_WIDTH: f32 = 768.0;
    pub const SMALL_SCREEN_SCALE: f32 = 0.55;

    /// HUD font sizes (pixels, before scaling)
    pub const SCORE_FONT_PX: f32 = 30.0;
    pub const TITLE_FONT_PX: f32 = 60.0;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}
