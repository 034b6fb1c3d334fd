//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, pointer, touch) mapped onto game actions
//! - Frame rate measurement for the HUD

pub mod fps;
pub mod input;

pub use fps::FpsCounter;
pub use input::{HostAction, InputSource, map_key};
