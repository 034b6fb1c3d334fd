//! Error types for the collaborator layer
//!
//! The simulation itself never fails: invalid transitions are ignored.
//! Only configuration, asset loading and GPU setup can go wrong, and all
//! of them happen before a session starts.

use thiserror::Error;

/// Failure to build a usable `Tuning`
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning value `{field}` must be positive and finite (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("pipe gap {gap} plus twice the minimum segment {min_height} leaves no room in a {height}px playfield")]
    GapTooLarge { gap: f32, min_height: f32, height: f32 },
}

/// Failure to load one of the sprites or sounds
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to decode image {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("crop {crop:?} lies outside the {width}x{height} image {name}")]
    CropOutOfBounds {
        name: String,
        crop: [u32; 4],
        width: u32,
        height: u32,
    },
}

/// Failure to bring up the GPU side
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no usable texture format")]
    NoSurfaceFormat,
}
