//! Rendering module
//!
//! `scene` projects the session into quads and text without touching the
//! GPU. On the web, `pipeline` draws the quads through WebGPU and `text`
//! puts the HUD on a 2D overlay canvas.

pub mod pipeline;
pub mod scene;
pub mod shapes;
#[cfg(target_arch = "wasm32")]
pub mod text;
pub mod vertex;

pub use pipeline::SpriteRenderState;
pub use scene::{Quad, Scene, TextAlign, TextItem, TextureId, build_scene};
#[cfg(target_arch = "wasm32")]
pub use text::TextOverlay;
