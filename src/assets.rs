//! Sprite and sound assets
//!
//! The game ships three images (body, pipe, background) and four sound
//! clips. Images are fetched as bytes, decoded with `image` and handed to
//! the renderer as tightly packed RGBA8. Sounds stay as URLs; the browser
//! streams them.

use crate::audio::SoundCue;
use crate::error::AssetError;

/// Which sprite an image is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Body,
    Pipe,
    Background,
}

impl SpriteKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            SpriteKind::Body => "bird1.png",
            SpriteKind::Pipe => "pipe.png",
            SpriteKind::Background => "bg.png",
        }
    }

    /// Visible region of the source image, if only part of it is drawn
    pub fn crop(&self) -> Option<SpriteCrop> {
        match self {
            SpriteKind::Pipe => Some(PIPE_CROP),
            _ => None,
        }
    }
}

/// Pixel rectangle inside a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The pipe image is 360×693 with 135 px of transparent padding either side
pub const PIPE_CROP: SpriteCrop = SpriteCrop {
    x: 135,
    y: 0,
    width: 90,
    height: 693,
};

/// Balance override looked up next to the other assets
pub const TUNING_FILE: &str = "tuning.json";

/// Where every asset lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    base_url: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::new("assets")
    }
}

impl AssetManifest {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn sprite_url(&self, kind: SpriteKind) -> String {
        format!("{}/{}", self.base_url, kind.file_name())
    }

    pub fn sound_url(&self, cue: SoundCue) -> String {
        format!("{}/{}", self.base_url, cue.file_name())
    }

    /// Optional balance override served next to the sprites
    pub fn tuning_url(&self) -> String {
        format!("{}/{}", self.base_url, TUNING_FILE)
    }
}

/// Decoded RGBA8 image, ready for texture upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageAsset {
    /// Single opaque white texel; tints become plain colors
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        }
    }
}

/// Decode fetched bytes for `kind`, applying its crop
pub fn decode_sprite(kind: SpriteKind, bytes: &[u8]) -> Result<ImageAsset, AssetError> {
    let img = image::load_from_memory(bytes)
        .map_err(|source| AssetError::Decode {
            name: kind.file_name().to_string(),
            source,
        })?
        .to_rgba8();

    let img = match kind.crop() {
        Some(crop) => {
            let (width, height) = img.dimensions();
            if crop.x + crop.width > width || crop.y + crop.height > height {
                return Err(AssetError::CropOutOfBounds {
                    name: kind.file_name().to_string(),
                    crop: [crop.x, crop.y, crop.width, crop.height],
                    width,
                    height,
                });
            }
            image::imageops::crop_imm(&img, crop.x, crop.y, crop.width, crop.height).to_image()
        }
        None => img,
    };

    let (width, height) = img.dimensions();
    Ok(ImageAsset {
        width,
        height,
        rgba: img.into_raw(),
    })
}

/// All three decoded sprites
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub body: ImageAsset,
    pub pipe: ImageAsset,
    pub background: ImageAsset,
}

#[cfg(target_arch = "wasm32")]
pub use web::{load_sprites, load_tuning_json};

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Response;

    use super::{AssetManifest, ImageAsset, SpriteKind, SpriteSet, decode_sprite};
    use crate::error::AssetError;

    async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
        let fetch_err = |reason: String| AssetError::Fetch {
            url: url.to_string(),
            reason,
        };
        let window = web_sys::window().ok_or_else(|| fetch_err("no window".into()))?;

        let resp = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| fetch_err(format!("{:?}", e)))?;
        let resp: Response = resp
            .dyn_into()
            .map_err(|_| fetch_err("not a Response".into()))?;
        if !resp.ok() {
            return Err(fetch_err(format!("HTTP {}", resp.status())));
        }

        let buffer = resp
            .array_buffer()
            .map_err(|e| fetch_err(format!("{:?}", e)))?;
        let buffer = JsFuture::from(buffer)
            .await
            .map_err(|e| fetch_err(format!("{:?}", e)))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }

    async fn load(manifest: &AssetManifest, kind: SpriteKind) -> Result<ImageAsset, AssetError> {
        let url = manifest.sprite_url(kind);
        let bytes = fetch_bytes(&url).await?;
        let image = decode_sprite(kind, &bytes)?;
        log::info!("Loaded {} ({}x{})", url, image.width, image.height);
        Ok(image)
    }

    /// Fetch and decode every sprite before the first round starts
    pub async fn load_sprites(manifest: &AssetManifest) -> Result<SpriteSet, AssetError> {
        let (body, pipe, background) = futures::try_join!(
            load(manifest, SpriteKind::Body),
            load(manifest, SpriteKind::Pipe),
            load(manifest, SpriteKind::Background),
        )?;
        Ok(SpriteSet {
            body,
            pipe,
            background,
        })
    }

    /// Body of the tuning file, or `None` when the server has none
    pub async fn load_tuning_json(manifest: &AssetManifest) -> Option<String> {
        let url = manifest.tuning_url();
        match fetch_bytes(&url).await {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(json) => Some(json),
                Err(e) => {
                    log::warn!("{} is not UTF-8: {}", url, e);
                    None
                }
            },
            Err(e) => {
                log::info!("No tuning override ({})", e);
                None
            }
        }
    }
}
