//! HUD text drawn on a transparent 2D canvas stacked over the WebGPU canvas

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::TextItem;

pub struct TextOverlay {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl TextOverlay {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Replace everything on the overlay with `texts`
    pub fn draw(&self, texts: &[TextItem]) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);

        for item in texts {
            self.ctx.set_font(&format!("{}px Arial", item.font_px));
            self.ctx.set_fill_style_str(item.color);
            self.ctx.set_text_align(item.align.as_css());
            if let Err(e) = self.ctx.fill_text(&item.text, item.x as f64, item.y as f64) {
                log::warn!("fill_text failed: {:?}", e);
            }
        }
    }
}
