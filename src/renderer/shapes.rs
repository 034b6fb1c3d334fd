//! Quad tessellation and batching

use std::ops::Range;

use glam::Vec2;

use super::scene::{Quad, TextureId};
use super::vertex::SpriteVertex;

/// Pixel coordinates (origin top-left, y down) to normalized device coordinates
#[inline]
pub fn pixel_to_ndc(p: Vec2, viewport: Vec2) -> [f32; 2] {
    [p.x / viewport.x * 2.0 - 1.0, 1.0 - p.y / viewport.y * 2.0]
}

/// Two triangles covering `quad`, rotated about its centre
pub fn quad_vertices(quad: &Quad, viewport: Vec2) -> [SpriteVertex; 6] {
    let center = quad.center();
    let half = quad.size * 0.5;
    let (sin, cos) = quad.rotation.sin_cos();
    // y grows downward, so this turns clockwise on screen
    let place = |local: Vec2| -> [f32; 2] {
        let rotated = Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos);
        pixel_to_ndc(center + rotated, viewport)
    };

    let tl = place(Vec2::new(-half.x, -half.y));
    let tr = place(Vec2::new(half.x, -half.y));
    let bl = place(Vec2::new(-half.x, half.y));
    let br = place(Vec2::new(half.x, half.y));
    let c = quad.color;

    [
        SpriteVertex::new(tl, [0.0, 0.0], c),
        SpriteVertex::new(bl, [0.0, 1.0], c),
        SpriteVertex::new(tr, [1.0, 0.0], c),
        SpriteVertex::new(tr, [1.0, 0.0], c),
        SpriteVertex::new(bl, [0.0, 1.0], c),
        SpriteVertex::new(br, [1.0, 1.0], c),
    ]
}

/// One draw call: a run of consecutive quads sharing a texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub texture: TextureId,
    pub vertices: Range<u32>,
}

/// Tessellate every quad in order and group them into per-texture draw runs.
///
/// Draw order is preserved; a texture change always starts a new batch.
pub fn tessellate(quads: &[Quad], viewport: Vec2) -> (Vec<SpriteVertex>, Vec<Batch>) {
    let mut vertices = Vec::with_capacity(quads.len() * 6);
    let mut batches: Vec<Batch> = Vec::new();

    for quad in quads {
        let start = vertices.len() as u32;
        vertices.extend_from_slice(&quad_vertices(quad, viewport));
        let end = vertices.len() as u32;

        match batches.last_mut() {
            Some(batch) if batch.texture == quad.texture => batch.vertices.end = end,
            _ => batches.push(Batch {
                texture: quad.texture,
                vertices: start..end,
            }),
        }
    }

    (vertices, batches)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn quad(texture: TextureId, x: f32, y: f32, w: f32, h: f32) -> Quad {
        Quad {
            texture,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            rotation: 0.0,
            color: [1.0; 4],
        }
    }

    fn close(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-5 && (a[1] - b[1]).abs() < 1e-5
    }

    #[test]
    fn test_pixel_to_ndc_corners() {
        assert_eq!(pixel_to_ndc(Vec2::ZERO, VIEWPORT), [-1.0, 1.0]);
        assert_eq!(pixel_to_ndc(VIEWPORT, VIEWPORT), [1.0, -1.0]);
        assert_eq!(pixel_to_ndc(VIEWPORT * 0.5, VIEWPORT), [0.0, 0.0]);
    }

    #[test]
    fn test_full_screen_quad() {
        let v = quad_vertices(&quad(TextureId::Background, 0.0, 0.0, 800.0, 600.0), VIEWPORT);
        assert!(close(v[0].position, [-1.0, 1.0]));
        assert!(close(v[5].position, [1.0, -1.0]));
        assert_eq!(v[0].uv, [0.0, 0.0]);
        assert_eq!(v[5].uv, [1.0, 1.0]);
    }

    #[test]
    fn test_half_turn_flips_texture() {
        let mut q = quad(TextureId::Pipe, 0.0, 0.0, 800.0, 600.0);
        q.rotation = std::f32::consts::PI;
        let v = quad_vertices(&q, VIEWPORT);
        // Texture's top-left lands at the screen's bottom-right
        assert!(close(v[0].position, [1.0, -1.0]));
        assert_eq!(v[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_quarter_turn_is_clockwise() {
        // 200×200 square centred at (400, 300)
        let mut q = quad(TextureId::Body, 300.0, 200.0, 200.0, 200.0);
        q.rotation = std::f32::consts::FRAC_PI_2;
        let v = quad_vertices(&q, VIEWPORT);
        // Top-left corner (300, 200) moves to top-right (500, 200)
        assert!(close(v[0].position, pixel_to_ndc(Vec2::new(500.0, 200.0), VIEWPORT)));
    }

    #[test]
    fn test_batches_keep_order() {
        let quads = [
            quad(TextureId::Background, 0.0, 0.0, 10.0, 10.0),
            quad(TextureId::Background, 10.0, 0.0, 10.0, 10.0),
            quad(TextureId::Pipe, 0.0, 0.0, 10.0, 10.0),
            quad(TextureId::Body, 0.0, 0.0, 10.0, 10.0),
            quad(TextureId::Pipe, 0.0, 0.0, 10.0, 10.0),
        ];
        let (vertices, batches) = tessellate(&quads, VIEWPORT);
        assert_eq!(vertices.len(), 30);
        let summary: Vec<_> = batches
            .iter()
            .map(|b| (b.texture, b.vertices.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TextureId::Background, 0..12),
                (TextureId::Pipe, 12..18),
                (TextureId::Body, 18..24),
                (TextureId::Pipe, 24..30),
            ]
        );
    }

    #[test]
    fn test_empty_scene() {
        let (vertices, batches) = tessellate(&[], VIEWPORT);
        assert!(vertices.is_empty());
        assert!(batches.is_empty());
    }
}
