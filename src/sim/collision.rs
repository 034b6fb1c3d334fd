//! Collision detection for the body against pipes and the playfield edges
//!
//! Everything here is a pure predicate over axis-aligned rectangles. The
//! gap between a pair's segments is the only safe corridor through it.

use glam::Vec2;

use super::obstacles::{ObstacleField, ObstaclePair};
use super::state::{Body, HitCause, Playfield};

/// Axis-aligned box in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Strict horizontal overlap (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.max.y > other.min.y && self.min.y < other.max.y
    }
}

impl Body {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}

impl ObstaclePair {
    /// Top segment box (from the ceiling down to `top_height`)
    pub fn top_aabb(&self, pipe_width: f32) -> Aabb {
        Aabb::new(self.x, 0.0, pipe_width, self.top_height)
    }

    /// Bottom segment box (from `bottom_y` down to the floor)
    pub fn bottom_aabb(&self, pipe_width: f32) -> Aabb {
        Aabb::new(self.x, self.bottom_y, pipe_width, self.bottom_height)
    }
}

/// True if the body is level with the pair but outside its gap
pub fn body_hits_pair(body: &Body, pair: &ObstaclePair, pipe_width: f32) -> bool {
    if !body.aabb().overlaps_x(&pair.top_aabb(pipe_width)) {
        return false;
    }
    body.y < pair.top_height || body.bottom() > pair.bottom_y
}

/// Which edge of the playfield the body has crossed, if any
pub fn body_out_of_bounds(body: &Body, playfield: Playfield) -> Option<HitCause> {
    if body.y < 0.0 {
        Some(HitCause::Ceiling)
    } else if body.bottom() > playfield.height {
        Some(HitCause::Floor)
    } else {
        None
    }
}

/// Evaluate every collision for this tick. Pipes are checked before bounds.
pub fn detect(body: &Body, field: &ObstacleField, playfield: Playfield) -> Option<HitCause> {
    let pipe_width = field.pipe_width;
    if field
        .pairs()
        .any(|pair| body_hits_pair(body, pair, pipe_width))
    {
        return Some(HitCause::Pipe);
    }
    body_out_of_bounds(body, playfield)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const PIPE_W: f32 = 90.0;

    fn body_at(y: f32) -> Body {
        Body {
            x: 50.0,
            y,
            velocity: 0.0,
            width: 100.0,
            height: 70.0,
        }
    }

    fn pair_at(x: f32, top: f32) -> ObstaclePair {
        ObstaclePair {
            x,
            top_height: top,
            bottom_y: top + 250.0,
            bottom_height: 600.0 - top - 250.0,
            passed: false,
        }
    }

    #[test]
    fn test_hits_top_segment() {
        let pair = pair_at(100.0, 200.0);
        assert!(body_hits_pair(&body_at(150.0), &pair, PIPE_W));
    }

    #[test]
    fn test_hits_bottom_segment() {
        let pair = pair_at(100.0, 200.0);
        // bottom edge at 470, bottom segment starts at 450
        assert!(body_hits_pair(&body_at(400.0), &pair, PIPE_W));
    }

    #[test]
    fn test_safe_in_gap() {
        let pair = pair_at(100.0, 200.0);
        assert!(!body_hits_pair(&body_at(200.0), &pair, PIPE_W));
        assert!(!body_hits_pair(&body_at(380.0), &pair, PIPE_W));
        assert!(!body_hits_pair(&body_at(300.0), &pair, PIPE_W));
    }

    #[test]
    fn test_no_hit_without_horizontal_overlap() {
        // Pipe starts exactly at the body's right edge
        let pair = pair_at(150.0, 200.0);
        assert!(!body_hits_pair(&body_at(0.0), &pair, PIPE_W));
        // Pipe ends exactly at the body's left edge
        let pair = pair_at(-40.0, 200.0);
        assert!(!body_hits_pair(&body_at(0.0), &pair, PIPE_W));
    }

    #[test]
    fn test_bounds() {
        let playfield = Playfield::new(800.0, 600.0);
        assert_eq!(body_out_of_bounds(&body_at(-0.5), playfield), Some(HitCause::Ceiling));
        assert_eq!(body_out_of_bounds(&body_at(531.0), playfield), Some(HitCause::Floor));
        assert_eq!(body_out_of_bounds(&body_at(0.0), playfield), None);
        assert_eq!(body_out_of_bounds(&body_at(530.0), playfield), None);
    }

    #[test]
    fn test_detect_prefers_pipe() {
        let mut field = ObstacleField::new(&Tuning::default());
        let playfield = Playfield::new(800.0, 600.0);
        field.spawn_with_top(200.0, Playfield::new(100.0, 600.0));
        // Above the ceiling and inside the pipe column
        assert_eq!(detect(&body_at(-10.0), &field, playfield), Some(HitCause::Pipe));
        // In the gap
        assert_eq!(detect(&body_at(250.0), &field, playfield), None);
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 5.0, 5.0)));
        assert!(a.overlaps(&Aabb::new(9.9, 9.9, 5.0, 5.0)));
    }

    proptest! {
        #[test]
        fn prop_no_false_positive_in_corridor(
            top in 50.0f32..300.0,
            pair_x in -80.0f32..140.0,
            t in 0.0f32..=1.0,
        ) {
            let pair = pair_at(pair_x, top);
            // y anywhere in [top, bottom_y - body_height]
            let y = top + t * (pair.bottom_y - 70.0 - top);
            let y = y.clamp(top, pair.bottom_y - 70.0);
            prop_assert!(!body_hits_pair(&body_at(y), &pair, PIPE_W));
        }

        #[test]
        fn prop_hit_matches_rectangle_test(
            top in 50.0f32..300.0,
            pair_x in -200.0f32..300.0,
            y in 0.0f32..530.0,
        ) {
            let pair = pair_at(pair_x, top);
            let body = body_at(y);
            let by_rects = body.aabb().overlaps(&pair.top_aabb(PIPE_W))
                || body.aabb().overlaps(&pair.bottom_aabb(PIPE_W));
            prop_assert_eq!(body_hits_pair(&body, &pair, PIPE_W), by_rects);
        }
    }
}
