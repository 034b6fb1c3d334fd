//! Pipe pairs and the field that scrolls them
//!
//! Pairs are spawned at the right edge in strictly increasing time, and all
//! move at the same speed, so the deque is always sorted left-to-right and
//! only the front can ever leave the screen.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Playfield;
use crate::tuning::Tuning;

/// One top + bottom pipe sharing a gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Left edge
    pub x: f32,
    /// Height of the top segment (it starts at y = 0)
    pub top_height: f32,
    /// Where the bottom segment starts (`top_height + gap`)
    pub bottom_y: f32,
    /// Height of the bottom segment (reaches the playfield floor)
    pub bottom_height: f32,
    /// Set once the body has cleared this pair; never unset
    pub passed: bool,
}

impl ObstaclePair {
    /// Right edge for a pipe of the given width
    #[inline]
    pub fn right(&self, pipe_width: f32) -> f32 {
        self.x + pipe_width
    }
}

/// Ordered collection of live pipe pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    pairs: VecDeque<ObstaclePair>,
    pub pipe_width: f32,
    pub gap: f32,
    pub min_height: f32,
}

impl ObstacleField {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pairs: VecDeque::new(),
            pipe_width: tuning.pipe_width,
            gap: tuning.pipe_gap,
            min_height: tuning.pipe_min_height,
        }
    }

    /// Live pairs, leftmost first
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = &ObstaclePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Leftmost pair, if any
    pub fn front(&self) -> Option<&ObstaclePair> {
        self.pairs.front()
    }

    /// Next pair the body still has to clear
    pub fn next_unpassed(&self) -> Option<&ObstaclePair> {
        self.pairs.iter().find(|p| !p.passed)
    }

    /// Range the top segment height is drawn from for a playfield height.
    ///
    /// Returns `None` when the gap plus two minimum segments doesn't fit.
    pub fn top_height_range(&self, playfield_height: f32) -> Option<(f32, f32)> {
        let max = playfield_height - self.gap - self.min_height;
        (max >= self.min_height).then_some((self.min_height, max))
    }

    /// Append a pair with a uniformly random top height at the right edge
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, playfield: Playfield) -> &ObstaclePair {
        match self.top_height_range(playfield.height) {
            Some((min, max)) => {
                let top = rng.random_range(min..=max);
                self.push_pair(top, self.gap, playfield)
            }
            // Cramped viewport: centre the gap and let the segments shrink
            None => {
                let gap = self.gap.min(playfield.height.max(0.0));
                if gap < self.gap {
                    log::warn!(
                        "Pipe gap {} taller than playfield {}, clamping",
                        self.gap,
                        playfield.height
                    );
                }
                let top = ((playfield.height - gap) / 2.0).max(0.0);
                self.push_pair(top, gap, playfield)
            }
        }
    }

    /// Append a pair with a fixed top height at the right edge
    pub fn spawn_with_top(&mut self, top_height: f32, playfield: Playfield) -> &ObstaclePair {
        self.push_pair(top_height, self.gap, playfield)
    }

    fn push_pair(&mut self, top_height: f32, gap: f32, playfield: Playfield) -> &ObstaclePair {
        let bottom_y = top_height + gap;
        self.pairs.push_back(ObstaclePair {
            x: playfield.width,
            top_height,
            bottom_y,
            bottom_height: playfield.height - bottom_y,
            passed: false,
        });
        &self.pairs[self.pairs.len() - 1]
    }

    /// Scroll every pair left by `speed * dt`
    pub fn advance(&mut self, dt: f32, speed: f32) {
        let dx = speed * dt;
        for pair in &mut self.pairs {
            pair.x -= dx;
        }
    }

    /// Drop pairs whose right edge has left the screen. Returns how many.
    pub fn evict_offscreen(&mut self) -> usize {
        let mut evicted = 0;
        while let Some(front) = self.pairs.front() {
            if front.right(self.pipe_width) >= 0.0 {
                break;
            }
            self.pairs.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Flag every pair whose right edge is now left of `body_x`.
    ///
    /// Returns the number of pairs that became passed on this call.
    pub fn mark_passed(&mut self, body_x: f32) -> u32 {
        let mut newly_passed = 0;
        for pair in &mut self.pairs {
            if pair.right(self.pipe_width) >= body_x {
                // Sorted left-to-right: nothing further right has been passed
                break;
            }
            if !pair.passed {
                pair.passed = true;
                newly_passed += 1;
            }
        }
        newly_passed
    }

    /// Remove every pair
    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}
