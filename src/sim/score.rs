//! Score counter with milestone cues

use serde::{Deserialize, Serialize};

use super::state::GameEvent;

/// Points for the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u32,
    milestone_interval: u32,
}

impl Scoreboard {
    pub fn new(milestone_interval: u32) -> Self {
        Self {
            score: 0,
            milestone_interval: milestone_interval.max(1),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Count one passed pair, emitting `Passed` and, on every Nth point, `Milestone`
    pub fn on_passed(&mut self, events: &mut Vec<GameEvent>) {
        self.score += 1;
        events.push(GameEvent::Passed { score: self.score });
        if self.score % self.milestone_interval == 0 {
            log::info!("Milestone reached: {}", self.score);
            events.push(GameEvent::Milestone { score: self.score });
        }
    }
}
