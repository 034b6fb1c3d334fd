//! Pipe spawn cadence, decoupled from the render tick
//!
//! The generator can be driven two ways:
//! - by a host timer (`setInterval` on the web) that hands back the
//!   `SpawnTicket` it was created with, or
//! - by polling with the current timestamp (`poll`).
//!
//! Every `start`/`cancel` bumps the generation, so a ticket held by a timer
//! from an earlier round is rejected instead of spawning into the new one.

use serde::{Deserialize, Serialize};

/// Proof that a host timer belongs to the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnTicket(u64);

impl SpawnTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Fixed-interval spawn scheduler
#[derive(Debug, Clone)]
pub struct ObstacleGenerator {
    interval_ms: f64,
    generation: u64,
    /// Next polled spawn time; `None` while cancelled
    next_due_ms: Option<f64>,
}

impl ObstacleGenerator {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            generation: 0,
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Begin a new cadence at `now_ms`, invalidating every older ticket.
    ///
    /// The caller performs the immediate spawn; the first scheduled one is
    /// one interval later.
    pub fn start(&mut self, now_ms: f64) -> SpawnTicket {
        self.generation += 1;
        self.next_due_ms = Some(now_ms + self.interval_ms);
        SpawnTicket(self.generation)
    }

    /// Stop spawning. Outstanding tickets become stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.next_due_ms = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Does this timer callback belong to the running cadence?
    pub fn accepts(&self, ticket: SpawnTicket) -> bool {
        self.is_active() && ticket.0 == self.generation
    }

    /// Polled mode: true if a spawn is due at `now_ms`.
    ///
    /// At most one spawn per call. After a long stall the missed intervals
    /// are skipped rather than released as a burst of stacked pairs.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }
        let next = due + self.interval_ms;
        self.next_due_ms = Some(if next <= now_ms {
            now_ms + self.interval_ms
        } else {
            next
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_cadence() {
        let mut spawner = ObstacleGenerator::new(2000.0);
        spawner.start(0.0);
        assert!(!spawner.poll(0.0));
        assert!(!spawner.poll(1999.0));
        assert!(spawner.poll(2000.0));
        assert!(!spawner.poll(2001.0));
        assert!(spawner.poll(4010.0));
        // Cadence stays anchored to the original schedule
        assert!(spawner.poll(6000.0));
    }

    #[test]
    fn test_stall_skips_missed_intervals() {
        let mut spawner = ObstacleGenerator::new(2000.0);
        spawner.start(0.0);
        assert!(spawner.poll(60_000.0));
        assert!(!spawner.poll(60_000.0));
        assert!(!spawner.poll(61_999.0));
        assert!(spawner.poll(62_000.0));
    }

    #[test]
    fn test_cancel_stops_polling() {
        let mut spawner = ObstacleGenerator::new(2000.0);
        spawner.start(0.0);
        spawner.cancel();
        assert!(!spawner.is_active());
        assert!(!spawner.poll(10_000.0));
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let mut spawner = ObstacleGenerator::new(2000.0);
        let old = spawner.start(0.0);
        assert!(spawner.accepts(old));

        let new = spawner.start(5000.0);
        assert!(!spawner.accepts(old));
        assert!(spawner.accepts(new));

        spawner.cancel();
        assert!(!spawner.accepts(new));
    }
}
