//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the
//! browser, the GPU or audio:
//! - Variable timestep, integrated exactly so outcomes don't depend on frame rate
//! - Seeded RNG only (`Pcg32`)
//! - Pipes kept in spawn order, oldest first

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod obstacles;
pub mod score;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::Clock;
pub use collision::{Aabb, body_hits_pair, body_out_of_bounds, detect};
pub use obstacles::{ObstacleField, ObstaclePair};
pub use score::Scoreboard;
pub use session::{GameSession, InputOutcome};
pub use spawner::{ObstacleGenerator, SpawnTicket};
pub use state::{Body, GameEvent, GamePhase, HitCause, Playfield, SessionState};
pub use tick::{flap, step};
