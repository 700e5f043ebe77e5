//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, advancing a session clock by a fixed step
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The session owns every entity; entities never reach back into the session
//! except through data passed into their update calls.

pub mod collision;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Aabb, Bounds};
pub use powerup::{PowerUp, ShieldOrb};
pub use state::{
    Brick, BrickKind, Enemy, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player,
};
pub use tick::{TickInput, tick};
pub use timer::{TimerId, TimerTask, Timers};
