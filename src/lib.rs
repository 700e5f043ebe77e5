//! Shadow Runner - a side-scrolling evasion arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, session state)
//! - `renderer`: Drawing boundary - the sim hands each frame's state to a
//!   `Renderer` implementation and never draws anything itself
//! - `config`: World dimensions and frame timing

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::WorldConfig;

/// Game tuning constants
///
/// World-shape values (width, height, ground offset, frame duration) live in
/// [`WorldConfig`] so embedders can override them; everything here is fixed
/// balance tuning.
pub mod consts {
    /// Player hitbox (square)
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Horizontal run speed, applied instantly while a direction key is held
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Per-frame horizontal velocity decay after key release
    pub const PLAYER_DAMPING: f32 = 0.8;
    /// Gravitational acceleration per frame
    pub const GRAVITY: f32 = 0.8;
    /// Vertical impulse applied on jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Player spawn x
    pub const PLAYER_SPAWN_X: f32 = 50.0;

    /// Shield buff duration (ms)
    pub const SHIELD_DURATION_MS: f64 = 5000.0;

    /// Enemy hitbox (square)
    pub const ENEMY_SIZE: f32 = 45.0;
    /// Enemy base speed, scaled by difficulty and the pounce oscillation
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    /// Horizontal gap below which the enemy stops closing in
    pub const ENEMY_CHASE_DEADBAND: f32 = 100.0;
    /// Vertical gap below which the enemy keeps its current target row
    pub const ENEMY_TRACK_DEADBAND: f32 = 20.0;
    /// Fraction of the vertical gap closed per frame
    pub const ENEMY_TRACK_EASING: f32 = 0.05;
    /// Enemy spawn offset from the right world edge
    pub const ENEMY_SPAWN_MARGIN: f32 = 50.0;

    /// Obstacle hitbox
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    /// Obstacle leftward speed before the difficulty multiplier
    pub const OBSTACLE_BASE_SPEED: f32 = 5.0;
    /// Vertical band airborne obstacles are confined to
    pub const AIR_BAND_MIN: f32 = 50.0;
    pub const AIR_BAND_MAX: f32 = 300.0;
    /// Airborne spawn height range (min + spread)
    pub const AIR_SPAWN_SPREAD: f32 = 200.0;
    /// Ground obstacles sit this far above the bottom edge
    pub const OBSTACLE_GROUND_CLEARANCE: f32 = 40.0;

    /// Brick (platform) size
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    /// Temporary brick lifetime range (ms)
    pub const TEMP_BRICK_MIN_MS: f64 = 5000.0;
    pub const TEMP_BRICK_MAX_MS: f64 = 10000.0;
    /// Brick spawn height range (min + spread)
    pub const BRICK_SPAWN_Y_MIN: f32 = 100.0;
    pub const BRICK_SPAWN_Y_SPREAD: f32 = 250.0;

    /// Spawn gate intervals (ms)
    pub const BRICK_INTERVAL_MS: f64 = 3000.0;
    pub const POWER_UP_INTERVAL_MS: f64 = 5000.0;
    /// Obstacle gate: max(2000 - difficulty * 200, 800)
    pub const OBSTACLE_INTERVAL_BASE_MS: f64 = 2000.0;
    pub const OBSTACLE_INTERVAL_STEP_MS: f64 = 200.0;
    pub const OBSTACLE_INTERVAL_FLOOR_MS: f64 = 800.0;

    /// Parallax background scroll per frame
    pub const BACKGROUND_SCROLL: f32 = 0.5;
}
