//! Game state and core simulation types
//!
//! Entity physics live on the entity types; frame orchestration lives in
//! [`super::tick`]. Each entity keeps its construction-time anchor separate
//! from mutable position so `reset()` and movement bounds have a fixed
//! reference.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Bounds};
use super::powerup::PowerUp;
use super::tick::TickInput;
use super::timer::{TimerTask, Timers};
use crate::config::WorldConfig;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Entities step every frame
    Running,
    /// Terminal until an explicit restart
    GameOver,
}

/// Signals emitted by a tick for the UI/renderer collaborators.
///
/// Score itself is not an event - it changes every frame and is read from
/// [`GameState::score`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickSpawned { id: u32, kind: BrickKind },
    ObstaclesSpawned { count: u32 },
    PowerUpSpawned,
    BonusBrickHit { id: u32 },
    ShieldGained,
    ShieldExpired,
    BrickExpired { id: u32 },
    PowerUpCollected,
    GameOver { score: u64 },
    Restarted,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub jumping: bool,
    pub on_platform: bool,
    pub has_shield: bool,
    /// Construction-time spawn point; its y is also the ground reference
    anchor: Vec2,
    frame_count: u32,
    run_frame: u32,
}

impl Player {
    pub fn new(config: &WorldConfig) -> Self {
        let anchor = Vec2::new(PLAYER_SPAWN_X, config.ground_anchor());
        Self {
            pos: anchor,
            vel: Vec2::ZERO,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            jumping: false,
            on_platform: false,
            has_shield: false,
            anchor,
            frame_count: 0,
            run_frame: 0,
        }
    }

    /// Ground reference: y never rests below this
    pub fn ground_y(&self) -> f32 {
        self.anchor.y
    }

    /// Current run-cycle frame (cosmetic, for the renderer)
    pub fn run_frame(&self) -> u32 {
        self.run_frame
    }

    /// Integrate one frame of input-driven motion: horizontal momentum,
    /// jump impulse, then gravity (semi-implicit Euler - velocity first).
    /// Platform and ground resolution happen afterwards in the tick.
    pub fn integrate(&mut self, input: &TickInput) {
        self.frame_count += 1;

        // Run animation advances every 5th frame while moving
        if self.vel.x.abs() > 0.1 {
            if self.frame_count % 5 == 0 {
                self.run_frame = (self.run_frame + 1) % 4;
            }
        } else {
            self.run_frame = 0;
        }

        // Horizontal movement with momentum: keys set velocity instantly,
        // release decays it toward (never exactly to) zero
        if input.left {
            self.vel.x = -PLAYER_SPEED;
        } else if input.right {
            self.vel.x = PLAYER_SPEED;
        } else {
            self.vel.x *= PLAYER_DAMPING;
        }
        self.pos.x += self.vel.x;

        // Jump from the ground or a platform
        if input.up && (self.on_platform || !self.jumping) {
            self.vel.y = JUMP_IMPULSE;
            self.jumping = true;
            self.on_platform = false;
        }

        self.vel.y += GRAVITY;
        self.pos.y += self.vel.y;

        // Cleared here, re-set by platform/ground resolution
        self.on_platform = false;
    }

    /// Landing test against a brick, run after the vertical move.
    ///
    /// The bottom-edge comparison uses `brick.y + vel.y`: with `pos.y`
    /// already advanced by `vel.y` this accepts exactly the falls that
    /// started at or above the brick top this frame. Frame-exact landing
    /// behavior depends on this tie-break; do not "simplify" it.
    pub fn is_landing_on(&self, brick: &Brick) -> bool {
        brick.active
            && self.bounds().intersects(&brick.bounds())
            && self.vel.y > 0.0
            && self.pos.y + self.height <= brick.pos.y + self.vel.y
    }

    /// Snap to rest on a surface whose top edge is at `surface_y`
    pub fn land_at(&mut self, surface_y: f32) {
        self.pos.y = surface_y - self.height;
        self.vel.y = 0.0;
        self.jumping = false;
        self.on_platform = true;
    }

    /// Ground snap and horizontal world clamp; runs after platform
    /// resolution so a platform landing can hold the player above ground.
    pub fn resolve_bounds(&mut self, config: &WorldConfig) {
        if self.pos.y > self.anchor.y {
            self.land_at(self.anchor.y + self.height);
        }
        self.pos.x = self.pos.x.clamp(0.0, config.width - self.width);
    }

    /// Restore construction state (restart)
    pub fn reset(&mut self) {
        self.pos = self.anchor;
        self.vel = Vec2::ZERO;
        self.jumping = false;
        self.on_platform = false;
        self.has_shield = false;
        self.frame_count = 0;
        self.run_frame = 0;
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Aabb {
        Aabb::at(self.pos, self.width, self.height)
    }
}

/// The pursuing enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Base speed before pounce and difficulty scaling
    pub speed: f32,
    /// Row the vertical easing approaches
    pub target_y: f32,
    /// Spawn point; its y bounds how high the enemy may climb
    anchor: Vec2,
    frame_count: u32,
}

impl Enemy {
    pub fn new(config: &WorldConfig) -> Self {
        let anchor = Vec2::new(config.width - ENEMY_SPAWN_MARGIN, config.ground_anchor());
        Self {
            pos: anchor,
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            speed: ENEMY_BASE_SPEED,
            target_y: anchor.y,
            anchor,
            frame_count: 0,
        }
    }

    /// Home-row anchor y: the enemy never rises above it
    pub fn home_y(&self) -> f32 {
        self.anchor.y
    }

    /// Cosmetic claw extension for the renderer
    pub fn claw_extension(&self) -> f32 {
        (self.frame_count as f32 * 0.2).sin() * 5.0
    }

    /// Cosmetic eye glow intensity for the renderer
    pub fn eye_glow(&self) -> f32 {
        (self.frame_count as f32 * 0.1).sin() * 0.3 + 0.7
    }

    /// Axial-decoupled pursuit of the player.
    ///
    /// Horizontal motion only engages past a deadband and carries a small
    /// oscillating pounce on top of the difficulty-scaled base speed.
    /// Vertical motion eases toward a target row that retargets only when
    /// the gap exceeds its own (smaller) deadband.
    pub fn update(&mut self, player: &Player, difficulty: f32, config: &WorldConfig) {
        self.frame_count += 1;

        let dx = player.pos.x - self.pos.x;
        let dy = player.pos.y - self.pos.y;

        if dx.abs() > ENEMY_CHASE_DEADBAND {
            let pounce = (self.frame_count as f32 * 0.1).sin() * 2.0;
            self.pos.x += dx.signum() * (self.speed + pounce) * difficulty;
        }

        if dy.abs() > ENEMY_TRACK_DEADBAND {
            self.target_y = player.pos.y;
        }
        self.pos.y += (self.target_y - self.pos.y) * ENEMY_TRACK_EASING;

        // Stay in the world, never above the home row
        self.pos.x = self.pos.x.clamp(0.0, config.width - self.width);
        self.pos.y = self.pos.y.clamp(0.0, self.anchor.y);
    }

    /// Restore spawn state (restart)
    pub fn reset(&mut self) {
        self.pos = self.anchor;
        self.target_y = self.anchor.y;
        self.frame_count = 0;
    }
}

impl Bounds for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::at(self.pos, self.width, self.height)
    }
}

/// Obstacle movement variant, rolled once at spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    /// Oscillates vertically within the air band
    Airborne { drift_rate: f32 },
    /// Rolls along the ground line; angle is cosmetic
    Ground { rotation_rate: f32, angle: f32 },
}

/// A scrolling hazard
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Base speed x difficulty at spawn time; later difficulty changes do
    /// not retroactively affect obstacles already in flight
    pub speed: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Roll a variant and spawn at `x`. Ground obstacles sit on the ground
    /// line; airborne ones pick a height within the band and a drift rate.
    pub fn spawn(rng: &mut Pcg32, x: f32, ground_y: f32, difficulty: f32) -> Self {
        let airborne = rng.random_bool(0.5);
        let (y, kind) = if airborne {
            let y = AIR_BAND_MIN + rng.random::<f32>() * AIR_SPAWN_SPREAD;
            let drift_rate = rng.random::<f32>() * 2.0 - 1.0;
            (y, ObstacleKind::Airborne { drift_rate })
        } else {
            let rotation_rate = (rng.random::<f32>() * 2.0 - 1.0) * 0.1;
            (
                ground_y,
                ObstacleKind::Ground {
                    rotation_rate,
                    angle: 0.0,
                },
            )
        };
        Self {
            pos: Vec2::new(x, y),
            width: OBSTACLE_WIDTH,
            height: OBSTACLE_HEIGHT,
            speed: OBSTACLE_BASE_SPEED * difficulty,
            kind,
        }
    }

    /// One frame of leftward motion plus variant-specific animation
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
        match &mut self.kind {
            ObstacleKind::Airborne { drift_rate } => {
                self.pos.y += (self.pos.x * 0.02).sin() * *drift_rate;
                self.pos.y = self.pos.y.clamp(AIR_BAND_MIN, AIR_BAND_MAX);
            }
            ObstacleKind::Ground {
                rotation_rate,
                angle,
            } => {
                *angle += *rotation_rate;
            }
        }
    }

    /// Fully past the left world edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.width < 0.0
    }
}

impl Bounds for Obstacle {
    fn bounds(&self) -> Aabb {
        Aabb::at(self.pos, self.width, self.height)
    }
}

/// Brick (platform) variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickKind {
    /// Permanent
    Normal,
    /// Deactivates after a randomized lifetime
    Temporary,
    /// Grants the shield once when landed on
    Bonus,
}

/// A landable platform
#[derive(Debug, Clone)]
pub struct Brick {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: BrickKind,
    /// Only active bricks are valid landing surfaces
    pub active: bool,
    /// Bonus bricks grant their shield at most once
    pub hit: bool,
    bounce_offset: f32,
    bounce_vel: f32,
    bouncing: bool,
}

impl Brick {
    pub fn new(id: u32, x: f32, y: f32, kind: BrickKind) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            kind,
            active: true,
            hit: false,
            bounce_offset: 0.0,
            bounce_vel: 0.0,
            bouncing: false,
        }
    }

    /// Cosmetic bounce offset for the renderer (<= 0 while animating)
    pub fn bounce_offset(&self) -> f32 {
        self.bounce_offset
    }

    /// Kick off the bounce animation; no-op while one is running
    pub fn bounce(&mut self) {
        if !self.bouncing {
            self.bouncing = true;
            self.bounce_vel = -5.0;
        }
    }

    /// Advance the bounce animation one frame
    pub fn update(&mut self) {
        if self.bouncing {
            self.bounce_vel += 0.5;
            self.bounce_offset += self.bounce_vel;
            if self.bounce_offset > 0.0 {
                self.bounce_offset = 0.0;
                self.bounce_vel = 0.0;
                self.bouncing = false;
            }
        }
    }
}

impl Bounds for Brick {
    fn bounds(&self) -> Aabb {
        Aabb::at(self.pos, self.width, self.height)
    }
}

/// Complete session state
///
/// Exclusively owns every entity collection; mutated only from its own tick.
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: WorldConfig,
    pub phase: GamePhase,
    /// Monotonic per-frame counter while running
    pub score: u64,
    /// Score-derived speed multiplier: 1 + floor(score/500) * 0.2
    pub difficulty: f32,
    /// Score-derived obstacle burst size: min(3, 1 + floor(score/1000))
    pub simultaneous_obstacles: u32,
    /// Session clock (ms), advanced by one frame duration per tick
    pub clock_ms: f64,
    /// Parallax scroll offset handed to the renderer
    pub background_offset: f32,
    pub player: Player,
    pub enemy: Enemy,
    pub bricks: Vec<Brick>,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<Box<dyn PowerUp>>,
    pub timers: Timers,
    pub(crate) rng: Pcg32,
    pub(crate) last_brick_ms: f64,
    pub(crate) last_obstacle_ms: f64,
    pub(crate) last_power_up_ms: f64,
    next_brick_id: u32,
}

impl GameState {
    /// Create a fresh session with the given seed
    pub fn new(seed: u64, config: WorldConfig) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Running,
            score: 0,
            difficulty: 1.0,
            simultaneous_obstacles: 1,
            clock_ms: 0.0,
            background_offset: 0.0,
            player: Player::new(&config),
            enemy: Enemy::new(&config),
            bricks: Vec::new(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            timers: Timers::new(),
            rng: Pcg32::seed_from_u64(seed),
            // Negative infinity makes every gate fire on the first frame,
            // matching the original pacing of a fresh session
            last_brick_ms: f64::NEG_INFINITY,
            last_obstacle_ms: f64::NEG_INFINITY,
            last_power_up_ms: f64::NEG_INFINITY,
            next_brick_id: 1,
            config,
        };
        state.initialize_bricks();
        state
    }

    /// Starter platform layout, rebuilt on every restart
    fn initialize_bricks(&mut self) {
        self.add_brick(200.0, 250.0, BrickKind::Normal);
        self.add_brick(300.0, 200.0, BrickKind::Bonus);
        self.add_brick(400.0, 300.0, BrickKind::Temporary);
    }

    /// Add a brick, scheduling its expiry if temporary
    pub fn add_brick(&mut self, x: f32, y: f32, kind: BrickKind) -> u32 {
        let id = self.next_brick_id;
        self.next_brick_id += 1;
        self.bricks.push(Brick::new(id, x, y, kind));
        if kind == BrickKind::Temporary {
            let lifetime = self
                .rng
                .random_range(TEMP_BRICK_MIN_MS..TEMP_BRICK_MAX_MS);
            self.timers
                .schedule(self.clock_ms + lifetime, TimerTask::ExpireBrick(id));
        }
        id
    }

    /// Explicitly tear down a brick: cancel its pending expiry and
    /// deactivate. Safe to call twice - both halves are idempotent.
    pub fn destroy_brick(&mut self, id: u32) {
        self.timers.cancel_brick(id);
        if let Some(brick) = self.bricks.iter_mut().find(|b| b.id == id) {
            brick.active = false;
        }
    }

    /// Mark the shield buff active and arm its one-shot expiry. If an
    /// expiry is already pending the earlier deadline stands, so stacked
    /// grants end at the first deadline.
    pub(crate) fn grant_shield(&mut self) {
        self.player.has_shield = true;
        if !self.timers.shield_pending() {
            self.timers
                .schedule(self.clock_ms + SHIELD_DURATION_MS, TimerTask::ExpireShield);
        }
    }

    /// Reset everything for a new run: cancel all pending timers first so
    /// no effect from the previous session fires against fresh state.
    pub fn restart(&mut self) {
        self.timers.cancel_all();
        self.phase = GamePhase::Running;
        self.score = 0;
        self.difficulty = 1.0;
        self.simultaneous_obstacles = 1;
        self.clock_ms = 0.0;
        self.background_offset = 0.0;
        self.last_brick_ms = f64::NEG_INFINITY;
        self.last_obstacle_ms = f64::NEG_INFINITY;
        self.last_power_up_ms = f64::NEG_INFINITY;
        self.obstacles.clear();
        self.power_ups.clear();
        self.bricks.clear();
        self.player.reset();
        self.enemy.reset();
        self.initialize_bricks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> GameState {
        GameState::new(42, WorldConfig::default())
    }

    #[test]
    fn test_player_reset_restores_spawn_state() {
        let config = WorldConfig::default();
        let mut player = Player::new(&config);
        let spawn = player.pos;
        player.pos = Vec2::new(300.0, 100.0);
        player.vel = Vec2::new(5.0, -3.0);
        player.jumping = true;
        player.has_shield = true;
        player.reset();
        assert_eq!(player.pos, spawn);
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(!player.jumping);
        assert!(!player.has_shield);
    }

    #[test]
    fn test_enemy_never_climbs_above_home_row() {
        let config = WorldConfig::default();
        let mut enemy = Enemy::new(&config);
        let mut player = Player::new(&config);
        // Player high in the air: enemy retargets but must stay at or
        // below its home row
        player.pos = Vec2::new(enemy.pos.x, 0.0);
        for _ in 0..1000 {
            enemy.update(&player, 2.0, &config);
            assert!(enemy.pos.y <= enemy.home_y());
            assert!(enemy.pos.y >= 0.0);
        }
    }

    #[test]
    fn test_enemy_horizontal_deadband() {
        let config = WorldConfig::default();
        let mut enemy = Enemy::new(&config);
        let mut player = Player::new(&config);
        // Within the deadband: no horizontal motion
        player.pos.x = enemy.pos.x - 50.0;
        let x = enemy.pos.x;
        enemy.update(&player, 1.0, &config);
        assert_eq!(enemy.pos.x, x);
        // Beyond it: the enemy closes in
        player.pos.x = enemy.pos.x - 300.0;
        enemy.update(&player, 1.0, &config);
        assert!(enemy.pos.x < x);
    }

    #[test]
    fn test_obstacle_speed_fixed_at_spawn() {
        let mut rng = Pcg32::seed_from_u64(7);
        let obstacle = Obstacle::spawn(&mut rng, 800.0, 360.0, 1.4);
        assert!((obstacle.speed - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_airborne_obstacle_stays_in_band() {
        let mut rng = Pcg32::seed_from_u64(3);
        // Roll until we get an airborne one
        let mut obstacle = Obstacle::spawn(&mut rng, 800.0, 360.0, 1.0);
        while !matches!(obstacle.kind, ObstacleKind::Airborne { .. }) {
            obstacle = Obstacle::spawn(&mut rng, 800.0, 360.0, 1.0);
        }
        while !obstacle.is_off_screen() {
            obstacle.advance();
            assert!(obstacle.pos.y >= AIR_BAND_MIN && obstacle.pos.y <= AIR_BAND_MAX);
        }
    }

    #[test]
    fn test_brick_bounce_cycle_settles() {
        let mut brick = Brick::new(1, 0.0, 0.0, BrickKind::Bonus);
        brick.bounce();
        let mut saw_offset = false;
        for _ in 0..100 {
            brick.update();
            if brick.bounce_offset() < 0.0 {
                saw_offset = true;
            }
        }
        assert!(saw_offset);
        assert_eq!(brick.bounce_offset(), 0.0);
    }

    #[test]
    fn test_temporary_brick_schedules_expiry() {
        let mut state = test_state();
        let before = state.timers.is_empty();
        assert!(!before); // starter layout includes a temporary brick
        let id = state.add_brick(500.0, 200.0, BrickKind::Temporary);
        state.destroy_brick(id);
        state.destroy_brick(id); // idempotent
        assert!(!state.bricks.iter().any(|b| b.id == id && b.active));
    }

    #[test]
    fn test_restart_clears_session() {
        let mut state = test_state();
        state.score = 1234;
        state.difficulty = 1.4;
        state.phase = GamePhase::GameOver;
        state.grant_shield();
        state.restart();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.difficulty, 1.0);
        assert_eq!(state.simultaneous_obstacles, 1);
        assert!(state.obstacles.is_empty());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.bricks.len(), 3);
        // Only the fresh temporary starter brick may hold a timer; the
        // pre-restart shield timer must be gone
        assert!(!state.timers.shield_pending());
    }
}
