//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Per frame,
//! in fixed order: session counters, due timers, player (with platform and
//! ground resolution), enemy, bricks, spawner gates, obstacles, power-ups,
//! then the collision resolver.

use rand::Rng;

use super::collision::Bounds;
use super::powerup::ShieldOrb;
use super::state::{BrickKind, GameEvent, GamePhase, GameState, Obstacle};
use super::timer::TimerTask;
use crate::consts::*;

/// Key-state snapshot for a single tick. The simulation does not care how
/// input is captured, only that held/released states are available
/// synchronously each frame.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    /// Tracked for a complete snapshot; no current move consumes it
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Re-enter a running session from game over
    pub restart: bool,
}

/// Advance the session by one frame, returning the signals it emitted
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Game over is terminal except for an explicit restart; no entity
    // stepping happens there
    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
            log::info!("session restarted");
            events.push(GameEvent::Restarted);
        }
        return events;
    }

    state.clock_ms += state.config.frame_ms;
    state.score += 1;
    state.difficulty = 1.0 + (state.score / 500) as f32 * 0.2;
    state.simultaneous_obstacles = ((1 + state.score / 1000) as u32).min(3);
    state.background_offset =
        (state.background_offset + BACKGROUND_SCROLL) % state.config.width;

    fire_due_timers(state, &mut events);

    // Player: input-driven integration, then platform landings, then
    // ground snap and world clamp
    state.player.integrate(input);
    resolve_platforms(state, &mut events);
    state.player.resolve_bounds(&state.config);

    state
        .enemy
        .update(&state.player, state.difficulty, &state.config);

    for brick in &mut state.bricks {
        brick.update();
    }
    state.bricks.retain(|b| b.active);

    spawn_bricks(state, &mut events);
    spawn_obstacles(state, &mut events);
    spawn_power_ups(state, &mut events);

    for obstacle in &mut state.obstacles {
        obstacle.advance();
    }
    state.obstacles.retain(|o| !o.is_off_screen());

    for power_up in &mut state.power_ups {
        power_up.update();
    }
    state
        .power_ups
        .retain(|p| !p.is_collected() && !p.is_off_screen(&state.config));

    resolve_collisions(state, &mut events);

    events
}

/// Apply due one-shot timers. Each effect checks its target is still live:
/// a timer can outlast the brick it points at.
fn fire_due_timers(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for task in state.timers.fire_due(state.clock_ms) {
        match task {
            TimerTask::ExpireBrick(id) => {
                if let Some(brick) = state.bricks.iter_mut().find(|b| b.id == id) {
                    if brick.active {
                        brick.active = false;
                        events.push(GameEvent::BrickExpired { id });
                    }
                }
            }
            TimerTask::ExpireShield => {
                if state.player.has_shield {
                    state.player.has_shield = false;
                    events.push(GameEvent::ShieldExpired);
                }
            }
        }
    }
}

/// Landing resolution against every active brick. A landing on an unhit
/// bonus brick marks it, bounces it, and grants the shield exactly once
/// per brick.
fn resolve_platforms(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut bonus_hits: Vec<u32> = Vec::new();
    let player = &mut state.player;
    for brick in &mut state.bricks {
        if player.is_landing_on(brick) {
            player.land_at(brick.pos.y);
            if brick.kind == BrickKind::Bonus && !brick.hit {
                brick.hit = true;
                brick.bounce();
                bonus_hits.push(brick.id);
            }
        }
    }
    for id in bonus_hits {
        state.grant_shield();
        events.push(GameEvent::BonusBrickHit { id });
        events.push(GameEvent::ShieldGained);
    }
}

/// Brick gate: fixed interval, randomized height, weighted variant roll
/// (nested thresholds: bonus, then temporary, then normal)
fn spawn_bricks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.clock_ms - state.last_brick_ms <= BRICK_INTERVAL_MS {
        return;
    }
    let y = BRICK_SPAWN_Y_MIN + state.rng.random::<f32>() * BRICK_SPAWN_Y_SPREAD;
    let kind = if state.rng.random::<f32>() < 0.3 {
        BrickKind::Bonus
    } else if state.rng.random::<f32>() < 0.6 {
        BrickKind::Temporary
    } else {
        BrickKind::Normal
    };
    let id = state.add_brick(state.config.width, y, kind);
    state.last_brick_ms = state.clock_ms;
    log::debug!("spawned {kind:?} brick {id} at y={y:.0}");
    events.push(GameEvent::BrickSpawned { id, kind });
}

/// Obstacle gate: interval shrinks with difficulty down to a floor; each
/// trigger spawns a burst staggered past the right edge, all sharing the
/// current difficulty.
fn spawn_obstacles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let interval = (OBSTACLE_INTERVAL_BASE_MS
        - state.difficulty as f64 * OBSTACLE_INTERVAL_STEP_MS)
        .max(OBSTACLE_INTERVAL_FLOOR_MS);
    if state.clock_ms - state.last_obstacle_ms <= interval {
        return;
    }
    let count = state.simultaneous_obstacles;
    let ground_y = state.config.height - OBSTACLE_GROUND_CLEARANCE;
    for i in 0..count {
        let offset = i as f32 * (state.config.width / count as f32 / 2.0);
        let obstacle = Obstacle::spawn(
            &mut state.rng,
            state.config.width + offset,
            ground_y,
            state.difficulty,
        );
        state.obstacles.push(obstacle);
    }
    state.last_obstacle_ms = state.clock_ms;
    log::debug!(
        "spawned {count} obstacle(s) at difficulty {:.1}",
        state.difficulty
    );
    events.push(GameEvent::ObstaclesSpawned { count });
}

/// Power-up gate: fixed interval, one orb at a randomized safe height
fn spawn_power_ups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.clock_ms - state.last_power_up_ms <= POWER_UP_INTERVAL_MS {
        return;
    }
    let y = 50.0 + state.rng.random::<f32>() * (state.config.height - 150.0);
    state
        .power_ups
        .push(Box::new(ShieldOrb::new(state.config.width, y)));
    state.last_power_up_ms = state.clock_ms;
    events.push(GameEvent::PowerUpSpawned);
}

/// Cross-entity collision effects. The shield suppresses only the fatal
/// checks; power-up pickup happens regardless.
fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.player.has_shield {
        let player_box = state.player.bounds();
        let fatal = player_box.intersects(&state.enemy.bounds())
            || state
                .obstacles
                .iter()
                .any(|o| player_box.intersects(&o.bounds()));
        if fatal {
            state.phase = GamePhase::GameOver;
            // Teardown: nothing steps after this, so no pending expiry may
            // fire against the ended session
            state.timers.cancel_all();
            log::info!("game over at score {}", state.score);
            events.push(GameEvent::GameOver { score: state.score });
        }
    }

    let had_shield = state.player.has_shield;
    let player = &mut state.player;
    for power_up in state.power_ups.iter_mut() {
        if !power_up.is_collected() && player.bounds().intersects(&power_up.bounds()) {
            power_up.collect(player);
            events.push(GameEvent::PowerUpCollected);
        }
    }

    // A pickup-granted shield arms its expiry here; bonus bricks arm
    // theirs at landing time
    if state.phase == GamePhase::Running
        && state.player.has_shield
        && !state.timers.shield_pending()
    {
        state.grant_shield();
        if !had_shield {
            events.push(GameEvent::ShieldGained);
        }
    }
}
