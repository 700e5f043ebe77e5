//! Power-up contract and the shipped shield orb
//!
//! The simulation does not own power-up internals; it depends only on this
//! trait. Implementations step themselves, report collected/off-screen so
//! the session can cull them, and apply an opaque effect to the player on
//! collect. Drawing stays with the renderer, which consumes the bounds.

use glam::Vec2;

use super::collision::{Aabb, Bounds};
use super::state::Player;
use crate::config::WorldConfig;

/// Contract between the session and a power-up
pub trait PowerUp: Bounds {
    /// Advance one frame of self-contained motion
    fn update(&mut self);
    /// Whether the player already picked this up
    fn is_collected(&self) -> bool;
    /// Fully past the left world edge
    fn is_off_screen(&self, config: &WorldConfig) -> bool;
    /// Apply the effect to the player and mark collected
    fn collect(&mut self, player: &mut Player);
}

/// Shield power-up: drifts left with a gentle bob and grants the player the
/// same timed shield a bonus brick does.
#[derive(Debug, Clone)]
pub struct ShieldOrb {
    pos: Vec2,
    size: f32,
    collected: bool,
    phase: f32,
}

/// Leftward drift per frame
const DRIFT_SPEED: f32 = 3.0;

impl ShieldOrb {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: 25.0,
            collected: false,
            phase: 0.0,
        }
    }
}

impl Bounds for ShieldOrb {
    fn bounds(&self) -> Aabb {
        Aabb::at(self.pos, self.size, self.size)
    }
}

impl PowerUp for ShieldOrb {
    fn update(&mut self) {
        self.pos.x -= DRIFT_SPEED;
        self.phase += 0.1;
        self.pos.y += self.phase.sin() * 0.5;
    }

    fn is_collected(&self) -> bool {
        self.collected
    }

    fn is_off_screen(&self, _config: &WorldConfig) -> bool {
        self.pos.x + self.size < 0.0
    }

    fn collect(&mut self, player: &mut Player) {
        self.collected = true;
        player.has_shield = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orb_drifts_left_until_off_screen() {
        let config = WorldConfig::default();
        let mut orb = ShieldOrb::new(100.0, 200.0);
        assert!(!orb.is_off_screen(&config));
        for _ in 0..100 {
            orb.update();
        }
        assert!(orb.is_off_screen(&config));
    }

    #[test]
    fn test_collect_grants_shield_once() {
        let config = WorldConfig::default();
        let mut orb = ShieldOrb::new(100.0, 200.0);
        let mut player = Player::new(&config);
        assert!(!orb.is_collected());
        orb.collect(&mut player);
        assert!(orb.is_collected());
        assert!(player.has_shield);
    }
}
