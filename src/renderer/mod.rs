//! Rendering boundary
//!
//! The simulation never draws. Once per frame it packages entity state, the
//! parallax scroll offset, and the tick's events into a [`FrameView`] and
//! hands it to whatever [`Renderer`] the embedder supplies. Nothing flows
//! back into the simulation.

use crate::sim::powerup::PowerUp;
use crate::sim::state::{Brick, Enemy, GameEvent, GamePhase, GameState, Obstacle, Player};

/// Borrowed snapshot of one frame, everything a drawing layer needs
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub score: u64,
    /// Parallax background scroll offset
    pub background_offset: f32,
    pub player: &'a Player,
    pub enemy: &'a Enemy,
    pub bricks: &'a [Brick],
    pub obstacles: &'a [Obstacle],
    pub power_ups: &'a [Box<dyn PowerUp>],
    /// Signals emitted by the tick that produced this frame
    pub events: &'a [GameEvent],
}

/// Consumes frame state for display; supplied by the embedder
pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>);
}

/// Renderer that draws nothing, for headless runs and tests
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &FrameView<'_>) {}
}

impl GameState {
    /// Package the current state and this tick's events for a renderer
    pub fn frame_view<'a>(&'a self, events: &'a [GameEvent]) -> FrameView<'a> {
        FrameView {
            phase: self.phase,
            score: self.score,
            background_offset: self.background_offset,
            player: &self.player,
            enemy: &self.enemy,
            bricks: &self.bricks,
            obstacles: &self.obstacles,
            power_ups: &self.power_ups,
            events,
        }
    }
}
