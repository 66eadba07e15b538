//! Stage construction
//!
//! Builds the block grid and places the seed ball and paddle for a stage.
//! Pure apart from the injected RNG draw for the ball position.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::{Ball, Block, Paddle};
use crate::consts::*;

/// Per-stage tuning. Stages share the grid layout; speed and backdrop can
/// diverge per stage.
#[derive(Debug, Clone, Copy)]
pub struct StageConfig {
    /// Seed ball speed (per-frame units, applied to both axes)
    pub ball_speed: f32,
    /// Background asset path (loaded by the presenter; missing assets
    /// degrade to no backdrop, never block the frame loop)
    pub background: &'static str,
}

/// The configured stage cycle. Clearing the last stage wraps to the first.
pub const STAGES: [StageConfig; 3] = [
    StageConfig {
        ball_speed: 3.0,
        background: "assets/bgStage1.png",
    },
    StageConfig {
        ball_speed: 3.0,
        background: "assets/bgStage2.png",
    },
    StageConfig {
        ball_speed: 3.0,
        background: "assets/bgStage3.png",
    },
];

/// Number of configured stages
pub fn stage_count() -> u32 {
    STAGES.len() as u32
}

/// Config for a stage index (wrapping)
pub fn stage_config(stage: u32) -> &'static StageConfig {
    &STAGES[(stage % stage_count()) as usize]
}

/// Initial placement for one stage
#[derive(Debug, Clone)]
pub struct StageLayout {
    pub blocks: Vec<Block>,
    pub ball: Ball,
    pub paddle: Paddle,
}

/// Build the initial layout for a stage.
///
/// Blocks scan column-major: all rows of column 0, then column 1, and so on.
/// The seed ball lands at a uniformly random spot inset from the field edges
/// so it never starts overlapping a boundary.
pub fn build_stage(stage: u32, field: Vec2, rng: &mut Pcg32) -> StageLayout {
    let mut blocks =
        Vec::with_capacity((BLOCK_COLUMNS * BLOCK_ROWS) as usize);
    for c in 0..BLOCK_COLUMNS {
        for r in 0..BLOCK_ROWS {
            let x = c as f32 * (BLOCK_WIDTH + BLOCK_PADDING) + BLOCK_OFFSET_LEFT;
            let y = r as f32 * (BLOCK_HEIGHT + BLOCK_PADDING) + BLOCK_OFFSET_TOP;
            blocks.push(Block::new(Rect::new(x, y, BLOCK_WIDTH, BLOCK_HEIGHT)));
        }
    }

    let speed = stage_config(stage).ball_speed;
    let pos = Vec2::new(
        rng.random::<f32>() * (field.x - 3.0 * BALL_RADIUS) + BALL_RADIUS,
        rng.random::<f32>() * (field.y - 3.0 * BALL_RADIUS) + BALL_RADIUS,
    );
    let ball = Ball::new(pos, Vec2::new(speed, -speed));

    StageLayout {
        blocks,
        ball,
        paddle: Paddle::centered(field.x),
    }
}
