//! Game state and core simulation types
//!
//! Everything the presenter needs to draw a frame lives here, plus the seeded
//! RNG that makes item drops and ball placement reproducible.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::stage::{self, stage_count};
use crate::consts::*;

/// Per-frame cue for the presenter.
///
/// The simulation never plays sounds or raises alerts itself; it records
/// these and the presenter drains them after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the paddle
    PaddleBounce,
    /// Ball bounced off a side or top wall
    WallBounce,
    /// A block was destroyed
    BlockDestroyed,
    /// A destroyed block dropped an item
    ItemSpawned,
    /// The paddle caught a falling item
    ItemCaught,
    /// A ball fell past the paddle (others remain)
    BallLost,
    /// All blocks destroyed
    StageClear,
    /// Last ball lost
    GameOver,
}

/// Item (power-up) kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemKind {
    /// Spawns one extra ball when caught
    #[default]
    ExtraBall,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Per-frame displacement
    pub vel: Vec2,
    pub radius: f32,
    /// Applied to velocity after every paddle bounce, strictly increasing
    pub speed_multiplier: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
            speed_multiplier: SPEED_MULTIPLIER_BASE,
        }
    }

    /// Current speed magnitude
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle, pinned to the bottom edge of the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle centered at field mid-width
    pub fn centered(field_width: f32) -> Self {
        Self {
            x: (field_width - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Top edge y coordinate
    pub fn top(&self, field_height: f32) -> f32 {
        field_height - self.height
    }

    /// Full paddle rectangle for drawing and item catching
    pub fn rect(&self, field_height: f32) -> Rect {
        Rect::new(self.x, self.top(field_height), self.width, self.height)
    }

    /// Strict horizontal span test (paddle bounce)
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }

    /// Move toward the pointer target, keeping the paddle fully on-field.
    pub fn track_pointer(&mut self, target_x: f32, field_width: f32) {
        let x = target_x - self.width / 2.0;
        self.x = x.clamp(0.0, field_width - self.width);
    }
}

/// A block entity - immutable rect, monotone destroyed flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub destroyed: bool,
}

impl Block {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            destroyed: false,
        }
    }
}

/// A falling item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub radius: f32,
    /// Constant per-frame fall speed
    pub fall_speed: f32,
    pub kind: ItemKind,
}

impl Item {
    /// Item dropped by a destroyed block, anchored at its top-center
    pub fn dropped_from(block_rect: &Rect) -> Self {
        Self {
            pos: block_rect.top_center(),
            radius: ITEM_RADIUS,
            fall_speed: ITEM_FALL_SPEED,
            kind: ItemKind::ExtraBall,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG (item drops, ball placement)
    pub rng: Pcg32,
    /// Current stage index (0-based, wraps past the last configured stage)
    pub stage: u32,
    /// Score, monotone within a stage
    pub score: u64,
    /// Whole seconds since stage start, advanced by an external 1 Hz timer
    pub elapsed_secs: u32,
    /// Simulation frame counter
    pub frame_count: u64,
    /// Active balls (never empty while the game is live)
    pub balls: Vec<Ball>,
    pub paddle: Paddle,
    /// Fixed membership per stage, insertion order = grid scan order
    pub blocks: Vec<Block>,
    /// Insertion order = spawn order
    pub items: Vec<Item>,
    /// Cues recorded during the last step, drained by the presenter
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh game at stage 0 with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);
        let layout = stage::build_stage(0, field, &mut rng);
        Self {
            seed,
            rng,
            stage: 0,
            score: 0,
            elapsed_secs: 0,
            frame_count: 0,
            balls: vec![layout.ball],
            paddle: layout.paddle,
            blocks: layout.blocks,
            items: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Rebuild for the given stage: fresh grid, seed ball, centered paddle,
    /// score and clock reset. Item and event queues are cleared.
    pub fn reset_stage(&mut self, stage: u32) {
        let stage = stage % stage_count();
        let field = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);
        let layout = stage::build_stage(stage, field, &mut self.rng);
        self.stage = stage;
        self.score = 0;
        self.elapsed_secs = 0;
        self.frame_count = 0;
        self.balls = vec![layout.ball];
        self.paddle = layout.paddle;
        self.blocks = layout.blocks;
        self.items.clear();
        self.events.clear();
        log::info!("Stage {} ready ({} blocks)", stage, self.blocks.len());
    }

    /// Advance the whole-seconds clock (called from the host's 1 Hz timer,
    /// decoupled from the frame cadence)
    pub fn tick_second(&mut self) {
        self.elapsed_secs += 1;
    }

    /// True once every block has been destroyed
    pub fn all_blocks_destroyed(&self) -> bool {
        self.blocks.iter().all(|b| b.destroyed)
    }

    /// Time bonus awarded on stage clear
    pub fn clear_bonus(&self) -> u64 {
        CLEAR_BONUS_BASE.saturating_sub(CLEAR_BONUS_DECAY_PER_SEC * self.elapsed_secs as u64)
    }

    /// Spawn one extra ball at the paddle center (caught item effect)
    pub fn spawn_extra_ball(&mut self) {
        let pos = Vec2::new(
            self.paddle.center_x(),
            self.paddle.top(FIELD_HEIGHT) - EXTRA_BALL_LIFT,
        );
        let vel = Vec2::new(EXTRA_BALL_VELOCITY.0, EXTRA_BALL_VELOCITY.1);
        self.balls.push(Ball::new(pos, vel));
    }

    /// Drain the cues recorded by the last step
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Per-frame drawing snapshot: live blocks only
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            balls: &self.balls,
            paddle: self.paddle.rect(FIELD_HEIGHT),
            blocks: self
                .blocks
                .iter()
                .filter(|b| !b.destroyed)
                .map(|b| b.rect)
                .collect(),
            items: &self.items,
            score: self.score,
            stage: self.stage,
            elapsed_secs: self.elapsed_secs,
        }
    }
}

/// Everything the presenter needs to draw one frame
#[derive(Debug, Clone)]
pub struct FrameSnapshot<'a> {
    pub balls: &'a [Ball],
    pub paddle: Rect,
    /// Rects of non-destroyed blocks
    pub blocks: Vec<Rect>,
    pub items: &'a [Item],
    pub score: u64,
    pub stage: u32,
    pub elapsed_secs: u32,
}
