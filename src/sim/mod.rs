//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame motion only (velocities are frame displacements)
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod rect;
pub mod stage;
pub mod state;
pub mod step;

pub use rect::Rect;
pub use stage::{STAGES, StageConfig, StageLayout, build_stage, stage_config, stage_count};
pub use state::{Ball, Block, FrameSnapshot, GameEvent, GameState, Item, ItemKind, Paddle};
pub use step::{Outcome, StepInput, step};
