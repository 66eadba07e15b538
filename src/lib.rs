//! Block Breaker - a paddle-and-ball arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `session`: Frame loop driver and outcome handling
//! - `persistence`: Fire-and-forget score reporting
//! - `highscores`: Local top-10 leaderboard
//! - `settings`: Player preferences

pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use session::GameSession;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (origin top-left, +y down)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults - velocities are per-frame displacements
    pub const BALL_RADIUS: f32 = 10.0;
    /// Extra balls from caught items launch with this velocity
    pub const EXTRA_BALL_VELOCITY: (f32, f32) = (2.0, -2.0);
    /// Extra balls spawn this far above the paddle top
    pub const EXTRA_BALL_LIFT: f32 = 10.0;

    /// Per-bounce speed escalation: the multiplier starts at the base and
    /// grows by the increment on every paddle bounce, without bound
    pub const SPEED_MULTIPLIER_BASE: f32 = 0.7;
    pub const SPEED_MULTIPLIER_INCREMENT: f32 = 0.04;

    /// Paddle defaults - pinned to the bottom edge of the field
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Maximum deflection angle off the paddle edge (radians)
    pub const PADDLE_MAX_REFLECTION: f32 = std::f32::consts::FRAC_PI_4;

    /// Block grid layout
    pub const BLOCK_COLUMNS: u32 = 8;
    pub const BLOCK_ROWS: u32 = 6;
    pub const BLOCK_WIDTH: f32 = 75.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const BLOCK_PADDING: f32 = 15.0;
    pub const BLOCK_OFFSET_TOP: f32 = 30.0;
    pub const BLOCK_OFFSET_LEFT: f32 = 30.0;

    /// Scoring
    pub const BLOCK_SCORE: u64 = 10;
    /// Stage clear bonus: max(base - decay * elapsed_secs, 0)
    pub const CLEAR_BONUS_BASE: u64 = 10_000;
    pub const CLEAR_BONUS_DECAY_PER_SEC: u64 = 100;

    /// Item defaults
    pub const ITEM_RADIUS: f32 = 5.0;
    pub const ITEM_FALL_SPEED: f32 = 2.0;
    /// Chance that a destroyed block drops an item
    pub const ITEM_DROP_CHANCE: f32 = 0.3;
}
