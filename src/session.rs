//! Game session: drives the simulation and reacts to frame outcomes
//!
//! The host calls [`GameSession::frame`] once per animation frame and
//! [`GameSession::tick_second`] from an independent 1 Hz timer. Stage
//! transitions, resets and score reporting all happen here, never inside
//! the simulation step itself.

use crate::highscores::HighScores;
use crate::persistence::{ScoreReport, ScoreStore, now_ms};
use crate::sim::{FrameSnapshot, GameState, Outcome, StepInput, stage_count, step};

/// Owns the game state and the stage cycle for one player session
pub struct GameSession<S: ScoreStore> {
    state: GameState,
    store: S,
    highscores: HighScores,
    /// Latch preventing the frame loop from being armed twice
    started: bool,
    running: bool,
}

impl<S: ScoreStore> GameSession<S> {
    pub fn new(seed: u64, store: S) -> Self {
        Self {
            state: GameState::new(seed),
            store,
            highscores: HighScores::new(),
            started: false,
            running: false,
        }
    }

    /// Arm the frame loop. A second call while armed is a no-op.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.running = true;
        log::info!("Game started (seed {})", self.state.seed);
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    /// Drawing snapshot for the presenter
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        self.state.snapshot()
    }

    /// Advance one frame and handle the outcome.
    ///
    /// Does nothing until [`start`](Self::start) has armed the loop.
    pub fn frame(&mut self, pointer_x: Option<f32>, dt: f32) -> Outcome {
        if !self.running {
            return Outcome::Continue;
        }

        let input = StepInput { pointer_x };
        let outcome = step(&mut self.state, &input, dt);

        match outcome {
            Outcome::StageClear {
                elapsed_secs,
                final_score,
            } => {
                log::info!(
                    "Stage {} clear in {}s, final score {}",
                    self.state.stage,
                    elapsed_secs,
                    final_score
                );
                self.highscores
                    .add_score(final_score, self.state.stage, now_ms());
                let next = (self.state.stage + 1) % stage_count();
                self.state.reset_stage(next);
            }
            Outcome::GameOver { final_score } => {
                log::info!("Game over, final score {}", final_score);
                let report = ScoreReport::now(final_score);
                if let Err(e) = self.store.submit(&report) {
                    // Persistence failures never reach the player
                    log::warn!("Score report failed: {e}");
                }
                self.highscores
                    .add_score(final_score, self.state.stage, report.timestamp_ms);
                self.running = false;
                self.started = false;
                self.state.reset_stage(0);
            }
            Outcome::BallLost | Outcome::Continue => {}
        }

        outcome
    }

    /// Advance the whole-seconds clock (decoupled from the frame cadence)
    pub fn tick_second(&mut self) {
        if self.running {
            self.state.tick_second();
        }
    }
}
