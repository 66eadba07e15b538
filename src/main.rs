//! Block Breaker entry point
//!
//! Headless demo driver: an autoplay session that tracks the most dangerous
//! ball with the paddle and logs outcomes. Useful for profiling the
//! simulation and for watching the scoring behave without a renderer.

use block_breaker::GameSession;
use block_breaker::persistence::JsonFileStore;
use block_breaker::sim::Outcome;

/// Nominal display cadence the whole-seconds clock is derived from
const FRAMES_PER_SECOND: u64 = 60;
/// Safety cap so an unlucky autoplay run always terminates
const MAX_FRAMES: u64 = 500_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| block_breaker::persistence::now_ms() as u64);
    log::info!("Block Breaker (headless) starting, seed {seed}");

    let store = JsonFileStore::new("scores.jsonl");
    let mut session = GameSession::new(seed, store);
    session.start();

    let mut frames: u64 = 0;
    let mut stages_cleared = 0u32;

    while session.is_running() && frames < MAX_FRAMES {
        // Autopilot: keep the paddle under the ball closest to the bottom
        let pointer_x = session
            .state()
            .balls
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|b| b.pos.x);

        match session.frame(pointer_x, 1.0) {
            Outcome::StageClear { final_score, .. } => {
                stages_cleared += 1;
                log::info!("Cleared stage {stages_cleared}, score {final_score}");
                if stages_cleared >= 3 {
                    break;
                }
            }
            Outcome::BallLost => log::info!("Lost a ball at frame {frames}"),
            Outcome::GameOver { final_score } => {
                log::info!("Run ended at frame {frames}, final score {final_score}");
            }
            Outcome::Continue => {}
        }

        frames += 1;
        if frames.is_multiple_of(FRAMES_PER_SECOND) {
            session.tick_second();
        }
    }

    let snapshot = session.snapshot();
    println!(
        "frames: {frames}, stages cleared: {stages_cleared}, blocks left: {}, balls: {}",
        snapshot.blocks.len(),
        snapshot.balls.len()
    );
}
