//! Headless demo: plays random hard drops through the async driver until the
//! stack tops out, then prints the final stats.
//!
//! Board size, seed and logging come from the `BLOCKFALL_*` environment
//! variables.

use anyhow::Result;
use blockfall::driver::EngineDriver;
use blockfall::engine::{EngineConfig, GameController};
use blockfall::types::{EventType, InputEvent};
use rand::Rng;

/// Safety stop for configurations that never top out
const MAX_PIECES: usize = 10_000;

#[tokio::main]
async fn main() -> Result<()> {
    let config = EngineConfig::try_from_env()?;
    let log = config.log_events;
    let controller = GameController::from_config(config)?;
    let handle = EngineDriver::spawn(controller);
    let mut rng = rand::rng();

    let mut pieces = 0;
    while pieces < MAX_PIECES {
        for _ in 0..rng.random_range(0..4) {
            handle.send(InputEvent::user(EventType::Rotate)).await?;
        }
        let shift = if rng.random_bool(0.5) {
            EventType::MoveLeft
        } else {
            EventType::MoveRight
        };
        for _ in 0..rng.random_range(0..6) {
            handle.send(InputEvent::user(shift)).await?;
        }

        let response = handle.send(InputEvent::user(EventType::HardDrop)).await?;
        pieces += 1;
        if let Some(level) = response.level_up {
            if log {
                println!("[Demo] Level {} after {} pieces", level, pieces);
            }
        }
        if response.game_over {
            break;
        }
    }

    let stats = handle.stats().await?;
    handle.shutdown().await?;
    println!(
        "pieces={} score={} level={} lines={}",
        pieces, stats.score, stats.level, stats.total_lines_cleared
    );
    Ok(())
}
