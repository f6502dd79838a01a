//! Async driver - one task owns the controller, everyone else sends events
//!
//! The controller is synchronous and must see events one at a time. The
//! driver moves it into a tokio task fed by a bounded `mpsc` channel, so an
//! auto-fall timer and an input reader can both hold an [`EngineHandle`] and
//! never race on the board. Each request carries a `oneshot` sender for its
//! reply.
//!
//! ```
//! use blockfall_driver::EngineDriver;
//! use blockfall_engine::GameController;
//! use blockfall_types::{EventType, InputEvent};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let handle = EngineDriver::spawn(GameController::with_seed(1).unwrap());
//! let response = handle.send(InputEvent::user(EventType::MoveLeft)).await.unwrap();
//! assert_eq!(response.view.x, 3);
//! handle.shutdown().await.unwrap();
//! # });
//! ```

use blockfall_core::{GameStats, Grid};
use blockfall_engine::{GameController, Response};
use blockfall_types::InputEvent;
use rand::Rng;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// Requests that may queue up before senders wait
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("engine loop is not running")]
    Closed,
}

enum Command {
    Event {
        event: InputEvent,
        reply: oneshot::Sender<Response>,
    },
    Grid {
        reply: oneshot::Sender<Grid>,
    },
    Stats {
        reply: oneshot::Sender<GameStats>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Cloneable sender side of a running engine loop
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Command>,
}

pub struct EngineDriver;

impl EngineDriver {
    /// Move `controller` into a new task on the current runtime
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<R>(controller: GameController<R>) -> EngineHandle
    where
        R: Rng + Send + 'static,
    {
        Self::spawn_with_capacity(controller, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn spawn_with_capacity<R>(controller: GameController<R>, capacity: usize) -> EngineHandle
    where
        R: Rng + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        tokio::spawn(run_loop(controller, rx));
        EngineHandle { tx }
    }
}

async fn run_loop<R: Rng>(mut controller: GameController<R>, mut rx: mpsc::Receiver<Command>) {
    let log = controller.config().log_events;
    if log {
        println!("[Driver] Engine loop started");
    }

    while let Some(command) = rx.recv().await {
        match command {
            Command::Event { event, reply } => {
                let response = controller.handle(event);
                if reply.send(response).is_err() && log {
                    eprintln!("[Driver] Caller dropped before {:?} was answered", event.kind);
                }
            }
            Command::Grid { reply } => {
                let _ = reply.send(controller.board().grid_snapshot());
            }
            Command::Stats { reply } => {
                let _ = reply.send(controller.stats());
            }
            Command::Shutdown { reply } => {
                if log {
                    println!("[Driver] Shutdown requested");
                }
                let _ = reply.send(());
                break;
            }
        }
    }

    if log {
        println!("[Driver] Engine loop stopped");
    }
}

impl EngineHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, DriverError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| DriverError::Closed)?;
        rx.await.map_err(|_| DriverError::Closed)
    }

    /// Queue one event and wait for the controller's response
    pub async fn send(&self, event: InputEvent) -> Result<Response, DriverError> {
        self.request(|reply| Command::Event { event, reply }).await
    }

    /// Copy of the settled grid
    pub async fn grid(&self) -> Result<Grid, DriverError> {
        self.request(|reply| Command::Grid { reply }).await
    }

    pub async fn stats(&self) -> Result<GameStats, DriverError> {
        self.request(|reply| Command::Stats { reply }).await
    }

    /// Stop the loop after the requests already queued ahead of this one
    pub async fn shutdown(&self) -> Result<(), DriverError> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::EventType;

    fn handle() -> EngineHandle {
        EngineDriver::spawn(GameController::with_seed(42).unwrap())
    }

    #[tokio::test]
    async fn test_send_returns_response() {
        let handle = handle();
        let response = handle.send(InputEvent::tick()).await.unwrap();
        assert_eq!(response.view.y, 1);
        assert_eq!(response.stats.score, 0);
    }

    #[tokio::test]
    async fn test_grid_and_stats_queries() {
        let handle = handle();
        assert!(handle.grid().await.unwrap().is_empty());
        handle
            .send(InputEvent::user(EventType::HardDrop))
            .await
            .unwrap();
        assert_eq!(handle.grid().await.unwrap().count_filled(), 4);
        assert!(handle.stats().await.unwrap().score > 0);
    }

    #[tokio::test]
    async fn test_requests_after_shutdown_fail() {
        let handle = handle();
        handle.shutdown().await.unwrap();
        assert_eq!(
            handle.send(InputEvent::tick()).await.unwrap_err(),
            DriverError::Closed
        );
    }
}
