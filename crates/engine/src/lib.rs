//! Engine layer - event handling on top of the core board
//!
//! - [`controller`]: one input event in, one [`Response`] out
//! - [`config`]: board size, seed and logging from the environment
//! - [`speed`]: auto-fall interval per level
//!
//! ```
//! use blockfall_engine::{EngineConfig, GameController};
//! use blockfall_engine::types::{EventType, InputEvent};
//!
//! let config = EngineConfig { seed: Some(7), ..EngineConfig::default() };
//! let mut controller = GameController::from_config(config).unwrap();
//!
//! let response = controller.handle(InputEvent::user(EventType::HardDrop));
//! assert!(response.clear_row.is_some());
//! assert!(!response.game_over);
//! ```

pub mod config;
pub mod controller;
pub mod speed;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::EngineConfig;
pub use controller::{GameController, Response};
pub use speed::fall_interval;
