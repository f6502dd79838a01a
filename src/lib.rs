//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under one name so hosts and the integration
//! tests can write `blockfall::{core,engine,driver,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_driver as driver;
pub use blockfall_engine as engine;
pub use blockfall_types as types;
