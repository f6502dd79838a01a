//! Engine configuration
//!
//! Environment variables:
//! - `BLOCKFALL_ROWS`: playfield height including the two hidden rows (default 25)
//! - `BLOCKFALL_COLS`: playfield width (default 10)
//! - `BLOCKFALL_SEED`: piece sequence seed; unset means a random seed
//! - `BLOCKFALL_LOG`: `1`/`true`/`on` to print lifecycle lines on stdout

use std::env;

use anyhow::{bail, Context};
use blockfall_types::{BOARD_COLS, BOARD_ROWS};

pub const ENV_ROWS: &str = "BLOCKFALL_ROWS";
pub const ENV_COLS: &str = "BLOCKFALL_COLS";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_LOG: &str = "BLOCKFALL_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    pub seed: Option<u64>,
    pub log_events: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            seed: None,
            log_events: false,
        }
    }
}

impl EngineConfig {
    /// Read the environment, falling back to defaults for anything missing
    /// or unparsable
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let rows = env::var(ENV_ROWS)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.rows);

        let cols = env::var(ENV_COLS)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.cols);

        let seed = env::var(ENV_SEED)
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let log_events = env::var(ENV_LOG)
            .ok()
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.log_events);

        Self {
            rows,
            cols,
            seed,
            log_events,
        }
    }

    /// Like [`from_env`](Self::from_env) but rejects values that are set and
    /// malformed
    pub fn try_from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = read_var(ENV_ROWS) {
            config.rows = parse_dimension(ENV_ROWS, &raw)?;
        }
        if let Some(raw) = read_var(ENV_COLS) {
            config.cols = parse_dimension(ENV_COLS, &raw)?;
        }
        if let Some(raw) = read_var(ENV_SEED) {
            let seed = raw
                .parse()
                .with_context(|| format!("{ENV_SEED} must be an unsigned integer, got {raw:?}"))?;
            config.seed = Some(seed);
        }
        if let Some(raw) = read_var(ENV_LOG) {
            match parse_flag(&raw) {
                Some(flag) => config.log_events = flag,
                None => bail!("{ENV_LOG} must be a boolean flag, got {raw:?}"),
            }
        }

        Ok(config)
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_dimension(name: &str, raw: &str) -> anyhow::Result<usize> {
    let n: usize = raw
        .parse()
        .with_context(|| format!("{name} must be a positive integer, got {raw:?}"))?;
    if n == 0 {
        bail!("{name} must be greater than zero");
    }
    Ok(n)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}
