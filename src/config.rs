//! Engine configuration

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::Player;

pub const DEFAULT_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Board width and height. Must be even and at least 4.
    pub size: usize,

    /// Seed for the starting-player draw. Entropy when unset.
    pub seed: Option<u64>,

    /// Fixed starting player. Overrides the random draw.
    pub first_player: Option<Player>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
            first_player: None,
        }
    }
}

impl Config {
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::Config {
            message: err.to_string(),
        })
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| Error::Config {
            message: format!("failed to read {}: {err}", path.display()),
        })?;
        Self::from_json_str(&text)
    }
}
