//! Simulation configuration loaded from `.env`.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | ADALAT_STORAGE_PATH | ./data/simulations | Base directory for run artifacts. |
//! | ADALAT_MODEL | meta-llama/llama-3.3-70b-instruct | OpenRouter model for all turns. |
//! | OPENROUTER_API_KEY | (required) | API key for the generation oracle. |

use std::path::PathBuf;

/// Runtime configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Base directory under which each run writes its timestamped folder.
    pub storage_path: PathBuf,
}

impl SimConfig {
    /// Load from environment. Unset values fall back to defaults.
    pub fn from_env() -> Self {
        let storage_path = std::env::var("ADALAT_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/simulations"));
        Self { storage_path }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
