//! Hold data structures for use in the bot.

use std::path::PathBuf;
use std::time::Duration;
use displaydoc::Display;
use thiserror::Error;
use serde::Deserialize;

#[derive(Debug, Display, Error)]
/// Different things that can go wrong when initializing the bot.
pub enum InitError {
    #[displaydoc("serenity error: {0}")]
    /// Serenity error
    SerenityError(#[from] serenity::Error),
    #[displaydoc("failed to read config file: {0}")]
    /// Failed to read config file
    ConfigOpenFailed(#[from] std::io::Error),
    #[displaydoc("failed to deserialize config file: {0}")]
    /// Failed to deserialize config file
    ConfigDeserializeFailed(#[from] toml::de::Error)
}

fn default_refresh_minutes() -> u64 {
    30
}

/// The bot's configuration file.
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    /// Command prefixes the bot answers to.
    pub prefixes: Vec<String>,
    /// Where the banner file is kept up to date.
    pub banner_path: PathBuf,
    /// How often the banner file is read again.
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,
    /// A directory of item icons, named by item id.
    #[serde(default)]
    pub icon_path: Option<PathBuf>,
}

impl Config {
    /// The time between banner refreshes.
    pub fn refresh_interval(&self) -> Duration {
        // A zero interval would make tokio panic
        Duration::from_secs(self.refresh_minutes.max(1).saturating_mul(60))
    }
}
