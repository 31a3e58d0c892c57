#![cfg(feature = "assets")]
//! Handles loading banners from files.

use std::io::Read;
use std::path::Path;
use std::{fs, io};
use displaydoc::Display;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::structures::ItemData;
use super::{Banner, BannerError};

#[derive(Debug, Display, Error)]
/// Error when loading a banner file
pub enum LoadError {
    #[displaydoc("IO error: {0}")]
    /// Error opening a file
    IoError(#[from] io::Error),
    #[displaydoc("Decoding error: {0}")]
    /// Error when decoding a TOML file
    TomlError(#[from] toml::de::Error),
    #[displaydoc("Invalid banner: {0}")]
    /// The file decoded, but its items don't make a banner
    BannerError(#[from] BannerError),
}

/// The layout of a banner file.
#[derive(Deserialize)]
struct BannerFile {
    items: Vec<ItemData>,
}

impl Banner {
    /// Loads a banner from the text of a banner file.
    ///
    /// # Errors
    /// Bails if the text isn't valid TOML, or the items don't make a valid banner.
    pub fn from_toml(text: &str) -> Result<Banner, LoadError> {
        let file: BannerFile = toml::from_str(text)?;
        Ok(Banner::load(file.items)?)
    }

    /// Loads a banner from a banner file.
    ///
    /// # Errors
    /// Bails if the path can't be read, or there's an issue reading the banner.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Banner, LoadError> {
        let path = path.as_ref();
        let mut file_buf = String::new();
        let mut f = fs::File::open(path)?;
        f.read_to_string(&mut file_buf)?;
        drop(f); // Close immediately
        let banner = Banner::from_toml(&file_buf)?;
        info!(path = %path.display(), items = banner.items().len(), "read banner file");
        Ok(banner)
    }
}
