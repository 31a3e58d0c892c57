use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

use image::{ImageError, Rgba};
use thiserror::Error;

use crate::banner::structures::Rarity;

/// How a rendered roll is laid out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Layout {
    /// The pixel size of one square tile.
    pub tile: u32,
    /// The pixel gap around each tile.
    pub gap: u32,
    /// How many tiles fit in one row.
    pub columns: u32,
    /// The thickness of a tile's frame.
    pub frame: u32,
}

impl Default for Layout {
    fn default() -> Self {
        // One ten-part per row
        Self { tile: 48, gap: 4, columns: 10, frame: 3 }
    }
}

impl Layout {
    /// The pixel dimensions of an image holding `count` tiles.
    #[must_use]
    pub fn dimensions(&self, count: u32) -> (u32, u32) {
        let columns = count.clamp(1, self.columns);
        let rows = count.div_ceil(self.columns).max(1);
        let stride = self.tile + self.gap;
        (columns * stride + self.gap, rows * stride + self.gap)
    }

    /// The pixel position of the tile at `index`.
    #[must_use]
    pub fn position(&self, index: u32) -> (u32, u32) {
        let stride = self.tile + self.gap;
        (
            self.gap + (index % self.columns) * stride,
            self.gap + (index / self.columns) * stride,
        )
    }
}

/// The background behind every tile.
pub const BACKGROUND: Rgba<u8> = Rgba([0x20, 0x22, 0x25, 0xFF]);
/// The frame around featured items.
pub const FEATURED_FRAME: Rgba<u8> = Rgba([0xFF, 0xD7, 0x00, 0xFF]);
/// The frame around the target.
pub const TARGET_FRAME: Rgba<u8> = Rgba([0xE0, 0x30, 0x30, 0xFF]);

/// The flat color of a tile with no icon.
#[must_use]
pub fn rarity_color(rarity: Rarity) -> Rgba<u8> {
    match rarity {
        Rarity::SSRare => Rgba([0xF5, 0xC2, 0x42, 0xFF]),
        Rarity::SRare  => Rgba([0xB4, 0x8C, 0xE6, 0xFF]),
        Rarity::Rare   => Rgba([0x6C, 0x9E, 0xD8, 0xFF]),
        Rarity::Normal => Rgba([0x8A, 0x8A, 0x8A, 0xFF]),
    }
}

#[derive(Debug, Error)]
/// Different things that can go wrong when rendering a roll.
pub enum RenderingError {
    /// Failed to open an icon.
    FailedOpen(PathBuf, io::Error),
    /// Failed to decode an icon.
    FailedDecode(PathBuf, ImageError),
    /// Failed to encode the rendered image.
    FailedEncode(ImageError),
}

impl Display for RenderingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderingError::FailedOpen(path, err) =>
                write!(f, "failed to open \"{}\": {err}", path.display()),
            RenderingError::FailedDecode(path, err) =>
                write!(f, "failed to decode image at \"{}\": {err}", path.display()),
            RenderingError::FailedEncode(err) =>
                write!(f, "failed to encode the rendered roll: {err}"),
        }
    }
}
