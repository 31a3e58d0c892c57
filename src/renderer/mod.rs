#![cfg(feature = "rendering")]
//! Handles rendering of rolls into images.

use std::{borrow::Cow, collections::HashMap, io::Cursor, path::{Path, PathBuf}};
use image::{imageops, io::Reader as ImageReader, DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use tracing::debug;

use crate::banner::structures::Item;

mod structures;
pub use structures::{
    rarity_color, Layout, RenderingError,
    BACKGROUND, FEATURED_FRAME, TARGET_FRAME
};

/// Opens an image, potentially from a cache.
/// This will always return a borrow if given a cache, and always return something owned if not.
fn open_cached<'cache>(
    path: &Path,
    cache: Option<&'cache mut HashMap<PathBuf, RgbaImage>>
) -> Result<Cow<'cache, RgbaImage>, RenderingError> {
    if let Some(cache) = cache {
        if !cache.contains_key(path) {
            let image = open(path)?;
            cache.insert(path.to_path_buf(), image);
        }
        return Ok(Cow::Borrowed(&cache[path]));
    }
    Ok(Cow::Owned(open(path)?))
}

fn open(path: &Path) -> Result<RgbaImage, RenderingError> {
    let reader = ImageReader::open(path)
        .map_err(|err| RenderingError::FailedOpen(path.to_path_buf(), err))?;
    Ok(reader.decode()
        .map_err(|err| RenderingError::FailedDecode(path.to_path_buf(), err))?
        .into_rgba8())
}

/// Finds the icon of an item, if there's one on disk.
fn icon_path(icons: Option<&Path>, item: &Item) -> Option<PathBuf> {
    let path = icons?.join(format!("{}.png", item.id));
    path.is_file().then_some(path)
}

/// Renders drawn items as a grid of tiles, in the order given.
///
/// Each tile is the item's icon from `icons`, named after its id,
/// or a flat tile in its rarity's color if there isn't one.
/// Featured items get a gold frame, and the target gets a red one.
///
/// If a cache is passed in, icons are kept there between renders.
///
/// # Errors
/// Errors if an icon exists but can't be opened. See [`RenderingError`] for details.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn render(
    items: &[&Item],
    target: Option<&Item>,
    icons: Option<&Path>,
    mut cache: Option<&mut HashMap<PathBuf, RgbaImage>>,
    layout: Layout
) -> Result<RgbaImage, RenderingError> {
    let count = u32::try_from(items.len()).unwrap_or(u32::MAX);
    let (width, height) = layout.dimensions(count);
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
    for (index, item) in (0..count).zip(items) {
        let (x, y) = layout.position(index);
        let tile = Rect::at(x as i32, y as i32).of_size(layout.tile, layout.tile);
        if let Some(path) = icon_path(icons, item) {
            let icon = open_cached(&path, cache.as_deref_mut())?;
            let icon = imageops::resize(
                &*icon, layout.tile, layout.tile, imageops::FilterType::Triangle
            );
            imageops::overlay(&mut canvas, &icon, i64::from(x), i64::from(y));
        } else {
            draw_filled_rect_mut(&mut canvas, tile, rarity_color(item.rarity));
        }
        let frame = if target.is_some_and(|target| target.id == item.id) {
            Some(TARGET_FRAME)
        } else if item.rate_up {
            Some(FEATURED_FRAME)
        } else {
            None
        };
        if let Some(color) = frame {
            draw_frame(&mut canvas, tile, layout.frame, color);
        }
    }
    debug!(tiles = count, width, height, "rendered roll");
    Ok(canvas)
}

/// Draws a frame of some thickness just inside a tile.
#[allow(clippy::cast_possible_wrap)]
fn draw_frame(canvas: &mut RgbaImage, tile: Rect, thickness: u32, color: Rgba<u8>) {
    for inset in 0..thickness.min(tile.width() / 2) {
        let rect = Rect::at(tile.left() + inset as i32, tile.top() + inset as i32)
            .of_size(tile.width() - inset * 2, tile.height() - inset * 2);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

/// Encodes a rendered roll as a PNG.
///
/// # Errors
/// Errors if encoding fails.
pub fn encode_png(image: RgbaImage) -> Result<Vec<u8>, RenderingError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .map_err(RenderingError::FailedEncode)?;
    Ok(bytes)
}
