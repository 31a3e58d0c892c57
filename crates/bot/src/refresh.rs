//! Keeps the bot's banner up to date.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use serenity::prelude::{RwLock, TypeMap};
use skyroll::banner::{Banner, LoadError};
use tracing::{info, warn};

use crate::type_map::CurrentBanner;

/// Reads a banner file without blocking the runtime.
async fn read_banner(path: &Path) -> Result<Banner, LoadError> {
    let text = tokio::fs::read_to_string(path).await?;
    Banner::from_toml(&text)
}

/// Loads the banner file and, if it's valid, makes it the current banner.
///
/// Returns how many items the new banner has.
async fn reload(data: &RwLock<TypeMap>, path: &Path) -> Result<usize, LoadError> {
    let banner = read_banner(path).await?;
    let items = banner.items().len();
    data.write().await.insert::<CurrentBanner>(Arc::new(banner));
    Ok(items)
}

/// Reloads the banner file forever, starting right away.
///
/// Each successful load replaces the current banner in one go.
/// A failed load keeps whatever banner was there before.
pub async fn refresh_banner(data: Arc<RwLock<TypeMap>>, path: PathBuf, every: Duration) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        match reload(&data, &path).await {
            Ok(items) => info!(path = %path.display(), items, "refreshed banner"),
            Err(err) => warn!(path = %path.display(), "failed to refresh banner: {err}"),
        }
    }
}
