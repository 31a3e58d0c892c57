use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use serenity::all::CurrentUser;
use serenity::prelude::{Mutex, TypeMapKey};
use skyroll::banner::Banner;

use crate::structures::Config;

pub struct StartedTime;

impl TypeMapKey for StartedTime {
    type Value = Instant;
}

pub struct BotUser;

impl TypeMapKey for BotUser {
    type Value = CurrentUser;
}

pub struct BotConfig;

impl TypeMapKey for BotConfig {
    type Value = Config;
}

/// The banner snapshot every roll reads from.
///
/// Missing until the first refresh succeeds.
pub struct CurrentBanner;

impl TypeMapKey for CurrentBanner {
    type Value = Arc<Banner>;
}

/// Item icons opened by the renderer.
pub struct IconCache;

impl TypeMapKey for IconCache {
    type Value = Arc<Mutex<HashMap<PathBuf, image::RgbaImage>>>;
}
