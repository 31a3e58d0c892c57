//! Handles the weighted item table of the active banner.

use displaydoc::Display;
use thiserror::Error;
use tracing::debug;

pub mod structures;
#[cfg(feature = "assets")]
mod assets;

#[cfg(feature = "assets")]
pub use assets::LoadError;
use structures::{DrawTable, Item, ItemData, Rarity};

#[derive(Debug, Display, Error, Clone, PartialEq)]
/// Something was wrong with the items given to a banner.
pub enum BannerError {
    /// the banner has no items
    Empty,
    /// {0} has no weight to draw from
    EmptyTable(DrawTable),
    /// item {id} has an invalid rate of {rate}
    InvalidRate {
        /// The offending item's identifier
        id: String,
        /// The offending rate
        rate: f64,
    },
}

/// The active banner: every obtainable item in feed order, indexed by cumulative rate.
///
/// # Notes
/// Banners are never mutated after loading.
/// A refreshed banner replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    items: Vec<Item>,
    total_rate1: f64,
    total_rate2: f64,
}

/// Squashes a name into its canonical form for matching.
fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Banner {
    /// Loads a banner from raw items, keeping the order they were supplied in.
    ///
    /// # Errors
    /// Errors if there are no items, if a rate is negative or not finite,
    /// or if either table ends up with nothing to draw from.
    pub fn load(raw_items: impl IntoIterator<Item = ItemData>) -> Result<Banner, BannerError> {
        let mut total_rate1 = 0.0;
        let mut total_rate2 = 0.0;
        let items = raw_items.into_iter()
            .map(|data| {
                for rate in [data.rate1, data.rate2] {
                    if !rate.is_finite() || rate < 0.0 {
                        return Err(BannerError::InvalidRate { id: data.id, rate });
                    }
                }
                total_rate1 += data.rate1;
                total_rate2 += data.rate2;
                Ok(data.into_item(total_rate1, total_rate2))
            })
            .collect::<Result<Vec<Item>, BannerError>>()?;
        if items.is_empty() {
            return Err(BannerError::Empty);
        }
        if total_rate1 <= 0.0 {
            return Err(BannerError::EmptyTable(DrawTable::Normal));
        }
        if total_rate2 <= 0.0 {
            return Err(BannerError::EmptyTable(DrawTable::Guaranteed));
        }
        debug!(
            items = items.len(),
            total_rate1, total_rate2,
            "loaded banner"
        );
        Ok(Banner { items, total_rate1, total_rate2 })
    }

    /// Every item in the banner, in feed order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The total weight of a table.
    ///
    /// This is always equal to the cumulative rate of the last item.
    #[must_use]
    pub fn total_rate(&self, table: DrawTable) -> f64 {
        match table {
            DrawTable::Normal => self.total_rate1,
            DrawTable::Guaranteed => self.total_rate2,
        }
    }

    /// Picks the first item whose cumulative rate on `table` is at least `sample`.
    ///
    /// Items with no weight on `table` are never picked when a later item can be,
    /// even for a sample sitting right on their cumulative rate (such as `0.0`).
    /// Samples past the end of the table land on the last item.
    #[must_use]
    pub fn pick(&self, table: DrawTable, sample: f64) -> &Item {
        let last = self.items.len() - 1;
        // Cumulative rates never decrease, so this finds the first one >= sample
        let mut index = self.items.partition_point(|item| item.cum_rate(table) < sample).min(last);
        // Skip zero-width buckets
        while index < last && self.items[index].rate(table) <= 0.0 {
            index += 1;
        }
        &self.items[index]
    }

    /// Finds an item by name.
    ///
    /// Tries, in order: an exact name, the name of an item's character,
    /// and then the first name containing the query.
    /// Case and repeated whitespace are ignored.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Item> {
        let query = normalize(name);
        if query.is_empty() {
            return None;
        }
        self.items.iter()
            .find(|item| normalize(&item.name) == query)
            .or_else(|| self.items.iter().find(
                |item| item.character.as_deref().map(normalize).as_deref() == Some(query.as_str())
            ))
            .or_else(|| self.items.iter().find(
                |item| normalize(&item.name).contains(&query)
            ))
    }

    /// Every featured item, in feed order.
    pub fn featured(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.rate_up)
    }

    /// The combined rate of every item of a rarity on a table.
    #[must_use]
    pub fn rarity_rate(&self, rarity: Rarity, table: DrawTable) -> f64 {
        self.items.iter()
            .filter(|item| item.rarity == rarity)
            .map(|item| item.rate(table))
            .sum()
    }

    /// The combined rate of every featured item on a table.
    #[must_use]
    pub fn featured_rate(&self, table: DrawTable) -> f64 {
        self.featured().map(|item| item.rate(table)).sum()
    }
}
