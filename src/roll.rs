//! Simulates draws against a banner.

use displaydoc::Display;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::banner::Banner;
use crate::banner::structures::{DrawTable, Item};

/// How many crystals buy a single ten-part draw.
pub const CRYSTALS_PER_TEN_PART: u32 = 3000;
/// How many ten-part sets it takes to reach a spark.
pub const SPARK_SETS: u32 = 30;
/// The most single draws a budget may hold.
pub const MAX_SINGLES: u32 = 10_000;
/// The most ten-part sets a budget may hold, bonus sets from crystals included.
pub const MAX_TEN_PARTS: u32 = 1_000;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
/// Things that can stop a roll before it starts.
pub enum RollError {
    /// the banner isn't loaded yet, try again in a bit
    Unavailable,
    /// couldn't find anything called "{0}" on the banner
    UnknownTarget(String),
    /// can't do more than {max} single draws at once
    TooManySingles {
        /// The limit that was hit
        max: u32
    },
    /// can't do more than {max} ten-part draws at once
    TooManyTenParts {
        /// The limit that was hit
        max: u32
    },
}

/// A source of uniformly distributed samples.
pub trait UniformSource {
    /// Returns a sample in `[0, upper)`.
    fn next_uniform(&mut self, upper: f64) -> f64;
}

/// Draws samples from a random number generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_uniform(&mut self, upper: f64) -> f64 {
        self.0.gen::<f64>() * upper
    }
}

/// Replays a fixed sequence of samples, starting over once it runs out.
///
/// Samples are absolute values on the table's scale, and ignore the requested upper bound.
/// An empty sequence always gives `0.0`, which picks the first item with weight.
#[derive(Debug, Clone, Default)]
pub struct FixedSamples {
    samples: Vec<f64>,
    next: usize,
}

impl FixedSamples {
    /// Creates a source that replays these samples in order.
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        Self { samples: samples.into(), next: 0 }
    }
}

impl UniformSource for FixedSamples {
    fn next_uniform(&mut self, _upper: f64) -> f64 {
        let Some(sample) = self.samples.get(self.next % self.samples.len().max(1)) else {
            return 0.0;
        };
        self.next += 1;
        *sample
    }
}

/// What someone is spending on a roll.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DrawBudget {
    /// Single draws
    pub singles: u32,
    /// Ten-part draws
    pub ten_parts: u32,
    /// Crystals, spent on extra ten-part draws
    pub crystals: u32,
}

impl DrawBudget {
    /// A spark's worth of ten-part draws.
    #[must_use]
    pub fn spark() -> Self {
        Self { ten_parts: SPARK_SETS, ..Self::default() }
    }

    /// The ten-part draws the crystals pay for.
    #[must_use]
    pub fn bonus_ten_parts(&self) -> u32 {
        self.crystals / CRYSTALS_PER_TEN_PART
    }

    /// Every ten-part set, bought or paid for with crystals.
    #[must_use]
    pub fn ten_part_sets(&self) -> u32 {
        self.ten_parts.saturating_add(self.bonus_ten_parts())
    }

    /// The total number of individual draws.
    #[must_use]
    pub fn draws(&self) -> u32 {
        self.singles.saturating_add(self.ten_part_sets().saturating_mul(10))
    }

    /// Turns this budget into a request without a target.
    ///
    /// Ten-part sets are drawn first, then the singles.
    ///
    /// # Errors
    /// Errors if the budget goes over [`MAX_SINGLES`] or [`MAX_TEN_PARTS`].
    pub fn into_request<'b>(self) -> Result<DrawRequest<'b>, RollError> {
        if self.singles > MAX_SINGLES {
            return Err(RollError::TooManySingles { max: MAX_SINGLES });
        }
        if self.ten_part_sets() > MAX_TEN_PARTS {
            return Err(RollError::TooManyTenParts { max: MAX_TEN_PARTS });
        }
        Ok(DrawRequest::new(self.draws(), self.ten_part_sets()))
    }
}

/// A single request to roll on a banner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawRequest<'b> {
    /// How many draws to make.
    ///
    /// Ignored when there's a target.
    pub rolls: u32,
    /// How many ten-part sets the draws start with.
    pub guaranteed_sets: u32,
    /// An item to stop at once it's drawn.
    pub target: Option<&'b Item>,
}

impl<'b> DrawRequest<'b> {
    /// Creates a request without a target.
    #[must_use]
    pub fn new(rolls: u32, guaranteed_sets: u32) -> Self {
        Self { rolls, guaranteed_sets, target: None }
    }

    /// Creates a request that rolls ten-parts until the target shows up, or up to a spark.
    #[must_use]
    pub fn until(target: &'b Item) -> Self {
        Self { rolls: u32::MAX, guaranteed_sets: SPARK_SETS, target: Some(target) }
    }

    /// The last draw that still counts as part of a ten-part set.
    #[must_use]
    pub fn ceiling(&self) -> u32 {
        self.guaranteed_sets.saturating_mul(10)
    }

    /// The most draws this request can make.
    #[must_use]
    pub fn limit(&self) -> u32 {
        if self.target.is_some() { self.ceiling() } else { self.rolls }
    }

    /// Which table a draw (counting from 1) samples from.
    #[must_use]
    pub fn table_for(&self, draw: u32) -> DrawTable {
        if draw % 10 == 0 && draw <= self.ceiling() {
            DrawTable::Guaranteed
        } else {
            DrawTable::Normal
        }
    }
}

/// The outcome of a roll.
#[derive(Debug, Clone, PartialEq)]
pub struct Roll<'b> {
    /// Every item drawn, in the order they were drawn.
    pub items: Vec<&'b Item>,
    /// The item the roll was looking for, if any.
    pub target: Option<&'b Item>,
}

impl<'b> Roll<'b> {
    /// How many draws were made.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.items.len()
    }

    /// Whether the target was drawn.
    ///
    /// Always `false` for rolls without one.
    #[must_use]
    pub fn hit_target(&self) -> bool {
        self.target.is_some_and(
            |target| self.items.iter().any(|item| item.id == target.id)
        )
    }
}

/// Finds the item someone wants to roll for.
///
/// # Errors
/// Errors with [`RollError::UnknownTarget`] if nothing on the banner matches.
pub fn resolve_target<'b>(banner: &'b Banner, name: &str) -> Result<&'b Item, RollError> {
    banner.find(name).ok_or_else(|| RollError::UnknownTarget(name.trim().to_string()))
}

/// Rolls on a banner.
///
/// Every tenth draw inside the request's ten-part sets samples the guaranteed table,
/// and everything else samples the normal one.
/// With a target, rolling stops as soon as the target is drawn,
/// or once the last ten-part set is done.
pub fn roll<'b>(
    banner: &'b Banner,
    request: &DrawRequest<'b>,
    source: &mut impl UniformSource
) -> Roll<'b> {
    let limit = request.limit();
    let ceiling = request.ceiling();
    let mut items = Vec::with_capacity(limit.min(MAX_SINGLES + MAX_TEN_PARTS * 10) as usize);
    for draw in 1..=limit {
        let table = request.table_for(draw);
        let sample = source.next_uniform(banner.total_rate(table));
        let item = banner.pick(table, sample);
        items.push(item);
        if let Some(target) = request.target {
            if draw < ceiling && item.id == target.id {
                break;
            }
        }
    }
    debug!(draws = items.len(), limit, "rolled");
    Roll { items, target: request.target }
}
