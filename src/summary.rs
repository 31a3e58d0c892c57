//! Orders and summarizes the results of a roll for display.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use itertools::Itertools;

use crate::banner::structures::{Item, ItemType, Rarity};
use crate::roll::Roll;

/// How many items a report lists one by one.
pub const DISPLAY_LIMIT: usize = 23;
/// The most characters a chat message can hold.
pub const MESSAGE_LIMIT: usize = 2000;

/// Cuts text down to at most `limit` characters, marking the cut with `…`.
///
/// Cuts happen at the last line break that fits, or mid-line if there isn't one.
#[must_use]
pub fn fit_message(text: &str, limit: usize) -> Cow<'_, str> {
    if text.chars().count() <= limit {
        return Cow::Borrowed(text);
    }
    let end = text.char_indices()
        .nth(limit.saturating_sub(1))
        .map_or(text.len(), |(index, _)| index);
    let cut = text[..end].rfind('\n').unwrap_or(end);
    Cow::Owned(format!("{}…", &text[..cut]))
}

/// Compares two drawn items for display.
///
/// In priority order: the target comes first,
/// then featured SS Rares,
/// then rarer items,
/// then items that bring a character.
pub fn compare(a: &Item, b: &Item, target: Option<&Item>) -> Ordering {
    let is_target = |item: &Item| target.is_some_and(|target| target.id == item.id);
    is_target(b).cmp(&is_target(a))
        .then(b.is_featured_ss_rare().cmp(&a.is_featured_ss_rare()))
        .then(b.rarity.cmp(&a.rarity))
        .then(b.has_character().cmp(&a.has_character()))
}

/// Sorts drawn items for display.
///
/// The sort is stable, so items that compare equal keep the order they were drawn in.
pub fn sort_items(items: &mut [&Item], target: Option<&Item>) {
    items.sort_by(|a, b| compare(a, b, target));
}

/// Statistics about a set of drawn items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    /// How many draws were made
    pub draws: usize,
    /// How many SS Rares brought a character
    pub ss_rare_characters: usize,
    /// How many SS Rares were summons
    pub ss_rare_summons: usize,
    /// How many items of each rarity were drawn
    pub counts: BTreeMap<Rarity, usize>,
}

impl Summary {
    /// Summarizes a set of drawn items.
    #[must_use]
    pub fn of(items: &[&Item]) -> Self {
        let ss_rares = || items.iter().filter(|item| item.rarity == Rarity::SSRare);
        Self {
            draws: items.len(),
            ss_rare_characters: ss_rares().filter(|item| item.has_character()).count(),
            ss_rare_summons: ss_rares().filter(|item| item.kind.is_summon()).count(),
            counts: items.iter().map(|item| item.rarity).counts().into_iter().collect(),
        }
    }

    /// How many items of a rarity were drawn.
    #[must_use]
    pub fn count(&self, rarity: Rarity) -> usize {
        self.counts.get(&rarity).copied().unwrap_or_default()
    }

    /// The percentage of draws that were SS Rare, to two decimal places.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ss_rare_percentage(&self) -> f64 {
        if self.draws == 0 {
            return 0.0;
        }
        let percentage = self.count(Rarity::SSRare) as f64 / self.draws as f64 * 100.0;
        (percentage * 100.0).round() / 100.0
    }
}

/// A roll, ready to be shown to someone.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<'b> {
    /// The drawn items, in display order.
    pub items: Vec<&'b Item>,
    /// The item the roll was looking for, if any.
    pub target: Option<&'b Item>,
    /// Statistics about the roll.
    pub summary: Summary,
    /// Whether the target was drawn.
    pub hit_target: bool,
    /// How many items are listed one by one.
    pub limit: usize,
}

impl<'b> Report<'b> {
    /// Creates a report of a roll, listing up to [`DISPLAY_LIMIT`] items.
    #[must_use]
    pub fn new(roll: Roll<'b>) -> Self {
        Self::with_limit(roll, DISPLAY_LIMIT)
    }

    /// Creates a report of a roll, listing up to `limit` items.
    #[must_use]
    pub fn with_limit(roll: Roll<'b>, limit: usize) -> Self {
        let hit_target = roll.hit_target();
        let summary = Summary::of(&roll.items);
        let Roll { mut items, target } = roll;
        sort_items(&mut items, target);
        Self { items, target, summary, hit_target, limit }
    }

    /// The items that don't get a line of their own.
    #[must_use]
    pub fn overflow(&self) -> &[&'b Item] {
        &self.items[self.limit.min(self.items.len())..]
    }
}

/// Pluralizes a noun by count.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 { format!("{count} {noun}") } else { format!("{count} {noun}s") }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let summary = &self.summary;
        match self.target {
            Some(target) if self.hit_target => writeln!(
                f, "Got **{}** after {}!",
                target.name, plural(summary.draws, "draw")
            )?,
            Some(target) => writeln!(
                f, "Sparked without getting **{}** ({}).",
                target.name, plural(summary.draws, "draw")
            )?,
            None => {}
        }
        writeln!(
            f, "{} and {} in {} ({:.2}% SS Rare)",
            plural(summary.ss_rare_characters, "SS Rare character"),
            plural(summary.ss_rare_summons, "SS Rare summon"),
            plural(summary.draws, "draw"),
            summary.ss_rare_percentage()
        )?;
        for (index, item) in self.items.iter().take(self.limit).enumerate() {
            write!(f, "{}. [{}] {}", index + 1, item.rarity, item.name)?;
            match (&item.character, item.kind) {
                (Some(character), _) => write!(f, " ({character})")?,
                (None, ItemType::Summon) => write!(f, " (Summon)")?,
                (None, _) => {}
            }
            if item.rate_up {
                write!(f, " ★")?;
            }
            writeln!(f)?;
        }
        let overflow = self.overflow();
        if !overflow.is_empty() {
            let counts = overflow.iter().map(|item| item.rarity).counts();
            let grouped = Rarity::DESCENDING.iter()
                .filter_map(|rarity| counts.get(rarity).map(|count| format!("{count} {rarity}")))
                .join(", ");
            writeln!(f, "...and {} more: {grouped}", overflow.len())?;
        }
        Ok(())
    }
}
