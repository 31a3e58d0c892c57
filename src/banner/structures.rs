//! Data structures for use within a banner.

use std::str::FromStr;
use displaydoc::Display;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Deserialize;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(try_from = "String"))]
/// The rarity tier of an item.
///
/// Tiers are ordered from least to most rare, so `SSRare` is the greatest.
pub enum Rarity {
    /// Normal
    Normal = 0,
    /// Rare
    Rare = 1,
    /// S Rare
    SRare = 2,
    /// SS Rare
    SSRare = 3,
}

impl Rarity {
    /// Every tier, rarest first.
    pub const DESCENDING: [Rarity; 4] = [
        Rarity::SSRare,
        Rarity::SRare,
        Rarity::Rare,
        Rarity::Normal,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
/// Something went wrong while parsing one of the item enumerations.
pub enum NameError {
    /// {0} is not a valid rarity
    Rarity(String),
    /// {0} is not a valid element
    Element(String),
    /// {0} is not a valid item type
    ItemType(String),
}

/// Lets names in banner files go through the same parsing as [`FromStr`].
macro_rules! try_from_string {
    ($($name: ident),+) => {$(
        impl TryFrom<String> for $name {
            type Error = NameError;

            fn try_from(v: String) -> Result<Self, Self::Error> {
                v.parse()
            }
        }
    )+};
}

try_from_string!(Rarity, Element, ItemType);

impl FromStr for Rarity {
    type Err = NameError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        // Spaces are optional, so "SS Rare", "ssrare" and "SSR" all work
        let squashed = v.split_whitespace().collect::<String>().to_ascii_lowercase();
        Ok( match squashed.as_str() {
            "ssrare" | "ssr" => Rarity::SSRare,
            "srare"  | "sr"  => Rarity::SRare,
            "rare"   | "r"   => Rarity::Rare,
            "normal" | "n"   => Rarity::Normal,
            _ => return Err(NameError::Rarity(v.to_string()))
        } )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(try_from = "String"))]
/// The element an item is aligned with.
pub enum Element {
    /// Fire
    Fire,
    /// Water
    Water,
    /// Earth
    Earth,
    /// Wind
    Wind,
    /// Light
    Light,
    /// Dark
    Dark,
    /// Any
    Any,
}

impl FromStr for Element {
    type Err = NameError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        Ok( match v.trim().to_ascii_lowercase().as_str() {
            "fire"  => Element::Fire,
            "water" => Element::Water,
            "earth" => Element::Earth,
            "wind"  => Element::Wind,
            "light" => Element::Light,
            "dark"  => Element::Dark,
            "any"   => Element::Any,
            _ => return Err(NameError::Element(v.to_string()))
        } )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(try_from = "String"))]
/// What kind of item this is.
///
/// Everything that isn't a summon is a weapon of some type.
pub enum ItemType {
    /// Sabre
    Sabre,
    /// Dagger
    Dagger,
    /// Spear
    Spear,
    /// Axe
    Axe,
    /// Staff
    Staff,
    /// Gun
    Gun,
    /// Melee
    Melee,
    /// Bow
    Bow,
    /// Harp
    Harp,
    /// Katana
    Katana,
    /// Summon
    Summon,
}

impl ItemType {
    /// Whether this is a summon rather than a weapon.
    #[must_use]
    pub fn is_summon(self) -> bool {
        self == ItemType::Summon
    }
}

impl FromStr for ItemType {
    type Err = NameError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        Ok( match v.trim().to_ascii_lowercase().as_str() {
            "sabre" | "sword" => ItemType::Sabre,
            "dagger"          => ItemType::Dagger,
            "spear"           => ItemType::Spear,
            "axe"             => ItemType::Axe,
            "staff"           => ItemType::Staff,
            "gun"             => ItemType::Gun,
            "melee" | "fist"  => ItemType::Melee,
            "bow"             => ItemType::Bow,
            "harp"            => ItemType::Harp,
            "katana"          => ItemType::Katana,
            "summon"          => ItemType::Summon,
            _ => return Err(NameError::ItemType(v.to_string()))
        } )
    }
}

/// Which of the two rate tables a draw samples from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
pub enum DrawTable {
    /// the normal table
    Normal,
    /// the guaranteed table
    Guaranteed,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
/// Holds the data of an item, as supplied to a banner.
pub struct ItemData {
    /// The game's identifier for the item
    pub id: String,
    /// The item's display name
    pub name: String,
    /// The item's rarity tier
    pub rarity: Rarity,
    /// The item's element
    pub element: Element,
    /// The item's weapon type, or summon
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ItemType,
    /// The per-draw percentage on the normal table
    pub rate1: f64,
    /// The per-draw percentage on the guaranteed table
    pub rate2: f64,
    /// Whether the item is featured on this banner
    #[cfg_attr(feature = "serde", serde(default))]
    pub rate_up: bool,
    /// The character this weapon brings along, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub character: Option<String>,
}

/// An item inside of a loaded banner.
///
/// # Notes
/// Cumulative rates are only meaningful relative to the banner that computed them.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// The game's identifier for the item
    pub id: String,
    /// The item's display name
    pub name: String,
    /// The item's rarity tier
    pub rarity: Rarity,
    /// The item's element
    pub element: Element,
    /// The item's weapon type, or summon
    pub kind: ItemType,
    /// The per-draw percentage on the normal table
    pub rate1: f64,
    /// The per-draw percentage on the guaranteed table
    pub rate2: f64,
    /// The running total of `rate1` up to and including this item
    pub cum_rate1: f64,
    /// The running total of `rate2` up to and including this item
    pub cum_rate2: f64,
    /// Whether the item is featured on this banner
    pub rate_up: bool,
    /// The character this weapon brings along, if any
    pub character: Option<String>,
}

impl Item {
    /// The per-draw percentage of this item on a table.
    #[must_use]
    pub fn rate(&self, table: DrawTable) -> f64 {
        match table {
            DrawTable::Normal => self.rate1,
            DrawTable::Guaranteed => self.rate2,
        }
    }

    /// The cumulative percentage of this item on a table.
    #[must_use]
    pub fn cum_rate(&self, table: DrawTable) -> f64 {
        match table {
            DrawTable::Normal => self.cum_rate1,
            DrawTable::Guaranteed => self.cum_rate2,
        }
    }

    /// Whether this is an SS Rare that's featured on its banner.
    #[must_use]
    pub fn is_featured_ss_rare(&self) -> bool {
        self.rate_up && self.rarity == Rarity::SSRare
    }

    /// Whether this weapon brings a character along.
    #[must_use]
    pub fn has_character(&self) -> bool {
        self.character.is_some()
    }
}

impl ItemData {
    /// Attaches cumulative rates to this item.
    pub(crate) fn into_item(self, cum_rate1: f64, cum_rate2: f64) -> Item {
        Item {
            id: self.id,
            name: self.name,
            rarity: self.rarity,
            element: self.element,
            kind: self.kind,
            rate1: self.rate1,
            rate2: self.rate2,
            cum_rate1,
            cum_rate2,
            rate_up: self.rate_up,
            character: self.character,
        }
    }
}

impl Default for ItemData {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            rarity: Rarity::Rare,
            element: Element::Any,
            kind: ItemType::Sabre,
            rate1: 0.0,
            rate2: 0.0,
            rate_up: false,
            character: None,
        }
    }
}
