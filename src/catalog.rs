//! Static catalogs: buried items, store upgrades and farm seeds.
//!
//! Everything here is read-only configuration shared by all sessions.
use serde::{Deserialize, Serialize};

// ── Buried items ──────────────────────────────────────────────

/// Which pool a buried item is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Collectible trash: counts toward the level goal and pays coins.
    Trash,
    /// Harmless find that is not trash.
    Decoy,
    /// Muzzle trap: digging it disables digging for a while.
    Trap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ItemKind,
    pub coin_value: u64,
}

pub const ITEMS: &[Item] = &[
    // Trash
    Item { id: "t1", name: "Old boot", kind: ItemKind::Trash, coin_value: 2 },
    Item { id: "t2", name: "Plastic bottle", kind: ItemKind::Trash, coin_value: 3 },
    Item { id: "t3", name: "Apple core", kind: ItemKind::Trash, coin_value: 1 },
    Item { id: "t4", name: "Crumpled paper", kind: ItemKind::Trash, coin_value: 1 },
    Item { id: "t5", name: "Tin can", kind: ItemKind::Trash, coin_value: 4 },
    Item { id: "t6", name: "Banana peel", kind: ItemKind::Trash, coin_value: 1 },
    Item { id: "t7", name: "Plastic bag", kind: ItemKind::Trash, coin_value: 2 },
    // Not trash
    Item { id: "b1", name: "Tasty bone", kind: ItemKind::Decoy, coin_value: 0 },
    Item { id: "b2", name: "Little worm", kind: ItemKind::Decoy, coin_value: 0 },
    Item { id: "b3", name: "Small key", kind: ItemKind::Decoy, coin_value: 0 },
    Item { id: "b4", name: "Gemstone", kind: ItemKind::Decoy, coin_value: 0 },
    // Traps
    Item { id: "trap1", name: "Muzzle", kind: ItemKind::Trap, coin_value: 0 },
];

/// All catalog items of one kind, in catalog order.
pub fn item_pool(kind: ItemKind) -> Vec<&'static Item> {
    ITEMS.iter().filter(|i| i.kind == kind).collect()
}

// ── Upgrades ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpgradeId {
    FasterDig,
    Compass,
    LuckyCharm,
    StylishCollar,
    CuteHat,
    ExtraAttempt,
    CloserStart,
    ImproveMood,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradeCategory {
    /// Digging tools; owned once.
    Tool,
    /// Wearables; owned once, freely equipped and unequipped.
    Cosmetic,
    /// Hide-and-seek helpers; owned once.
    Companion,
    /// Consumable treat; bought repeatedly while mood is below max.
    MoodBoost,
}

/// Immutable catalog entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Upgrade {
    pub id: UpgradeId,
    pub name: &'static str,
    pub cost: u64,
    pub category: UpgradeCategory,
    /// Meaning depends on the upgrade: a fraction for FasterDig, a chance for
    /// LuckyCharm/Compass, a count for ExtraAttempt/CloserStart, mood points
    /// for ImproveMood. Zero for cosmetics.
    pub magnitude: f64,
}

impl UpgradeId {
    /// All upgrades in store display order.
    pub fn all() -> &'static [UpgradeId] {
        &[
            UpgradeId::FasterDig,
            UpgradeId::Compass,
            UpgradeId::LuckyCharm,
            UpgradeId::StylishCollar,
            UpgradeId::CuteHat,
            UpgradeId::ExtraAttempt,
            UpgradeId::CloserStart,
            UpgradeId::ImproveMood,
        ]
    }

    pub fn entry(self) -> Upgrade {
        let (name, cost, category, magnitude) = match self {
            UpgradeId::FasterDig => ("Sturdy shovel", 20, UpgradeCategory::Tool, 0.25),
            UpgradeId::Compass => ("Trash compass", 35, UpgradeCategory::Tool, 0.25),
            UpgradeId::LuckyCharm => ("Lucky charm", 50, UpgradeCategory::Tool, 0.2),
            UpgradeId::StylishCollar => ("Stylish collar", 15, UpgradeCategory::Cosmetic, 0.0),
            UpgradeId::CuteHat => ("Cute hat", 25, UpgradeCategory::Cosmetic, 0.0),
            UpgradeId::ExtraAttempt => ("Keen nose", 40, UpgradeCategory::Companion, 2.0),
            UpgradeId::CloserStart => ("Area map", 60, UpgradeCategory::Companion, 2.0),
            UpgradeId::ImproveMood => ("Ice cream", 15, UpgradeCategory::MoodBoost, 25.0),
        };
        Upgrade {
            id: self,
            name,
            cost,
            category,
            magnitude,
        }
    }

    pub fn cost(self) -> u64 {
        self.entry().cost
    }

    pub fn category(self) -> UpgradeCategory {
        self.entry().category
    }

    pub fn magnitude(self) -> f64 {
        self.entry().magnitude
    }
}

// ── Seeds ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedId {
    Carrot,
    Potato,
    Tomato,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seed {
    pub id: SeedId,
    pub name: &'static str,
    pub cost: u64,
    pub growth_secs: u64,
    pub revenue: u64,
}

impl Seed {
    pub fn growth_ms(&self) -> u64 {
        self.growth_secs * 1000
    }
}

impl SeedId {
    pub fn all() -> &'static [SeedId] {
        &[SeedId::Carrot, SeedId::Potato, SeedId::Tomato]
    }

    pub fn seed(self) -> Seed {
        let (name, cost, growth_secs, revenue) = match self {
            SeedId::Carrot => ("Carrot", 5, 60, 10),
            SeedId::Potato => ("Potato", 8, 180, 20),
            SeedId::Tomato => ("Tomato", 12, 300, 35),
        };
        Seed {
            id: self,
            name,
            cost,
            growth_secs,
            revenue,
        }
    }
}
