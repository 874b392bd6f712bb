//! Player intents, normalized from whatever the presentation layer captures
//! (taps on grid cells, buttons, keyboard).
//!
//! This module is game-agnostic. The session routes each intent to the
//! store or to the active game.

use crate::catalog::{SeedId, UpgradeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    // Digging
    Dig(usize),
    AnswerBoss(u32),
    NextLevel,

    // Hide-and-seek
    Search(usize),

    // Escape
    Step(usize),

    // Farm
    Plant { plot: usize, seed: SeedId },
    Harvest(usize),
    HarvestBonus,

    // Store
    Buy(UpgradeId),
    ToggleEquip(UpgradeId),
    CloseStore,
}

impl Intent {
    /// Intents handled by the store rather than a minigame.
    pub fn is_store(&self) -> bool {
        matches!(
            self,
            Intent::Buy(_) | Intent::ToggleEquip(_) | Intent::CloseStore
        )
    }
}
