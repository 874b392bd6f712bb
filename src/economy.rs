//! Coin ledger: balance, owned upgrades and equipped cosmetics.
//!
//! Every transaction checks all of its preconditions before touching any
//! field, so a rejected call leaves the ledger exactly as it was.

use std::collections::BTreeSet;

use crate::catalog::{UpgradeCategory, UpgradeId};
use crate::error::Rejected;
use crate::mood::Mood;

/// What a successful purchase did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Purchase {
    /// Added to the owned set (cosmetics are also equipped).
    Owned(UpgradeId),
    /// Consumable mood treat; carries the new mood value.
    MoodBoosted(u32),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    coins: u64,
    purchased: BTreeSet<UpgradeId>,
    equipped: BTreeSet<UpgradeId>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from saved parts. Equipped entries that are not owned
    /// cosmetics are dropped; mood treats are never "owned".
    pub fn from_parts(
        coins: u64,
        purchased: impl IntoIterator<Item = UpgradeId>,
        equipped: impl IntoIterator<Item = UpgradeId>,
    ) -> Self {
        let purchased: BTreeSet<UpgradeId> = purchased
            .into_iter()
            .filter(|id| id.category() != UpgradeCategory::MoodBoost)
            .collect();
        let equipped = equipped
            .into_iter()
            .filter(|id| id.category() == UpgradeCategory::Cosmetic && purchased.contains(id))
            .collect();
        Self {
            coins,
            purchased,
            equipped,
        }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn owns(&self, id: UpgradeId) -> bool {
        self.purchased.contains(&id)
    }

    pub fn is_equipped(&self, id: UpgradeId) -> bool {
        self.equipped.contains(&id)
    }

    pub fn purchased(&self) -> &BTreeSet<UpgradeId> {
        &self.purchased
    }

    pub fn equipped(&self) -> &BTreeSet<UpgradeId> {
        &self.equipped
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.coins >= amount
    }

    pub fn grant(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub fn spend(&mut self, amount: u64) -> Result<(), Rejected> {
        if !self.can_afford(amount) {
            return Err(Rejected::InsufficientCoins {
                need: amount,
                have: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }

    /// Buy an upgrade. Mood treats are repeatable while mood is below max;
    /// everything else can be bought once.
    pub fn purchase(&mut self, id: UpgradeId, mood: &mut Mood) -> Result<Purchase, Rejected> {
        let upgrade = id.entry();

        if upgrade.category == UpgradeCategory::MoodBoost {
            if mood.is_full() {
                return Err(Rejected::MoodFull);
            }
            self.spend(upgrade.cost)?;
            return Ok(Purchase::MoodBoosted(mood.boost()));
        }

        if self.owns(id) {
            return Err(Rejected::AlreadyOwned(id));
        }
        self.spend(upgrade.cost)?;
        self.purchased.insert(id);
        if upgrade.category == UpgradeCategory::Cosmetic {
            self.equipped.insert(id);
        }
        Ok(Purchase::Owned(id))
    }

    /// Flip an owned cosmetic on or off. Returns whether it is now equipped.
    pub fn toggle_equip(&mut self, id: UpgradeId) -> Result<bool, Rejected> {
        if id.category() != UpgradeCategory::Cosmetic {
            return Err(Rejected::NotCosmetic(id));
        }
        if !self.owns(id) {
            return Err(Rejected::NotOwned(id));
        }
        if self.equipped.remove(&id) {
            Ok(false)
        } else {
            self.equipped.insert(id);
            Ok(true)
        }
    }
}
