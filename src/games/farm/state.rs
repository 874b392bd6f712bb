//! Farm state: seed plots and the free bonus plot.

use crate::catalog::SeedId;
use crate::time::elapsed_ms;

/// A seed in the ground since `planted_at` (ms since epoch).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Planting {
    pub seed: SeedId,
    pub planted_at: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FarmPlot {
    pub id: usize,
    /// `None` when the plot is empty.
    pub planting: Option<Planting>,
}

impl FarmPlot {
    pub fn empty(id: usize) -> Self {
        Self { id, planting: None }
    }

    pub fn is_empty(&self) -> bool {
        self.planting.is_none()
    }

    /// Ms until harvestable; 0 when ready. `None` for an empty plot.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        let p = self.planting?;
        Some(p.seed.seed().growth_ms().saturating_sub(elapsed_ms(p.planted_at, now_ms)))
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        self.remaining_ms(now_ms) == Some(0)
    }
}

/// The cucumber patch: free coins on a cooldown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BonusPlot {
    pub last_harvest: Option<u64>,
}

impl BonusPlot {
    /// Ms until the next harvest; 0 when ready (always ready if never harvested).
    pub fn remaining_ms(&self, now_ms: u64, cooldown_ms: u64) -> u64 {
        match self.last_harvest {
            None => 0,
            Some(t) => cooldown_ms.saturating_sub(elapsed_ms(t, now_ms)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FarmState {
    pub plots: Vec<FarmPlot>,
    pub bonus: BonusPlot,
}

impl FarmState {
    pub fn new(plots: usize) -> Self {
        Self {
            plots: (0..plots).map(FarmPlot::empty).collect(),
            bonus: BonusPlot::default(),
        }
    }
}
