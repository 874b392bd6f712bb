//! Digging game state definitions.

use crate::catalog::Item;
use crate::grid::DigCell;

/// Artem's ambush: he stole the last find and wants a sum answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossFight {
    pub a: u32,
    pub b: u32,
    pub stolen: &'static Item,
    pub deadline_ms: u64,
}

impl BossFight {
    pub fn answer(&self) -> u32 {
        self.a + self.b
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigPhase {
    Playing,
    /// Waiting for the reveal timer on `cell`.
    Digging { cell: usize },
    /// Digging disabled until the muzzle timer fires.
    Muzzled,
    BossFight(BossFight),
    /// Earnings already granted; waiting for next level or the store.
    LevelComplete { earnings: u64 },
}

#[derive(Clone, Debug)]
pub struct DigState {
    pub level: u32,
    pub side: usize,
    pub grid: Vec<DigCell>,
    pub trash_goal: usize,
    pub found: Vec<&'static Item>,
    pub phase: DigPhase,
    /// Where Stepan stands; starts mid-grid and follows each dig.
    pub digger: usize,
    /// Buried trash cell pointed out by the compass.
    pub hint: Option<usize>,
    pub tag: u64,
}

impl DigState {
    pub fn earnings(&self) -> u64 {
        self.found.iter().map(|i| i.coin_value).sum()
    }
}
