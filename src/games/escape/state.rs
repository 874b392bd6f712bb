//! Escape game state definitions.

use crate::grid::{EscapeCell, EscapeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapePhase {
    Active,
    /// `escaped == false` means the energy ran out.
    Resolved { escaped: bool },
}

#[derive(Clone, Debug)]
pub struct EscapeState {
    pub side: usize,
    pub grid: Vec<EscapeCell>,
    pub player: usize,
    /// Costs apply unconditionally, so this can go negative.
    pub energy: i32,
    /// Completed non-exit actions since the adversary last struck.
    pub moves: u32,
    pub phase: EscapePhase,
    /// The takeover notice is on screen.
    pub takeover_visible: bool,
    pub tag: u64,
}

impl EscapeState {
    pub fn exit(&self) -> Option<usize> {
        self.grid
            .iter()
            .find(|c| c.kind == EscapeKind::Exit)
            .map(|c| c.index)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, EscapePhase::Resolved { .. })
    }
}
