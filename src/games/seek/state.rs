//! Hide-and-seek state definitions.

use crate::grid::SearchCell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekPhase {
    Searching,
    /// Terminal until play-again or menu.
    Resolved { found: bool },
}

#[derive(Clone, Debug)]
pub struct SeekState {
    pub side: usize,
    pub grid: Vec<SearchCell>,
    pub target: usize,
    pub attempts_left: u32,
    pub phase: SeekPhase,
    pub tag: u64,
}

impl SeekState {
    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, SeekPhase::Resolved { .. })
    }
}
