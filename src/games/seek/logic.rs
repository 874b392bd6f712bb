//! Hide-and-seek logic: pure functions, fully testable.

use crate::catalog::UpgradeId;
use crate::economy::Ledger;
use crate::error::Rejected;
use crate::games::Shared;
use crate::grid::generate_search_grid;

use super::state::{SeekPhase, SeekState};

/// Attempts for a round: base plus the companion bonus when owned.
pub fn attempts(base: u32, ledger: &Ledger) -> u32 {
    if ledger.owns(UpgradeId::ExtraAttempt) {
        base + UpgradeId::ExtraAttempt.magnitude() as u32
    } else {
        base
    }
}

/// Cold cells revealed for free at the start of a round.
pub fn free_reveals(ledger: &Ledger) -> usize {
    if ledger.owns(UpgradeId::CloserStart) {
        UpgradeId::CloserStart.magnitude() as usize
    } else {
        0
    }
}

pub fn setup(shared: &mut Shared) -> SeekState {
    let side = shared.config.seek.grid;
    let (grid, target) = generate_search_grid(
        side,
        free_reveals(&shared.ledger),
        shared.config.seek.cold_distance,
        &mut shared.rng,
    );
    SeekState {
        side,
        grid,
        target,
        attempts_left: attempts(shared.config.seek.attempts, &shared.ledger),
        phase: SeekPhase::Searching,
        tag: shared.fresh_tag(),
    }
}

/// Search one cell. Returns the revealed distance clue.
pub fn search(state: &mut SeekState, cell: usize) -> Result<u32, Rejected> {
    if state.is_resolved() {
        return Err(Rejected::WrongPhase);
    }
    if state.attempts_left == 0 {
        return Err(Rejected::NoAttemptsLeft);
    }
    let target = state.grid.get_mut(cell).ok_or(Rejected::OutOfBounds(cell))?;
    if target.revealed {
        return Err(Rejected::AlreadyRevealed(cell));
    }

    target.revealed = true;
    let distance = target.distance;
    state.attempts_left -= 1;

    if distance == 0 {
        state.phase = SeekPhase::Resolved { found: true };
    } else if state.attempts_left == 0 {
        state.phase = SeekPhase::Resolved { found: false };
    }
    Ok(distance)
}
