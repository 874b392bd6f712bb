//! Escape game logic: pure functions, fully testable.

use crate::config::EscapeConfig;
use crate::error::Rejected;
use crate::games::Shared;
use crate::grid::{exit_candidates, generate_escape_grid, manhattan, EscapeKind};
use crate::rng::GameRng;

use super::state::{EscapePhase, EscapeState};

/// What a single action did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Trapped,
    Drank,
    /// Wall took a hit and still stands.
    WallHit { durability: u32 },
    WallBroken,
    Escaped,
}

pub fn setup(shared: &mut Shared) -> EscapeState {
    let config = &shared.config.escape;
    let layout = generate_escape_grid(config, &mut shared.rng);
    let energy = config.initial_energy;
    EscapeState {
        side: layout.side,
        grid: layout.cells,
        player: layout.start,
        energy,
        moves: 0,
        phase: EscapePhase::Active,
        takeover_visible: false,
        tag: shared.fresh_tag(),
    }
}

/// Act on a cell next to the player.
pub fn step(
    state: &mut EscapeState,
    cell: usize,
    config: &EscapeConfig,
) -> Result<StepOutcome, Rejected> {
    if state.is_resolved() {
        return Err(Rejected::WrongPhase);
    }
    if state.energy <= 0 {
        return Err(Rejected::NoEnergy);
    }
    if cell == state.player {
        return Err(Rejected::SelfTarget(cell));
    }
    if cell >= state.grid.len() {
        return Err(Rejected::OutOfBounds(cell));
    }
    if manhattan(state.player, cell, state.side) != 1 {
        return Err(Rejected::NotAdjacent(cell));
    }

    let target = &mut state.grid[cell];
    let outcome = match target.kind {
        EscapeKind::Floor => {
            state.energy -= config.move_cost;
            state.player = cell;
            StepOutcome::Moved
        }
        EscapeKind::Trap => {
            state.energy -= config.move_cost + config.trap_penalty;
            state.player = cell;
            StepOutcome::Trapped
        }
        EscapeKind::Water => {
            state.energy += config.water_bonus - config.move_cost;
            target.kind = EscapeKind::Floor;
            state.player = cell;
            StepOutcome::Drank
        }
        EscapeKind::Wall { durability } => {
            state.energy -= config.break_cost;
            let durability = durability.saturating_sub(1);
            if durability == 0 {
                target.kind = EscapeKind::Floor;
                StepOutcome::WallBroken
            } else {
                target.kind = EscapeKind::Wall { durability };
                StepOutcome::WallHit { durability }
            }
        }
        EscapeKind::Exit => {
            state.energy -= config.break_cost;
            state.phase = EscapePhase::Resolved { escaped: true };
            return Ok(StepOutcome::Escaped);
        }
    };

    state.moves += 1;
    if state.energy <= 0 {
        state.phase = EscapePhase::Resolved { escaped: false };
    }
    Ok(outcome)
}

/// Whether the adversary gets to act after a completed move.
pub fn adversary_due(state: &EscapeState, config: &EscapeConfig, rng: &mut GameRng) -> bool {
    !state.is_resolved()
        && state.moves >= config.adversary_trigger
        && rng.chance(config.adversary_chance)
}

/// Wall up the current exit and open a new one elsewhere on the boundary.
/// Returns the new exit, or `None` (board untouched) if there is nowhere
/// to put it.
pub fn relocate_exit(
    state: &mut EscapeState,
    config: &EscapeConfig,
    rng: &mut GameRng,
) -> Option<usize> {
    let old = state.exit();
    let candidates = exit_candidates(&state.grid, state.side, old);
    let new = rng.pick(&candidates)?;

    if let Some(old) = old {
        state.grid[old].kind = EscapeKind::Wall {
            durability: config.wall_durability,
        };
    }
    state.grid[new].kind = EscapeKind::Exit;
    state.moves = 0;
    Some(new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::grid::EscapeCell;

    /// 6x6 walled room, exit at cell 2, no traps or water, player at 27.
    fn bare_room() -> (EscapeState, EscapeConfig) {
        let config = EscapeConfig {
            traps: 0,
            waters: 0,
            ..EscapeConfig::default()
        };
        let side = config.grid;
        let grid = (0..side * side)
            .map(|index| EscapeCell {
                index,
                kind: if index == 2 {
                    EscapeKind::Exit
                } else if crate::grid::is_boundary(index, side) {
                    EscapeKind::Wall { durability: 3 }
                } else {
                    EscapeKind::Floor
                },
            })
            .collect();
        let state = EscapeState {
            side,
            grid,
            player: config.start_cell(),
            energy: config.initial_energy,
            moves: 0,
            phase: EscapePhase::Active,
            takeover_visible: false,
            tag: 1,
        };
        (state, config)
    }

    #[test]
    fn setup_places_player_on_start() {
        let mut shared = Shared::new(EngineConfig::default(), 8);
        let state = setup(&mut shared);
        assert_eq!(state.player, 27);
        assert_eq!(state.energy, 25);
        assert!(state.exit().is_some());
    }

    #[test]
    fn floor_moves_cost_one() {
        let (mut state, config) = bare_room();
        assert_eq!(step(&mut state, 26, &config), Ok(StepOutcome::Moved));
        assert_eq!(state.player, 26);
        assert_eq!(state.energy, 24);
        assert_eq!(state.moves, 1);
    }

    #[test]
    fn invalid_targets_are_rejected_without_cost() {
        let (mut state, config) = bare_room();
        assert_eq!(step(&mut state, 27, &config), Err(Rejected::SelfTarget(27)));
        assert_eq!(step(&mut state, 14, &config), Err(Rejected::NotAdjacent(14)));
        assert_eq!(step(&mut state, 36, &config), Err(Rejected::OutOfBounds(36)));
        assert_eq!(state.energy, 25);
        assert_eq!(state.moves, 0);
    }

    #[test]
    fn trap_and_water_costs() {
        let (mut state, config) = bare_room();
        state.grid[26].kind = EscapeKind::Trap;
        state.grid[20].kind = EscapeKind::Water;
        assert_eq!(step(&mut state, 26, &config), Ok(StepOutcome::Trapped));
        assert_eq!(state.energy, 25 - 1 - 5);
        assert_eq!(step(&mut state, 20, &config), Ok(StepOutcome::Drank));
        assert_eq!(state.energy, 19 - 1 + 8);
        assert_eq!(state.grid[20].kind, EscapeKind::Floor);
    }

    #[test]
    fn walls_take_three_hits_and_player_stays() {
        let (mut state, config) = bare_room();
        // Row 4, col 2; the wall below is cell 32.
        state.player = 26;
        assert_eq!(step(&mut state, 32, &config), Ok(StepOutcome::WallHit { durability: 2 }));
        assert_eq!(step(&mut state, 32, &config), Ok(StepOutcome::WallHit { durability: 1 }));
        assert_eq!(step(&mut state, 32, &config), Ok(StepOutcome::WallBroken));
        assert_eq!(state.grid[32].kind, EscapeKind::Floor);
        assert_eq!(state.player, 26);
        assert_eq!(state.energy, 25 - 6);
        assert_eq!(state.moves, 3);
    }

    #[test]
    fn exit_resolves_escaped() {
        let (mut state, config) = bare_room();
        state.player = 8; // row 1, col 2; exit at 2 above.
        assert_eq!(step(&mut state, 2, &config), Ok(StepOutcome::Escaped));
        assert_eq!(state.phase, EscapePhase::Resolved { escaped: true });
        assert_eq!(state.energy, 23);
        assert_eq!(state.moves, 0);
        assert_eq!(step(&mut state, 8, &config), Err(Rejected::WrongPhase));
    }

    #[test]
    fn energy_can_go_negative_and_exhausts() {
        let (mut state, config) = bare_room();
        state.energy = 3;
        state.grid[26].kind = EscapeKind::Trap;
        assert_eq!(step(&mut state, 26, &config), Ok(StepOutcome::Trapped));
        assert_eq!(state.energy, -3);
        assert_eq!(state.phase, EscapePhase::Resolved { escaped: false });
    }

    #[test]
    fn relocation_walls_old_exit_and_opens_another() {
        let (mut state, config) = bare_room();
        state.moves = 4;
        let mut rng = GameRng::seeded(3);
        let new = relocate_exit(&mut state, &config, &mut rng).unwrap();
        assert_ne!(new, 2);
        assert_eq!(state.grid[2].kind, EscapeKind::Wall { durability: 3 });
        assert_eq!(state.exit(), Some(new));
        assert!(!crate::grid::is_corner(new, 6));
        assert!(crate::grid::is_boundary(new, 6));
        assert_eq!(state.moves, 0);
    }

    #[test]
    fn adversary_waits_for_trigger() {
        let (mut state, mut config) = bare_room();
        config.adversary_chance = 1.0;
        let mut rng = GameRng::seeded(1);
        state.moves = 3;
        assert!(!adversary_due(&state, &config, &mut rng));
        state.moves = 4;
        assert!(adversary_due(&state, &config, &mut rng));
        state.phase = EscapePhase::Resolved { escaped: false };
        assert!(!adversary_due(&state, &config, &mut rng));
    }
}
