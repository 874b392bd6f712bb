//! Digging game logic. Pure functions over the round state and the shared
//! economy. Timed transitions are scheduled here and delivered back through
//! [`super::DigGame`]'s timer handler.

use crate::bridge::HapticStyle;
use crate::catalog::UpgradeId;
use crate::economy::Ledger;
use crate::error::Rejected;
use crate::games::{GameMode, Shared};
use crate::grid::{generate_dig_grid, Occupant};
use crate::signal::{BonusSource, Signal};
use crate::timer::TimerEvent;

use super::state::{BossFight, DigPhase, DigState};

/// Fresh round for a 1-based level.
pub fn setup(level: u32, shared: &mut Shared) -> DigState {
    let config = shared.config.level(level);
    let (grid, trash_goal) = generate_dig_grid(&config, &mut shared.rng);
    tracing::debug!(level, trash_goal, side = config.grid, "dig level set up");
    DigState {
        level,
        side: config.grid,
        digger: grid.len() / 2,
        grid,
        trash_goal,
        found: Vec::new(),
        phase: DigPhase::Playing,
        hint: None,
        tag: shared.fresh_tag(),
    }
}

/// Reveal delay, shortened by the shovel upgrade.
pub fn dig_duration_ms(base_ms: u64, ledger: &Ledger) -> u64 {
    if ledger.owns(UpgradeId::FasterDig) {
        (base_ms as f64 * (1.0 - UpgradeId::FasterDig.magnitude())).round() as u64
    } else {
        base_ms
    }
}

/// Start digging an unrevealed cell.
pub fn dig(state: &mut DigState, cell: usize, shared: &mut Shared) -> Result<(), Rejected> {
    if state.phase != DigPhase::Playing {
        return Err(Rejected::WrongPhase);
    }
    let target = state.grid.get(cell).ok_or(Rejected::OutOfBounds(cell))?;
    if target.revealed {
        return Err(Rejected::AlreadyRevealed(cell));
    }

    state.digger = cell;
    state.phase = DigPhase::Digging { cell };
    state.tag = shared.fresh_tag();
    let delay = dig_duration_ms(shared.config.dig.base_dig_ms, &shared.ledger);
    shared.schedule(GameMode::Dig, state.tag, delay, TimerEvent::DigReveal { cell });
    shared.haptic(HapticStyle::Medium);
    Ok(())
}

/// The dig timer fired: uncover the cell and apply what was under it.
pub fn reveal(state: &mut DigState, cell: usize, shared: &mut Shared) {
    if state.phase != (DigPhase::Digging { cell }) {
        return;
    }
    let Some(spot) = state.grid.get_mut(cell) else {
        return;
    };
    spot.revealed = true;
    let occupant = spot.occupant;
    if state.hint == Some(cell) {
        state.hint = None;
    }
    state.phase = DigPhase::Playing;

    if let Some(item) = occupant.item() {
        shared.haptic(HapticStyle::Light);
        shared.signal(Signal::Found { cell, item });
    }

    match occupant {
        Occupant::Empty | Occupant::Decoy(_) => {}
        Occupant::Trap(_) => {
            state.phase = DigPhase::Muzzled;
            state.tag = shared.fresh_tag();
            let delay = shared.config.dig.muzzle_ms;
            shared.schedule(GameMode::Dig, state.tag, delay, TimerEvent::MuzzleEnd);
        }
        Occupant::Trash(item) => {
            state.found.push(item);
            roll_luck(shared);

            if state.found.len() >= state.trash_goal {
                complete_level(state, shared);
            } else if shared.config.dig.adversary_enabled
                && shared.rng.chance(shared.config.dig.adversary_chance)
            {
                start_boss(state, shared);
            } else {
                roll_hint(state, shared);
            }
        }
    }
}

fn roll_luck(shared: &mut Shared) {
    if !shared.ledger.owns(UpgradeId::LuckyCharm)
        || !shared.rng.chance(UpgradeId::LuckyCharm.magnitude())
    {
        return;
    }
    let coins = shared.rng.between(1, shared.config.dig.luck_bonus_max.max(1));
    shared.ledger.grant(coins);
    shared.signal(Signal::Bonus {
        coins,
        source: BonusSource::LuckyCharm,
    });
}

fn roll_hint(state: &mut DigState, shared: &mut Shared) {
    if !shared.ledger.owns(UpgradeId::Compass)
        || !shared.rng.chance(UpgradeId::Compass.magnitude())
    {
        return;
    }
    let buried: Vec<usize> = state
        .grid
        .iter()
        .filter(|c| !c.revealed && c.occupant.is_trash())
        .map(|c| c.index)
        .collect();
    if let Some(cell) = shared.rng.pick(&buried) {
        state.hint = Some(cell);
        shared.signal(Signal::Hint { cell });
    }
}

/// Artem steals the latest find and poses a single-digit sum.
fn start_boss(state: &mut DigState, shared: &mut Shared) {
    let Some(stolen) = state.found.pop() else {
        return;
    };
    let a = shared.rng.between(1, 9) as u32;
    let b = shared.rng.between(1, 9) as u32;
    let limit = shared.config.dig.boss_time_limit_ms;
    state.phase = DigPhase::BossFight(BossFight {
        a,
        b,
        stolen,
        deadline_ms: shared.now_ms.saturating_add(limit),
    });
    state.tag = shared.fresh_tag();
    shared.schedule(GameMode::Dig, state.tag, limit, TimerEvent::BossTimeout);
    shared.haptic(HapticStyle::Error);
    tracing::debug!(a, b, stolen = stolen.id, "boss fight");
}

/// Answer the boss. Returns whether the item was recovered; an answer at or
/// past the deadline counts as a timeout.
pub fn answer_boss(state: &mut DigState, answer: u32, shared: &mut Shared) -> Result<bool, Rejected> {
    let DigPhase::BossFight(fight) = state.phase else {
        return Err(Rejected::WrongPhase);
    };
    if shared.now_ms >= fight.deadline_ms {
        tracing::debug!(deadline = fight.deadline_ms, now = shared.now_ms, "boss answer too late");
        forfeit(state, shared);
        return Ok(false);
    }
    if answer != fight.answer() {
        forfeit(state, shared);
        return Ok(false);
    }
    state.found.push(fight.stolen);
    let reward = shared.config.dig.boss_reward;
    shared.ledger.grant(reward);
    shared.haptic(HapticStyle::Success);
    shared.signal(Signal::Bonus {
        coins: reward,
        source: BonusSource::BossDefeated,
    });
    state.phase = DigPhase::Playing;
    state.tag = shared.fresh_tag();
    Ok(true)
}

/// Time ran out: the stolen item is gone.
pub fn boss_timeout(state: &mut DigState, shared: &mut Shared) {
    if let DigPhase::BossFight(_) = state.phase {
        forfeit(state, shared);
    }
}

/// The stolen item is lost for good. Its cell is already dug, so the goal
/// shrinks with it and the level stays winnable.
fn forfeit(state: &mut DigState, shared: &mut Shared) {
    state.trash_goal = state.trash_goal.saturating_sub(1);
    state.phase = DigPhase::Playing;
    state.tag = shared.fresh_tag();
    shared.haptic(HapticStyle::Warning);
    if state.found.len() >= state.trash_goal {
        complete_level(state, shared);
    }
}

pub fn muzzle_end(state: &mut DigState) {
    if state.phase == DigPhase::Muzzled {
        state.phase = DigPhase::Playing;
    }
}

/// Pay out the round, tire the companion and advance the level counter.
fn complete_level(state: &mut DigState, shared: &mut Shared) {
    let earnings = state.earnings();
    shared.ledger.grant(earnings);
    let mood = shared.mood.decay();
    shared.level = state.level + 1;
    state.phase = DigPhase::LevelComplete { earnings };
    state.hint = None;
    shared.signal(Signal::LevelComplete {
        level: state.level,
        earnings,
    });
    tracing::info!(level = state.level, earnings, mood, "dig level complete");
}

/// Leave the level-complete screen for the next level.
pub fn next_level(state: &mut DigState, shared: &mut Shared) -> Result<(), Rejected> {
    if !matches!(state.phase, DigPhase::LevelComplete { .. }) {
        return Err(Rejected::WrongPhase);
    }
    *state = setup(shared.level, shared);
    shared.haptic(HapticStyle::Soft);
    Ok(())
}
