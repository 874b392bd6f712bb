//! Farm logic: pure functions over the ledger and the plots.
//!
//! Growth is never simulated: readiness is `now - planted_at`, so time spent
//! with the app closed counts automatically.

use crate::bridge::HapticStyle;
use crate::catalog::SeedId;
use crate::economy::Ledger;
use crate::error::Rejected;
use crate::signal::{BonusSource, Signal};

use super::state::{FarmState, Planting};

/// Plant a seed in an empty plot, paying its cost.
pub fn plant(
    farm: &mut FarmState,
    ledger: &mut Ledger,
    plot: usize,
    seed: SeedId,
    now_ms: u64,
) -> Result<(), Rejected> {
    let target = farm.plots.get_mut(plot).ok_or(Rejected::UnknownPlot(plot))?;
    if !target.is_empty() {
        return Err(Rejected::PlotOccupied(plot));
    }
    ledger.spend(seed.seed().cost)?;
    target.planting = Some(Planting {
        seed,
        planted_at: now_ms,
    });
    Ok(())
}

/// Harvest a grown plot. Returns the revenue granted.
pub fn harvest(
    farm: &mut FarmState,
    ledger: &mut Ledger,
    plot: usize,
    now_ms: u64,
) -> Result<u64, Rejected> {
    let target = farm.plots.get_mut(plot).ok_or(Rejected::UnknownPlot(plot))?;
    let Some(planting) = target.planting else {
        return Err(Rejected::PlotEmpty(plot));
    };
    let remaining_ms = target.remaining_ms(now_ms).unwrap_or(0);
    if remaining_ms > 0 {
        return Err(Rejected::NotReady { remaining_ms });
    }
    let revenue = planting.seed.seed().revenue;
    ledger.grant(revenue);
    target.planting = None;
    Ok(revenue)
}

/// Collect the bonus plot if its cooldown has passed. Returns the reward.
pub fn harvest_bonus(
    farm: &mut FarmState,
    ledger: &mut Ledger,
    reward: u64,
    cooldown_ms: u64,
    now_ms: u64,
) -> Result<u64, Rejected> {
    let remaining_ms = farm.bonus.remaining_ms(now_ms, cooldown_ms);
    if remaining_ms > 0 {
        return Err(Rejected::NotReady { remaining_ms });
    }
    ledger.grant(reward);
    farm.bonus.last_harvest = Some(now_ms);
    Ok(reward)
}

/// Feedback for a finished harvest.
pub fn harvest_signals(coins: u64, source: BonusSource) -> [Signal; 2] {
    [
        Signal::Haptic(HapticStyle::Success),
        Signal::Bonus { coins, source },
    ]
}
