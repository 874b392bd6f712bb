//! Farm: plant seeds, come back later, harvest.
//!
//! The plots live in [`Shared`] because they persist across sessions and
//! keep growing while another minigame (or nothing) is active.

pub mod logic;
pub mod state;

use crate::bridge::HapticStyle;
use crate::error::Rejected;
use crate::games::{Game, GameMode, Shared};
use crate::input::Intent;
use crate::signal::{BonusSource, Signal};
use crate::timer::TimerEvent;

#[derive(Clone, Copy, Debug, Default)]
pub struct FarmGame;

impl FarmGame {
    pub fn new() -> Self {
        Self
    }
}

impl Game for FarmGame {
    fn mode(&self) -> GameMode {
        GameMode::Farm
    }

    fn tag(&self) -> u64 {
        0
    }

    fn handle_input(&mut self, intent: &Intent, shared: &mut Shared) -> Result<(), Rejected> {
        let now = shared.now_ms;
        match *intent {
            Intent::Plant { plot, seed } => {
                logic::plant(&mut shared.farm, &mut shared.ledger, plot, seed, now)?;
                shared.haptic(HapticStyle::Light);
            }
            Intent::Harvest(plot) => {
                let coins = logic::harvest(&mut shared.farm, &mut shared.ledger, plot, now)?;
                shared
                    .signals
                    .extend(logic::harvest_signals(coins, BonusSource::Harvest));
            }
            Intent::HarvestBonus => {
                let reward = shared.config.farm.bonus_reward;
                let cooldown = shared.config.farm.bonus_cooldown_ms;
                match logic::harvest_bonus(&mut shared.farm, &mut shared.ledger, reward, cooldown, now) {
                    Ok(coins) => shared
                        .signals
                        .extend(logic::harvest_signals(coins, BonusSource::BonusPlot)),
                    Err(e) => {
                        if let Rejected::NotReady { remaining_ms } = e {
                            shared.haptic(HapticStyle::Warning);
                            shared.signal(Signal::Cooldown { remaining_ms });
                        }
                        return Err(e);
                    }
                }
            }
            _ => return Err(Rejected::Unsupported),
        }
        Ok(())
    }

    fn on_timer(&mut self, _event: TimerEvent, _shared: &mut Shared) {}
}
