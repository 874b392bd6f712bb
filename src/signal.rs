//! One-shot notifications for the presentation layer.
//!
//! State answers "what does the board look like"; signals answer "what just
//! happened" (a coin popup, a toast, a vibration). The session forwards
//! haptics to the host bridge and queues the rest for
//! [`crate::Session::take_signals`].

use crate::bridge::HapticStyle;
use crate::catalog::Item;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusSource {
    LuckyCharm,
    BossDefeated,
    Harvest,
    BonusPlot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Haptic(HapticStyle),
    /// A buried item was uncovered (trash, decoy or trap).
    Found { cell: usize, item: &'static Item },
    Bonus { coins: u64, source: BonusSource },
    /// The escape adversary moved the exit.
    Takeover,
    /// Compass points at a still-buried trash cell.
    Hint { cell: usize },
    /// Bonus plot tapped too early.
    Cooldown { remaining_ms: u64 },
    LevelComplete { level: u32, earnings: u64 },
}
