//! Game trait, shared engine state and minigame selection.

pub mod dig;
pub mod escape;
pub mod farm;
pub mod seek;

use crate::bridge::HapticStyle;
use crate::config::EngineConfig;
use crate::economy::Ledger;
use crate::error::Rejected;
use crate::input::Intent;
use crate::mood::Mood;
use crate::rng::GameRng;
use crate::signal::Signal;
use crate::timer::{TimerEvent, TimerQueue, Token};

use dig::DigGame;
use escape::EscapeGame;
use farm::state::FarmState;
use farm::FarmGame;
use seek::SeekGame;

/// Which minigame is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameMode {
    Dig,
    HideSeek,
    Escape,
    Farm,
}

/// Trait that all minigames implement.
pub trait Game {
    fn mode(&self) -> GameMode;

    /// Current state tag. Timers scheduled under another tag are stale.
    fn tag(&self) -> u64;

    /// Apply a player intent. On `Err` nothing has changed.
    fn handle_input(&mut self, intent: &Intent, shared: &mut Shared) -> Result<(), Rejected>;

    /// A timer scheduled under the current tag came due.
    fn on_timer(&mut self, event: TimerEvent, shared: &mut Shared);
}

/// Everything that outlives a single round: economy, mood, progress, farm
/// plots, plus the engine plumbing every game needs.
pub struct Shared {
    pub config: EngineConfig,
    pub ledger: Ledger,
    pub mood: Mood,
    /// Next digging level to play (1-based).
    pub level: u32,
    pub farm: FarmState,
    pub rng: GameRng,
    pub timers: TimerQueue,
    pub signals: Vec<Signal>,
    /// Time of the event being processed, in ms since the epoch.
    pub now_ms: u64,
    next_tag: u64,
}

impl Shared {
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        let mood = Mood::new(&config.mood);
        let farm = FarmState::new(config.farm.plots);
        Self {
            config,
            ledger: Ledger::new(),
            mood,
            level: 1,
            farm,
            rng: GameRng::seeded(seed),
            timers: TimerQueue::new(),
            signals: Vec::new(),
            now_ms: 0,
            next_tag: 1,
        }
    }

    /// A tag no earlier state has used.
    pub fn fresh_tag(&mut self) -> u64 {
        let tag = self.next_tag;
        self.next_tag += 1;
        tag
    }

    pub fn schedule(&mut self, mode: GameMode, tag: u64, delay_ms: u64, event: TimerEvent) {
        let due = self.now_ms.saturating_add(delay_ms);
        self.timers.schedule(due, Token { mode, tag }, event);
    }

    pub fn signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    pub fn haptic(&mut self, style: HapticStyle) {
        self.signals.push(Signal::Haptic(style));
    }
}

/// The active minigame.
pub enum ActiveGame {
    Dig(DigGame),
    Seek(SeekGame),
    Escape(EscapeGame),
    Farm(FarmGame),
}

impl ActiveGame {
    pub fn game(&self) -> &dyn Game {
        match self {
            ActiveGame::Dig(g) => g,
            ActiveGame::Seek(g) => g,
            ActiveGame::Escape(g) => g,
            ActiveGame::Farm(g) => g,
        }
    }

    pub fn game_mut(&mut self) -> &mut dyn Game {
        match self {
            ActiveGame::Dig(g) => g,
            ActiveGame::Seek(g) => g,
            ActiveGame::Escape(g) => g,
            ActiveGame::Farm(g) => g,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.game().mode()
    }
}
