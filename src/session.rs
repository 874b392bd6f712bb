//! Top-level controller: owns all state, routes intents, fires timers and
//! writes the snapshot after every state-affecting action.
//!
//! The session is a single logical actor. The embedder calls entry points
//! and [`Session::handle`] on user input, and [`Session::update`] whenever
//! it wants due timers to fire (an animation frame, an interval, or just
//! before the next input).

use crate::bridge::{HapticStyle, HostBridge};
use crate::config::EngineConfig;
use crate::economy::{Ledger, Purchase};
use crate::error::Rejected;
use crate::games::dig::state::DigState;
use crate::games::dig::{self, DigGame};
use crate::games::escape::state::EscapeState;
use crate::games::escape::EscapeGame;
use crate::games::farm::state::FarmState;
use crate::games::farm::FarmGame;
use crate::games::seek::state::SeekState;
use crate::games::seek::SeekGame;
use crate::games::{ActiveGame, GameMode, Shared};
use crate::input::Intent;
use crate::mood::Mood;
use crate::save::{Gateway, SaveSnapshot};
use crate::signal::Signal;
use crate::store::SaveStore;
use crate::time::Clock;

/// Where the store was opened from; decides what closing it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOrigin {
    Menu,
    /// Closing continues to the next digging level.
    LevelComplete,
}

pub struct Session {
    shared: Shared,
    active: Option<ActiveGame>,
    store: Option<StoreOrigin>,
    gateway: Gateway,
    clock: Box<dyn Clock>,
    bridge: Box<dyn HostBridge>,
    display_name: Option<String>,
    has_save: bool,
    pending: Vec<Signal>,
}

impl Session {
    /// Seeds randomness from the clock.
    pub fn new(
        config: EngineConfig,
        store: Box<dyn SaveStore>,
        clock: Box<dyn Clock>,
        bridge: Box<dyn HostBridge>,
    ) -> Self {
        let seed = clock.now_ms();
        Self::with_seed(config, store, clock, bridge, seed)
    }

    pub fn with_seed(
        config: EngineConfig,
        store: Box<dyn SaveStore>,
        clock: Box<dyn Clock>,
        bridge: Box<dyn HostBridge>,
        seed: u64,
    ) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!(error = %e, "invalid engine config, using defaults");
                EngineConfig::default()
            }
        };
        bridge.ready();
        let display_name = bridge.display_name();

        let mut shared = Shared::new(config, seed);
        shared.now_ms = clock.now_ms();

        let mut session = Self {
            shared,
            active: None,
            store: None,
            gateway: Gateway::new(store),
            clock,
            bridge,
            display_name,
            has_save: false,
            pending: Vec::new(),
        };
        session.reload();
        session
    }

    // ── Entry points ──────────────────────────────────────────

    /// Wipe progress and start digging from level 1.
    pub fn start_new(&mut self) {
        self.tick_clock();
        self.gateway.clear();
        self.hydrate(SaveSnapshot::defaults(&self.shared.config));
        tracing::info!("starting a new game");
        let game = DigGame::new(&mut self.shared);
        self.enter(ActiveGame::Dig(game));
    }

    /// Reload saved progress and resume digging at the saved level.
    pub fn continue_game(&mut self) {
        self.tick_clock();
        self.reload();
        tracing::info!(level = self.shared.level, "continuing");
        let game = DigGame::new(&mut self.shared);
        self.enter(ActiveGame::Dig(game));
    }

    pub fn start_hide_and_seek(&mut self) {
        self.tick_clock();
        let game = SeekGame::new(&mut self.shared);
        self.enter(ActiveGame::Seek(game));
    }

    pub fn start_escape(&mut self) {
        self.tick_clock();
        let game = EscapeGame::new(&mut self.shared);
        self.enter(ActiveGame::Escape(game));
    }

    pub fn start_farm(&mut self) {
        self.tick_clock();
        self.enter(ActiveGame::Farm(FarmGame::new()));
    }

    /// Fresh round of the active hide-and-seek or escape game.
    pub fn play_again(&mut self) -> Result<(), Rejected> {
        match self.mode() {
            Some(GameMode::HideSeek) => self.start_hide_and_seek(),
            Some(GameMode::Escape) => self.start_escape(),
            Some(_) => return Err(self.reject(Rejected::Unsupported)),
            None => return Err(self.reject(Rejected::NoActiveGame)),
        }
        Ok(())
    }

    /// Open the store from the menu or from a completed digging level.
    pub fn go_to_store(&mut self) -> Result<(), Rejected> {
        if self.store.is_some() {
            return Err(self.reject(Rejected::WrongPhase));
        }
        let origin = match &self.active {
            None => StoreOrigin::Menu,
            Some(ActiveGame::Dig(g)) if g.is_level_complete() => StoreOrigin::LevelComplete,
            Some(_) => return Err(self.reject(Rejected::WrongPhase)),
        };
        self.store = Some(origin);
        self.notify(HapticStyle::Soft);
        tracing::debug!(?origin, "store opened");
        Ok(())
    }

    pub fn return_to_menu(&mut self) {
        self.active = None;
        self.store = None;
        self.shared.timers.clear();
        self.notify(HapticStyle::Soft);
    }

    // ── Intents and timers ────────────────────────────────────

    /// Apply a player intent. Timers that came due first are fired, so a
    /// late input sees the state the timers left behind. Rejections leave
    /// every piece of state as it was; successful intents are persisted
    /// immediately.
    pub fn handle(&mut self, intent: Intent) -> Result<(), Rejected> {
        let now = self.clock.now_ms();
        let fired = self.fire_due(now);
        let result = if intent.is_store() {
            self.handle_store(intent)
        } else if self.store.is_some() {
            Err(Rejected::WrongPhase)
        } else {
            match self.active.as_mut() {
                Some(active) => active.game_mut().handle_input(&intent, &mut self.shared),
                None => Err(Rejected::NoActiveGame),
            }
        };

        match &result {
            Ok(()) => self.persist(),
            Err(e) => {
                tracing::debug!(?intent, reason = %e, "intent rejected");
                if fired > 0 {
                    self.persist();
                }
            }
        }
        self.flush_signals();
        result
    }

    fn handle_store(&mut self, intent: Intent) -> Result<(), Rejected> {
        let Some(origin) = self.store else {
            return Err(Rejected::StoreClosed);
        };
        match intent {
            Intent::Buy(id) => {
                let purchase = self.shared.ledger.purchase(id, &mut self.shared.mood)?;
                self.shared.haptic(HapticStyle::Light);
                match purchase {
                    Purchase::Owned(id) => tracing::info!(?id, "upgrade purchased"),
                    Purchase::MoodBoosted(mood) => tracing::info!(mood, "mood boosted"),
                }
            }
            Intent::ToggleEquip(id) => {
                let equipped = self.shared.ledger.toggle_equip(id)?;
                self.shared.haptic(HapticStyle::Light);
                tracing::debug!(?id, equipped, "cosmetic toggled");
            }
            Intent::CloseStore => {
                match origin {
                    StoreOrigin::LevelComplete => {
                        if let Some(ActiveGame::Dig(game)) = self.active.as_mut() {
                            dig::logic::next_level(&mut game.state, &mut self.shared)?;
                        }
                    }
                    StoreOrigin::Menu => {
                        self.active = None;
                        self.shared.timers.clear();
                        self.shared.haptic(HapticStyle::Soft);
                    }
                }
                self.store = None;
            }
            _ => return Err(Rejected::Unsupported),
        }
        Ok(())
    }

    /// Fire every timer that is due by now. Returns how many fired.
    pub fn update(&mut self) -> usize {
        let now = self.clock.now_ms();
        let fired = self.fire_due(now);
        if fired > 0 {
            self.persist();
        }
        self.flush_signals();
        fired
    }

    /// Signals raised since the last call, oldest first. Haptics are sent
    /// straight to the host bridge and do not appear here.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.pending)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Option<GameMode> {
        self.active.as_ref().map(ActiveGame::mode)
    }

    pub fn store_origin(&self) -> Option<StoreOrigin> {
        self.store
    }

    pub fn is_store_open(&self) -> bool {
        self.store.is_some()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    pub fn coins(&self) -> u64 {
        self.shared.ledger.coins()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.shared.ledger
    }

    pub fn mood(&self) -> &Mood {
        &self.shared.mood
    }

    /// Next digging level to play.
    pub fn level(&self) -> u32 {
        self.shared.level
    }

    pub fn farm(&self) -> &FarmState {
        &self.shared.farm
    }

    pub fn dig(&self) -> Option<&DigState> {
        match &self.active {
            Some(ActiveGame::Dig(g)) => Some(&g.state),
            _ => None,
        }
    }

    pub fn seek(&self) -> Option<&SeekState> {
        match &self.active {
            Some(ActiveGame::Seek(g)) => Some(&g.state),
            _ => None,
        }
    }

    pub fn escape(&self) -> Option<&EscapeState> {
        match &self.active {
            Some(ActiveGame::Escape(g)) => Some(&g.state),
            _ => None,
        }
    }

    /// When the next timer comes due, so the embedder can sleep until then.
    pub fn next_timer_due(&self) -> Option<u64> {
        self.shared.timers.next_due()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Whether "continue" has anything to continue.
    pub fn has_save(&self) -> bool {
        self.has_save
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn snapshot(&self) -> SaveSnapshot {
        SaveSnapshot {
            level: self.shared.level,
            coins: self.shared.ledger.coins(),
            purchased_upgrades: self.shared.ledger.purchased().clone(),
            equipped_cosmetics: self.shared.ledger.equipped().clone(),
            mood: self.shared.mood.value(),
            farm_plots: self.shared.farm.plots.clone(),
            bonus_plot: self.shared.farm.bonus,
        }
    }

    // ── Internals ─────────────────────────────────────────────

    fn tick_clock(&mut self) {
        self.shared.now_ms = self.clock.now_ms();
    }

    /// Switch minigame. Pending timers belong to the old one.
    fn enter(&mut self, game: ActiveGame) {
        tracing::debug!(mode = ?game.mode(), "entering minigame");
        self.shared.timers.clear();
        self.store = None;
        self.active = Some(game);
        self.notify(HapticStyle::Soft);
        self.persist();
    }

    /// Fire due timers in order, each at its own due time, and leave the
    /// shared clock at `now`.
    fn fire_due(&mut self, now: u64) -> usize {
        let mut fired = 0;
        while let Some((due, token, event)) = self.shared.timers.pop_due(now) {
            self.shared.now_ms = due;
            let Some(active) = self.active.as_mut() else {
                continue;
            };
            let game = active.game_mut();
            if game.mode() != token.mode || game.tag() != token.tag {
                tracing::debug!(?token, ?event, "stale timer dropped");
                continue;
            }
            game.on_timer(event, &mut self.shared);
            fired += 1;
        }
        self.shared.now_ms = now;
        fired
    }

    fn reload(&mut self) {
        if let Some(snapshot) = self.gateway.load(&self.shared.config) {
            self.hydrate(snapshot);
            self.has_save = true;
        } else {
            self.has_save = false;
        }
    }

    fn hydrate(&mut self, snapshot: SaveSnapshot) {
        let config = &self.shared.config;
        self.shared.ledger = Ledger::from_parts(
            snapshot.coins,
            snapshot.purchased_upgrades,
            snapshot.equipped_cosmetics,
        );
        self.shared.mood = Mood::with_value(&config.mood, snapshot.mood);
        self.shared.level = snapshot.level.max(1);
        self.shared.farm = FarmState {
            plots: snapshot.farm_plots,
            bonus: snapshot.bonus_plot,
        };
    }

    fn persist(&mut self) {
        self.gateway.save(&self.snapshot());
        self.has_save = true;
    }

    fn notify(&self, style: HapticStyle) {
        self.bridge.notify(style);
    }

    fn reject(&self, reason: Rejected) -> Rejected {
        tracing::debug!(reason = %reason, "entry point rejected");
        reason
    }

    fn flush_signals(&mut self) {
        for signal in self.shared.signals.drain(..) {
            match signal {
                Signal::Haptic(style) => self.bridge.notify(style),
                other => self.pending.push(other),
            }
        }
    }
}
