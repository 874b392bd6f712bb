//! Session controller behavior: routing, persistence, timers, host bridge.

use std::cell::RefCell;
use std::rc::Rc;

use stepan_arcade::catalog::{SeedId, UpgradeId};
use stepan_arcade::games::dig::state::DigPhase;
use stepan_arcade::save::SAVE_KEY;
use stepan_arcade::{
    EngineConfig, GameMode, HapticStyle, HostBridge, Intent, ManualClock, MemoryStore, NoopBridge,
    Rejected, Session, Signal, StoreOrigin,
};

const T0: u64 = 1_700_000_000_000;

#[derive(Clone, Default)]
struct RecordingBridge {
    name: Option<String>,
    ready: Rc<RefCell<bool>>,
    haptics: Rc<RefCell<Vec<HapticStyle>>>,
}

impl HostBridge for RecordingBridge {
    fn ready(&self) {
        *self.ready.borrow_mut() = true;
    }

    fn display_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn notify(&self, style: HapticStyle) {
        self.haptics.borrow_mut().push(style);
    }
}

fn quiet_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.dig.adversary_enabled = false;
    config
}

fn session_with(config: EngineConfig, store: &MemoryStore, clock: &ManualClock) -> Session {
    Session::with_seed(
        config,
        Box::new(store.clone()),
        Box::new(clock.clone()),
        Box::new(NoopBridge),
        7,
    )
}

fn trash_cells(s: &Session) -> Vec<usize> {
    s.dig()
        .unwrap()
        .grid
        .iter()
        .filter(|c| c.occupant.is_trash())
        .map(|c| c.index)
        .collect()
}

fn finish_level(s: &mut Session, clock: &ManualClock) {
    for cell in trash_cells(s) {
        s.handle(Intent::Dig(cell)).unwrap();
        clock.advance(1_500);
        s.update();
    }
    assert!(matches!(
        s.dig().unwrap().phase,
        DigPhase::LevelComplete { .. }
    ));
}

#[test]
fn first_run_has_no_save_and_defaults() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    let s = session_with(quiet_config(), &store, &clock);
    assert!(!s.has_save());
    assert_eq!(s.coins(), 0);
    assert_eq!(s.level(), 1);
    assert_eq!(s.mood().value(), 100);
    assert_eq!(s.farm().plots.len(), 4);
    assert_eq!(s.mode(), None);
}

#[test]
fn bridge_is_readied_and_named() {
    let bridge = RecordingBridge {
        name: Some("Anya".to_owned()),
        ..Default::default()
    };
    let mut s = Session::with_seed(
        quiet_config(),
        Box::new(MemoryStore::new()),
        Box::new(ManualClock::new(T0)),
        Box::new(bridge.clone()),
        1,
    );
    assert!(*bridge.ready.borrow());
    assert_eq!(s.display_name(), Some("Anya"));

    s.start_escape();
    s.handle(Intent::Step(26)).unwrap();
    let haptics = bridge.haptics.borrow();
    assert_eq!(haptics[0], HapticStyle::Soft);
    assert!(haptics.len() >= 2);
}

#[test]
fn progress_survives_a_restart() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    {
        let mut s = session_with(quiet_config(), &store, &clock);
        s.start_new();
        finish_level(&mut s, &clock);
        s.start_farm();
        s.handle(Intent::HarvestBonus).unwrap();
        assert!(store.contains(SAVE_KEY));
    }

    let s = session_with(quiet_config(), &store, &clock);
    assert!(s.has_save());
    assert_eq!(s.level(), 2);
    assert_eq!(s.mood().value(), 95);
    assert!(s.coins() >= 15);
    assert_eq!(s.farm().bonus.last_harvest, Some(T0 + 3 * 1_500));
}

#[test]
fn continue_resumes_saved_level() {
    let store = MemoryStore::new();
    store.insert(SAVE_KEY, r#"{"version":1,"game":{"level":3,"coins":9}}"#);
    let clock = ManualClock::new(T0);
    let mut s = session_with(quiet_config(), &store, &clock);
    s.continue_game();
    assert_eq!(s.mode(), Some(GameMode::Dig));
    assert_eq!(s.dig().unwrap().level, 3);
    assert_eq!(s.coins(), 9);
}

#[test]
fn start_new_wipes_progress() {
    let store = MemoryStore::new();
    store.insert(SAVE_KEY, r#"{"version":1,"game":{"level":5,"coins":300}}"#);
    let clock = ManualClock::new(T0);
    let mut s = session_with(quiet_config(), &store, &clock);
    assert_eq!(s.coins(), 300);
    s.start_new();
    assert_eq!(s.coins(), 0);
    assert_eq!(s.dig().unwrap().level, 1);
    // The fresh state is written straight back.
    assert!(store.get(SAVE_KEY).unwrap().contains("\"coins\":0"));
}

#[test]
fn corrupt_save_counts_as_first_run() {
    let store = MemoryStore::new();
    store.insert(SAVE_KEY, "{{{{");
    let clock = ManualClock::new(T0);
    let s = session_with(quiet_config(), &store, &clock);
    assert!(!s.has_save());
    assert!(!store.contains(SAVE_KEY));
}

#[test]
fn switching_games_drops_pending_timers() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    let mut s = session_with(quiet_config(), &store, &clock);
    s.start_new();
    s.handle(Intent::Dig(0)).unwrap();
    assert!(s.next_timer_due().is_some());

    s.start_hide_and_seek();
    assert_eq!(s.next_timer_due(), None);
    clock.advance(10_000);
    assert_eq!(s.update(), 0);
}

#[test]
fn returning_to_menu_cancels_dig() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    let mut s = session_with(quiet_config(), &store, &clock);
    s.start_new();
    s.handle(Intent::Dig(0)).unwrap();
    s.return_to_menu();
    clock.advance(10_000);
    assert_eq!(s.update(), 0);
    assert_eq!(s.mode(), None);
    assert_eq!(s.handle(Intent::Dig(1)), Err(Rejected::NoActiveGame));
}

#[test]
fn store_after_level_complete_continues_to_next_level() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    let mut s = session_with(quiet_config(), &store, &clock);
    s.start_new();

    assert_eq!(s.go_to_store(), Err(Rejected::WrongPhase));
    finish_level(&mut s, &clock);

    s.go_to_store().unwrap();
    assert_eq!(s.store_origin(), Some(StoreOrigin::LevelComplete));
    assert_eq!(s.handle(Intent::NextLevel), Err(Rejected::WrongPhase));

    s.handle(Intent::CloseStore).unwrap();
    assert!(!s.is_store_open());
    let dig = s.dig().unwrap();
    assert_eq!(dig.level, 2);
    assert_eq!(dig.phase, DigPhase::Playing);
}

#[test]
fn store_from_menu_closes_back_to_menu() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    let mut s = session_with(quiet_config(), &store, &clock);
    assert_eq!(
        s.handle(Intent::Buy(UpgradeId::Compass)),
        Err(Rejected::StoreClosed)
    );
    s.go_to_store().unwrap();
    assert_eq!(s.store_origin(), Some(StoreOrigin::Menu));
    assert!(matches!(
        s.handle(Intent::Buy(UpgradeId::Compass)),
        Err(Rejected::InsufficientCoins { need: 35, have: 0 })
    ));
    s.handle(Intent::CloseStore).unwrap();
    assert_eq!(s.mode(), None);
    assert!(!s.is_store_open());
}

#[test]
fn mood_treat_from_store() {
    let store = MemoryStore::new();
    store.insert(
        SAVE_KEY,
        r#"{"version":1,"game":{"coins":40,"anastasiaMood":70}}"#,
    );
    let clock = ManualClock::new(T0);
    let mut s = session_with(quiet_config(), &store, &clock);
    s.go_to_store().unwrap();
    s.handle(Intent::Buy(UpgradeId::ImproveMood)).unwrap();
    assert_eq!(s.mood().value(), 95);
    s.handle(Intent::Buy(UpgradeId::ImproveMood)).unwrap();
    assert_eq!(s.mood().value(), 100);
    assert_eq!(
        s.handle(Intent::Buy(UpgradeId::ImproveMood)),
        Err(Rejected::MoodFull)
    );
    assert_eq!(s.coins(), 10);
}

#[test]
fn farm_catches_up_while_closed() {
    let store = MemoryStore::new();
    store.insert(SAVE_KEY, r#"{"version":1,"game":{"coins":12}}"#);
    let clock = ManualClock::new(T0);
    {
        let mut s = session_with(quiet_config(), &store, &clock);
        s.start_farm();
        s.handle(Intent::Plant {
            plot: 2,
            seed: SeedId::Tomato,
        })
        .unwrap();
    }

    clock.advance(24 * 3_600_000);
    let mut s = session_with(quiet_config(), &store, &clock);
    assert!(s.farm().plots[2].is_ready(s.now_ms()));
    s.start_farm();
    s.handle(Intent::Harvest(2)).unwrap();
    assert_eq!(s.coins(), 35);
}

#[test]
fn signals_are_queued_for_presentation() {
    let store = MemoryStore::new();
    store.insert(SAVE_KEY, r#"{"version":1,"game":{"coins":0}}"#);
    let clock = ManualClock::new(T0);
    let mut s = session_with(quiet_config(), &store, &clock);
    s.start_farm();
    s.handle(Intent::HarvestBonus).unwrap();
    assert!(s.handle(Intent::HarvestBonus).is_err());

    let signals = s.take_signals();
    assert_eq!(signals.len(), 2);
    assert!(matches!(signals[0], Signal::Bonus { coins: 15, .. }));
    assert_eq!(
        signals[1],
        Signal::Cooldown {
            remaining_ms: 3_600_000
        }
    );
    assert!(s.take_signals().is_empty());
}

#[test]
fn play_again_only_for_round_games() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    let mut s = session_with(quiet_config(), &store, &clock);
    assert_eq!(s.play_again(), Err(Rejected::NoActiveGame));

    s.start_hide_and_seek();
    let target = s.seek().unwrap().target;
    s.handle(Intent::Search(target)).unwrap();
    s.play_again().unwrap();
    assert_eq!(s.seek().unwrap().attempts_left, 8);

    s.start_farm();
    assert_eq!(s.play_again(), Err(Rejected::Unsupported));
}

#[test]
fn late_boss_answer_is_lost_to_the_timer() {
    let mut config = EngineConfig::default();
    config.dig.adversary_chance = 1.0;
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    let mut s = session_with(config, &store, &clock);
    s.start_new();

    let first = trash_cells(&s)[0];
    s.handle(Intent::Dig(first)).unwrap();
    clock.advance(1_500);
    assert_eq!(s.update(), 1);
    let DigPhase::BossFight(fight) = s.dig().unwrap().phase else {
        panic!("expected boss fight");
    };
    assert_eq!(fight.deadline_ms, T0 + 1_500 + 20_000);

    // No update() in between: the overdue timeout fires before the answer.
    clock.advance(60_000);
    assert_eq!(
        s.handle(Intent::AnswerBoss(fight.answer())),
        Err(Rejected::WrongPhase)
    );
    let dig = s.dig().unwrap();
    assert_eq!(dig.phase, DigPhase::Playing);
    assert!(dig.found.is_empty());
    assert_eq!(dig.trash_goal, 2);
    assert_eq!(s.coins(), 0);
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    let mut config = EngineConfig::default();
    config.escape.grid = 2;
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    let mut s = session_with(config, &store, &clock);
    assert_eq!(s.config(), &EngineConfig::default());
    s.start_escape();
    assert_eq!(s.escape().unwrap().side, 6);

    let mut config = EngineConfig::default();
    config.seek.attempts = 0;
    let mut s = session_with(config, &store, &clock);
    s.start_hide_and_seek();
    assert_eq!(s.seek().unwrap().attempts_left, 8);
}
