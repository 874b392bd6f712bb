//! Digging: Stepan digs up the yard looking for trash to clean up.
//!
//! Each level is a fresh grid. Collecting every piece of trash pays out the
//! round and moves on to the next level, optionally via the store.

pub mod logic;
pub mod state;

use crate::error::Rejected;
use crate::games::{Game, GameMode, Shared};
use crate::input::Intent;
use crate::timer::TimerEvent;

use state::{DigPhase, DigState};

pub struct DigGame {
    pub state: DigState,
}

impl DigGame {
    /// Start at the shared level counter.
    pub fn new(shared: &mut Shared) -> Self {
        let level = shared.level;
        Self {
            state: logic::setup(level, shared),
        }
    }

    pub fn is_level_complete(&self) -> bool {
        matches!(self.state.phase, DigPhase::LevelComplete { .. })
    }
}

impl Game for DigGame {
    fn mode(&self) -> GameMode {
        GameMode::Dig
    }

    fn tag(&self) -> u64 {
        self.state.tag
    }

    fn handle_input(&mut self, intent: &Intent, shared: &mut Shared) -> Result<(), Rejected> {
        match *intent {
            Intent::Dig(cell) => logic::dig(&mut self.state, cell, shared),
            Intent::AnswerBoss(answer) => logic::answer_boss(&mut self.state, answer, shared).map(|_| ()),
            Intent::NextLevel => logic::next_level(&mut self.state, shared),
            _ => Err(Rejected::Unsupported),
        }
    }

    fn on_timer(&mut self, event: TimerEvent, shared: &mut Shared) {
        match event {
            TimerEvent::DigReveal { cell } => logic::reveal(&mut self.state, cell, shared),
            TimerEvent::MuzzleEnd => logic::muzzle_end(&mut self.state),
            TimerEvent::BossTimeout => logic::boss_timeout(&mut self.state, shared),
            TimerEvent::TakeoverEnd => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn shared() -> Shared {
        let mut config = EngineConfig::default();
        config.dig.adversary_enabled = false;
        Shared::new(config, 5)
    }

    #[test]
    fn dig_via_input_then_timer() {
        let mut s = shared();
        let mut game = DigGame::new(&mut s);
        game.handle_input(&Intent::Dig(3), &mut s).unwrap();

        let (_, token, event) = s.timers.pop_due(u64::MAX).unwrap();
        assert_eq!(token.mode, GameMode::Dig);
        assert_eq!(token.tag, game.tag());
        game.on_timer(event, &mut s);
        assert!(game.state.grid[3].revealed);
    }

    #[test]
    fn next_level_needs_completed_level() {
        let mut s = shared();
        let mut game = DigGame::new(&mut s);
        assert!(!game.is_level_complete());
        assert_eq!(
            game.handle_input(&Intent::NextLevel, &mut s),
            Err(Rejected::WrongPhase)
        );
        assert_eq!(
            game.handle_input(&Intent::Search(0), &mut s),
            Err(Rejected::Unsupported)
        );
    }

    #[test]
    fn starts_at_shared_level() {
        let mut s = shared();
        s.level = 4;
        let game = DigGame::new(&mut s);
        assert_eq!(game.state.level, 4);
        assert_eq!(game.state.side, 5);
    }
}
