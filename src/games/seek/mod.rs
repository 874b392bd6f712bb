//! Hide-and-seek: find Stepan on a grid using distance clues.

pub mod logic;
pub mod state;

use crate::bridge::HapticStyle;
use crate::error::Rejected;
use crate::games::{Game, GameMode, Shared};
use crate::input::Intent;
use crate::timer::TimerEvent;

use state::{SeekPhase, SeekState};

pub struct SeekGame {
    pub state: SeekState,
}

impl SeekGame {
    pub fn new(shared: &mut Shared) -> Self {
        Self {
            state: logic::setup(shared),
        }
    }
}

impl Game for SeekGame {
    fn mode(&self) -> GameMode {
        GameMode::HideSeek
    }

    fn tag(&self) -> u64 {
        self.state.tag
    }

    fn handle_input(&mut self, intent: &Intent, shared: &mut Shared) -> Result<(), Rejected> {
        let Intent::Search(cell) = *intent else {
            return Err(Rejected::Unsupported);
        };
        logic::search(&mut self.state, cell)?;
        shared.haptic(HapticStyle::Light);
        if let SeekPhase::Resolved { found } = self.state.phase {
            tracing::info!(found, attempts_left = self.state.attempts_left, "hide-and-seek resolved");
        }
        Ok(())
    }

    fn on_timer(&mut self, _event: TimerEvent, _shared: &mut Shared) {}
}
