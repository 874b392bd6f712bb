//! Escape: break out of a walled cell before the energy runs out while
//! Artem keeps moving the exit.

pub mod logic;
pub mod state;

use crate::bridge::HapticStyle;
use crate::error::Rejected;
use crate::games::{Game, GameMode, Shared};
use crate::input::Intent;
use crate::signal::Signal;
use crate::timer::TimerEvent;

use logic::StepOutcome;
use state::{EscapePhase, EscapeState};

pub struct EscapeGame {
    pub state: EscapeState,
}

impl EscapeGame {
    pub fn new(shared: &mut Shared) -> Self {
        Self {
            state: logic::setup(shared),
        }
    }

    fn step(&mut self, cell: usize, shared: &mut Shared) -> Result<(), Rejected> {
        let outcome = logic::step(&mut self.state, cell, &shared.config.escape)?;
        shared.haptic(match outcome {
            StepOutcome::Moved => HapticStyle::Soft,
            StepOutcome::Trapped => HapticStyle::Warning,
            StepOutcome::Drank | StepOutcome::Escaped => HapticStyle::Success,
            StepOutcome::WallHit { .. } => HapticStyle::Medium,
            StepOutcome::WallBroken => HapticStyle::Heavy,
        });

        match self.state.phase {
            EscapePhase::Resolved { escaped } => {
                if !escaped {
                    shared.haptic(HapticStyle::Error);
                }
                tracing::info!(escaped, energy = self.state.energy, "escape resolved");
            }
            EscapePhase::Active => {
                if logic::adversary_due(&self.state, &shared.config.escape, &mut shared.rng) {
                    self.takeover(shared);
                }
            }
        }
        Ok(())
    }

    fn takeover(&mut self, shared: &mut Shared) {
        let Some(exit) = logic::relocate_exit(&mut self.state, &shared.config.escape, &mut shared.rng)
        else {
            return;
        };
        tracing::debug!(exit, "exit relocated");
        self.state.takeover_visible = true;
        self.state.tag = shared.fresh_tag();
        let delay = shared.config.escape.takeover_ms;
        shared.schedule(GameMode::Escape, self.state.tag, delay, TimerEvent::TakeoverEnd);
        shared.haptic(HapticStyle::Heavy);
        shared.signal(Signal::Takeover);
    }
}

impl Game for EscapeGame {
    fn mode(&self) -> GameMode {
        GameMode::Escape
    }

    fn tag(&self) -> u64 {
        self.state.tag
    }

    fn handle_input(&mut self, intent: &Intent, shared: &mut Shared) -> Result<(), Rejected> {
        match *intent {
            Intent::Step(cell) => self.step(cell, shared),
            _ => Err(Rejected::Unsupported),
        }
    }

    fn on_timer(&mut self, event: TimerEvent, _shared: &mut Shared) {
        if event == TimerEvent::TakeoverEnd {
            self.state.takeover_visible = false;
        }
    }
}
