//! Scheduled state transitions.
//!
//! A timer carries the [`Token`] of the state that scheduled it. When it comes
//! due, the session fires it only if the active game still reports the same
//! token; anything else is stale and dropped. Nothing has to be cancelled by
//! hand when a state is left.

use crate::games::GameMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// Dig delay elapsed; reveal the cell.
    DigReveal { cell: usize },
    /// Muzzle wore off.
    MuzzleEnd,
    /// Boss math challenge ran out of time.
    BossTimeout,
    /// Hide the escape takeover notice.
    TakeoverEnd,
}

/// Identifies the state that scheduled a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub mode: GameMode,
    pub tag: u64,
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    token: Token,
    event: TimerEvent,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, token: Token, event: TimerEvent) {
        self.pending.push(Scheduled {
            due_ms,
            seq: self.next_seq,
            token,
            event,
        });
        self.next_seq += 1;
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, Token, TimerEvent)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= now_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.seq))
            .map(|(i, _)| i)?;
        let s = self.pending.swap_remove(idx);
        Some((s.due_ms, s.token, s.event))
    }

    /// When the next timer comes due, if any.
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|s| s.due_ms).min()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
