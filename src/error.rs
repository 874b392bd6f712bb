//! Error types.
//!
//! Nothing in the engine is fatal. [`Rejected`] says why an intent was
//! refused and guarantees the state was left untouched; [`StoreError`] and
//! [`ConfigError`] cover the two edges that talk to the outside world.

use thiserror::Error;

use crate::catalog::UpgradeId;

/// Why a player action was refused. A rejected action never mutates state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("not enough coins: need {need}, have {have}")]
    InsufficientCoins { need: u64, have: u64 },

    #[error("{0:?} is already owned")]
    AlreadyOwned(UpgradeId),

    #[error("{0:?} is not owned")]
    NotOwned(UpgradeId),

    #[error("{0:?} is not a cosmetic")]
    NotCosmetic(UpgradeId),

    #[error("mood is already full")]
    MoodFull,

    #[error("cell {0} is outside the grid")]
    OutOfBounds(usize),

    #[error("cell {0} is already revealed")]
    AlreadyRevealed(usize),

    #[error("cell {0} is the player's own cell")]
    SelfTarget(usize),

    #[error("cell {0} is not adjacent to the player")]
    NotAdjacent(usize),

    #[error("no attempts left")]
    NoAttemptsLeft,

    #[error("no energy left")]
    NoEnergy,

    #[error("plot {0} does not exist")]
    UnknownPlot(usize),

    #[error("plot {0} is already planted")]
    PlotOccupied(usize),

    #[error("plot {0} is empty")]
    PlotEmpty(usize),

    #[error("not ready: {remaining_ms} ms left")]
    NotReady { remaining_ms: u64 },

    #[error("action is not available in the current phase")]
    WrongPhase,

    #[error("action does not apply to the active game")]
    Unsupported,

    #[error("no game is active")]
    NoActiveGame,

    #[error("the store is not open")]
    StoreClosed,
}

/// Key-value backend failure. Logged and swallowed by the save gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend is unavailable")]
    Unavailable,

    #[error("storage backend failed: {0}")]
    Backend(String),

    #[error("snapshot could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Invalid tuning passed to [`crate::EngineConfig::from_json`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level table is empty")]
    NoLevels,

    #[error("level {level}: grid side must be at least 1")]
    EmptyGrid { level: usize },

    #[error("level {level}: at least one trash item is required")]
    NoTrash { level: usize },

    #[error("level {level}: {items} items do not fit in {cells} cells")]
    Overfull {
        level: usize,
        items: usize,
        cells: usize,
    },

    #[error("search grid side must be at least 1")]
    EmptySearchGrid,

    #[error("hide-and-seek needs at least one attempt")]
    NoAttempts,

    #[error("escape grid side {0} is too small (minimum 3)")]
    EscapeTooSmall(usize),

    #[error("escape grid needs {needed} free interior cells but has {available}")]
    EscapeOverfull { needed: usize, available: usize },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    BadChance { name: &'static str, value: f64 },
}
