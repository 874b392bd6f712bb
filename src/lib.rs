//! Stepan's Adventures: game-state and progression engine.
//!
//! Four minigames (dig, hide-and-seek, escape, farm) share one coin ledger,
//! one mood meter and one persisted snapshot. Presentation layers drive the
//! engine through [`Session`]: entry points and [`Intent`]s go in, state
//! queries and [`Signal`]s come out.

pub mod bridge;
pub mod catalog;
pub mod config;
pub mod economy;
pub mod error;
pub mod games;
pub mod grid;
pub mod input;
pub mod mood;
pub mod rng;
pub mod save;
pub mod session;
pub mod signal;
pub mod store;
pub mod time;
pub mod timer;

pub use bridge::{HapticStyle, HostBridge, NoopBridge};
pub use config::EngineConfig;
pub use error::{ConfigError, Rejected, StoreError};
pub use games::GameMode;
pub use input::Intent;
pub use save::SaveSnapshot;
pub use session::{Session, StoreOrigin};
pub use signal::Signal;
pub use store::{MemoryStore, SaveStore};
pub use time::{Clock, ManualClock, SystemClock};
