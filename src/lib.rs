//! Tarot Days: a headless rules engine for a small life-sim where tarot
//! cards bend the economy.
//!
//! The player earns money by working (classic) or running a gallery,
//! sleeps to recover fatigue, gambles at the arcade and saves up for a
//! birthday gift. Drawn tarot cards stack modifiers on top of all of it;
//! see [`tarot::ActiveEffects`].

pub mod arcade;
pub mod config;
pub mod error;
pub mod gallery;
pub mod game;
pub mod logger;
pub mod rng;
pub mod tarot;
pub mod time;

pub use config::{GameSettings, Variant};
pub use error::{ConfigError, GameError};
pub use game::LifeState;

/// Round money to the nearest whole coin, ties to even.
pub(crate) fn round_money(amount: f64) -> i64 {
    amount.round_ties_even() as i64
}
