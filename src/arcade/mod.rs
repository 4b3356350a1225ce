//! Arcade mini-games played for bonus income.

pub mod mole;
pub mod slot;

pub use mole::{MoleKind, MoleRound, WhackHit, HOLES};
pub use slot::{SlotResult, SlotSymbol, SpinOutcome};
