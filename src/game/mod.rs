//! The life-sim itself: state, rules, commands, saves and the balance
//! simulator.

pub mod actions;
pub mod logic;
pub mod save;
pub mod simulator;
pub mod state;

pub use actions::{dispatch, Action, Outcome};
pub use simulator::{simulate, SimReport, Strategy};
pub use state::{Hud, LifeState, Player, Stats};
