//! Player commands and their dispatch.
//!
//! Each variant is one thing the player can do from a screen of the game.
//! A front-end maps its buttons onto these; the simulator issues them
//! directly.

use crate::arcade::{SpinOutcome, WhackHit};
use crate::error::Result;
use crate::gallery::{MarketReport, Painting};
use crate::tarot::{ActiveEffect, TarotType};

use super::logic;
use super::state::LifeState;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ── Home ──
    Work,
    Sleep,
    // ── Fortune teller ──
    DrawFortune,
    PickCard(usize),
    // ── Arcade ──
    SpinSlot,
    StartMole,
    Whack(usize),
    /// Wall-clock timestamp in ms for the running round.
    Clock(f64),
    // ── Gallery ──
    CreatePainting,
    DisplayPainting(String),
    RemoveFromDisplay(String),
    Promote,
    // ── Shop ──
    BuyGift(usize),
}

/// What a successful action produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Earned(i64),
    Slept(Option<MarketReport>),
    CardsDealt(Vec<TarotType>),
    CardApplied(ActiveEffect),
    Spun(SpinOutcome),
    RoundStarted,
    Whacked(Option<WhackHit>),
    /// Payout when the round ended on this update.
    ClockAdvanced(Option<i64>),
    Painted(Painting),
    GiftBought(String),
    Done,
}

pub fn dispatch(state: &mut LifeState, action: &Action) -> Result<Outcome> {
    let outcome = match action {
        Action::Work => Outcome::Earned(logic::work(state)?),
        Action::Sleep => Outcome::Slept(logic::sleep(state)?),
        Action::DrawFortune => Outcome::CardsDealt(logic::draw_fortune(state)?),
        Action::PickCard(i) => Outcome::CardApplied(logic::pick_card(state, *i)?),
        Action::SpinSlot => Outcome::Spun(logic::spin_slot(state)?),
        Action::StartMole => {
            logic::start_mole(state)?;
            Outcome::RoundStarted
        }
        Action::Whack(hole) => Outcome::Whacked(logic::whack(state, *hole)?),
        Action::Clock(now_ms) => Outcome::ClockAdvanced(logic::update_clock(state, *now_ms)),
        Action::CreatePainting => Outcome::Painted(logic::create_painting(state)?),
        Action::DisplayPainting(id) => {
            logic::display_painting(state, id)?;
            Outcome::Done
        }
        Action::RemoveFromDisplay(id) => {
            logic::remove_from_display(state, id)?;
            Outcome::Done
        }
        Action::Promote => {
            logic::promote(state)?;
            Outcome::Done
        }
        Action::BuyGift(i) => Outcome::GiftBought(logic::buy_gift(state, *i)?),
    };
    Ok(outcome)
}
