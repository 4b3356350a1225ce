//! Tarot cards: the catalogue, the modifiers each card contributes, and the
//! registry that aggregates them for the economy.

pub mod cards;
pub mod draw;
pub mod effects;

use serde::{Deserialize, Serialize};

pub use cards::{card_info, create, CardInfo};
pub use draw::deal;
pub use effects::{ActiveEffect, ActiveEffects, EffectTarget, Expiry, Modifiers, Trigger};

/// Every card that can come up in a reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TarotType {
    // Money
    AceOfPentacles,
    TheEmpress,
    TenOfPentacles,
    WheelOfFortune,
    // Work
    TheMagician,
    // Health
    TheStar,
    // Neutral
    TwoOfPentacles,
    TheHermit,
    // Playful debuffs
    TheFool,
    TheHangedMan,
    TheMoon,
}

/// All cards in catalogue order.
pub const ALL_CARDS: [TarotType; 11] = [
    TarotType::AceOfPentacles,
    TarotType::TheEmpress,
    TarotType::TenOfPentacles,
    TarotType::WheelOfFortune,
    TarotType::TheMagician,
    TarotType::TheStar,
    TarotType::TwoOfPentacles,
    TarotType::TheHermit,
    TarotType::TheFool,
    TarotType::TheHangedMan,
    TarotType::TheMoon,
];

impl TarotType {
    pub fn name(self) -> &'static str {
        card_info(self).name
    }
}
