//! Active tarot effects and their aggregation.
//!
//! Each active effect carries a [`Modifiers`] record and an [`Expiry`]. The
//! economy never looks at individual cards; it asks [`ActiveEffects`] for the
//! aggregate: multipliers are multiplied, the salary bonus is summed, and
//! gates are true when any effect sets them.

use serde::{Deserialize, Serialize};

use crate::config::Variant;

use super::TarotType;

/// What a card does to the rules while it is active.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Multiplier for all earnings. 1.0 = normal.
    pub earnings_multiplier: f64,
    /// Added to the work salary before the earnings multiplier. 0.1 = +10%.
    pub salary_bonus: f64,
    pub blocks_work: bool,
    pub blocks_creation: bool,
    /// Work and creation cost no fatigue.
    pub blocks_fatigue: bool,
    pub guarantees_mini_game_win: bool,
    pub chaotic_work_button: bool,
    pub rent_chance_multiplier: f64,
    pub painting_value_multiplier: f64,
}

impl Modifiers {
    pub const NEUTRAL: Modifiers = Modifiers {
        earnings_multiplier: 1.0,
        salary_bonus: 0.0,
        blocks_work: false,
        blocks_creation: false,
        blocks_fatigue: false,
        guarantees_mini_game_win: false,
        chaotic_work_button: false,
        rent_chance_multiplier: 1.0,
        painting_value_multiplier: 1.0,
    };
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Events that count an effect down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    DayAdvanced,
    WorkPerformed,
    MiniGamePlayed,
    PaintingCreated,
}

/// How long an effect stays active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expiry {
    /// Resolved entirely when drawn; never kept.
    Instant,
    /// Counts down on each new day. `Days(1)` lasts for the rest of today.
    Days(u32),
    WorkSessions(u32),
    Paintings(u32),
    /// Used up by the next mini-game.
    NextMiniGame { consumed: bool },
}

impl Expiry {
    pub fn is_expired(&self) -> bool {
        match *self {
            Expiry::Instant => true,
            Expiry::Days(n) | Expiry::WorkSessions(n) | Expiry::Paintings(n) => n == 0,
            Expiry::NextMiniGame { consumed } => consumed,
        }
    }

    fn notify(&mut self, trigger: Trigger) {
        match (self, trigger) {
            (Expiry::Days(n), Trigger::DayAdvanced)
            | (Expiry::WorkSessions(n), Trigger::WorkPerformed)
            | (Expiry::Paintings(n), Trigger::PaintingCreated) => {
                *n = n.saturating_sub(1);
            }
            (Expiry::NextMiniGame { consumed }, Trigger::MiniGamePlayed) => *consumed = true,
            _ => {}
        }
    }

    /// Remaining count for counter-based expiries.
    pub fn remaining(&self) -> Option<u32> {
        match *self {
            Expiry::Days(n) | Expiry::WorkSessions(n) | Expiry::Paintings(n) => Some(n),
            Expiry::Instant | Expiry::NextMiniGame { .. } => None,
        }
    }
}

/// The side of the game a card's instant effect touches.
pub trait EffectTarget {
    fn money(&self) -> i64;
    /// Credit money without any multiplier.
    fn add_money(&mut self, amount: i64);
    /// Debit money, never below zero.
    fn deduct_money(&mut self, amount: i64);
    fn reset_fatigue(&mut self);
    fn show_message(&mut self, text: &str);
}

/// One drawn card as it lives in the active list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub card: TarotType,
    pub variant: Variant,
    pub expiry: Expiry,
    pub modifiers: Modifiers,
}

impl ActiveEffect {
    pub fn is_expired(&self) -> bool {
        self.expiry.is_expired()
    }

    pub fn notify(&mut self, trigger: Trigger) {
        self.expiry.notify(trigger);
    }

    pub fn name(&self) -> &'static str {
        self.card.name()
    }

    pub fn symbol(&self) -> &'static str {
        super::card_info(self.card).symbol
    }

    /// Short description; duration cards include what is left.
    pub fn description(&self) -> String {
        super::cards::describe(self)
    }

    /// Run the card's immediate effect.
    pub fn on_apply<T: EffectTarget + ?Sized>(&self, target: &mut T) {
        super::cards::apply_instant(self, target);
    }
}

/// The player's active tarot effects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    effects: Vec<ActiveEffect>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a freshly drawn card against `target` and keep it if it lasts
    /// beyond the draw. Returns the effect as it was applied.
    pub fn apply<T: EffectTarget + ?Sized>(
        &mut self,
        card: TarotType,
        variant: Variant,
        target: &mut T,
    ) -> ActiveEffect {
        let effect = super::create(card, variant);
        effect.on_apply(target);
        let kept = self.insert(effect.clone());
        tracing::debug!(card = card.name(), kept, "tarot card applied");
        effect
    }

    /// Keep `effect` unless it already expired (instant cards). Returns
    /// whether it was kept.
    pub fn insert(&mut self, effect: ActiveEffect) -> bool {
        if effect.is_expired() {
            return false;
        }
        self.effects.push(effect);
        true
    }

    /// Notify every effect of `trigger`, then drop the ones that expired.
    /// Returns the dropped effects in the order they were drawn.
    pub fn fire(&mut self, trigger: Trigger) -> Vec<ActiveEffect> {
        for effect in &mut self.effects {
            effect.notify(trigger);
        }
        let (expired, active): (Vec<_>, Vec<_>) =
            self.effects.drain(..).partition(|e| e.is_expired());
        self.effects = active;
        expired
    }

    pub fn on_day_advanced(&mut self) -> Vec<ActiveEffect> {
        self.fire(Trigger::DayAdvanced)
    }

    pub fn on_work_performed(&mut self) -> Vec<ActiveEffect> {
        self.fire(Trigger::WorkPerformed)
    }

    pub fn on_mini_game_played(&mut self) -> Vec<ActiveEffect> {
        self.fire(Trigger::MiniGamePlayed)
    }

    pub fn on_painting_created(&mut self) -> Vec<ActiveEffect> {
        self.fire(Trigger::PaintingCreated)
    }

    // ── Aggregated queries ─────────────────────────────────────────

    pub fn earnings_multiplier(&self) -> f64 {
        self.effects
            .iter()
            .map(|e| e.modifiers.earnings_multiplier)
            .product()
    }

    pub fn salary_bonus(&self) -> f64 {
        self.effects.iter().map(|e| e.modifiers.salary_bonus).sum()
    }

    pub fn rent_chance_multiplier(&self) -> f64 {
        self.effects
            .iter()
            .map(|e| e.modifiers.rent_chance_multiplier)
            .product()
    }

    pub fn painting_value_multiplier(&self) -> f64 {
        self.effects
            .iter()
            .map(|e| e.modifiers.painting_value_multiplier)
            .product()
    }

    pub fn blocks_work(&self) -> bool {
        self.any(|m| m.blocks_work)
    }

    pub fn blocks_creation(&self) -> bool {
        self.any(|m| m.blocks_creation)
    }

    pub fn blocks_fatigue(&self) -> bool {
        self.any(|m| m.blocks_fatigue)
    }

    pub fn guarantees_mini_game_win(&self) -> bool {
        self.any(|m| m.guarantees_mini_game_win)
    }

    pub fn chaotic_work_button(&self) -> bool {
        self.any(|m| m.chaotic_work_button)
    }

    fn any(&self, gate: impl Fn(&Modifiers) -> bool) -> bool {
        self.effects.iter().any(|e| gate(&e.modifiers))
    }

    /// Active card names for the HUD, e.g. `"The Empress, The Moon"`.
    pub fn display(&self) -> String {
        self.effects
            .iter()
            .map(|e| e.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::tarot::{create, ALL_CARDS};
    use proptest::prelude::*;

    fn arb_card() -> impl Strategy<Value = TarotType> {
        (0..ALL_CARDS.len()).prop_map(|i| ALL_CARDS[i])
    }

    fn arb_variant() -> impl Strategy<Value = Variant> {
        prop_oneof![Just(Variant::Classic), Just(Variant::Gallery)]
    }

    fn arb_trigger() -> impl Strategy<Value = Trigger> {
        prop_oneof![
            Just(Trigger::DayAdvanced),
            Just(Trigger::WorkPerformed),
            Just(Trigger::MiniGamePlayed),
            Just(Trigger::PaintingCreated),
        ]
    }

    proptest! {
        #[test]
        fn prop_earnings_multiplier_is_product(
            cards in prop::collection::vec(arb_card(), 0..12),
            variant in arb_variant(),
        ) {
            let mut fx = ActiveEffects::new();
            for &c in &cards {
                fx.insert(create(c, variant));
            }
            let expected: f64 = fx.iter().map(|e| e.modifiers.earnings_multiplier).product();
            prop_assert!((fx.earnings_multiplier() - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_no_expired_effect_survives_a_trigger(
            cards in prop::collection::vec(arb_card(), 0..12),
            triggers in prop::collection::vec(arb_trigger(), 0..20),
            variant in arb_variant(),
        ) {
            let mut fx = ActiveEffects::new();
            for &c in &cards {
                fx.insert(create(c, variant));
            }
            for t in triggers {
                let gone = fx.fire(t);
                prop_assert!(gone.iter().all(|e| e.is_expired()));
                prop_assert!(fx.iter().all(|e| !e.is_expired()));
            }
        }

        #[test]
        fn prop_enough_days_clear_day_cards(
            cards in prop::collection::vec(arb_card(), 0..12),
        ) {
            let mut fx = ActiveEffects::new();
            for &c in &cards {
                fx.insert(create(c, Variant::Gallery));
            }
            for _ in 0..3 {
                fx.on_day_advanced();
            }
            // Only the Fool (painting counter) can outlive three nights.
            prop_assert!(fx.iter().all(|e| e.card == TarotType::TheFool));
        }
    }
}
