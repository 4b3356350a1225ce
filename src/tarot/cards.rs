//! Card catalogue: names, HUD symbols, and how each card behaves in each
//! variant of the game.

use crate::config::Variant;

use super::effects::{ActiveEffect, EffectTarget, Expiry, Modifiers};
use super::TarotType;

/// Instant cash from the Ace of Pentacles. Not multiplied.
pub const ACE_BONUS: i64 = 100;
/// Most the Hanged Man can take.
pub const HANGED_MAN_LOSS: i64 = 20;
/// Duration of the Empress and the Ten of Pentacles.
pub const BLESSING_DAYS: u32 = 3;
/// Work sessions (classic) or paintings (gallery) the Fool lasts.
pub const FOOL_CHARGES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardInfo {
    pub name: &'static str,
    /// Short label for the active-effects bar.
    pub symbol: &'static str,
}

pub fn card_info(card: TarotType) -> CardInfo {
    let (name, symbol) = match card {
        TarotType::AceOfPentacles => ("Ace of Pentacles", "$"),
        TarotType::TheEmpress => ("The Empress", "x2"),
        TarotType::TenOfPentacles => ("Ten of Pentacles", "+10%"),
        TarotType::WheelOfFortune => ("Wheel of Fortune", "WIN"),
        TarotType::TheMagician => ("The Magician", "ZAP"),
        TarotType::TheStar => ("The Star", "HEAL"),
        TarotType::TwoOfPentacles => ("Two of Pentacles", "..."),
        TarotType::TheHermit => ("The Hermit", "REST"),
        TarotType::TheFool => ("The Fool", "OOF"),
        TarotType::TheHangedMan => ("The Hanged Man", "-$"),
        TarotType::TheMoon => ("The Moon", "BOO"),
    };
    CardInfo { name, symbol }
}

/// Build the effect a freshly drawn card starts with.
pub fn create(card: TarotType, variant: Variant) -> ActiveEffect {
    let gallery = variant == Variant::Gallery;
    let n = Modifiers::NEUTRAL;
    let (expiry, modifiers) = match card {
        TarotType::AceOfPentacles
        | TarotType::TheStar
        | TarotType::TwoOfPentacles
        | TarotType::TheHangedMan => (Expiry::Instant, n),
        TarotType::TheEmpress => (
            Expiry::Days(BLESSING_DAYS),
            Modifiers {
                earnings_multiplier: 2.0,
                ..n
            },
        ),
        TarotType::TenOfPentacles => (
            Expiry::Days(BLESSING_DAYS),
            Modifiers {
                salary_bonus: 0.10,
                ..n
            },
        ),
        TarotType::WheelOfFortune if gallery => (
            Expiry::Days(1),
            Modifiers {
                rent_chance_multiplier: 2.0,
                ..n
            },
        ),
        TarotType::WheelOfFortune => (
            Expiry::NextMiniGame { consumed: false },
            Modifiers {
                guarantees_mini_game_win: true,
                ..n
            },
        ),
        TarotType::TheMagician => (
            Expiry::Days(1),
            Modifiers {
                blocks_fatigue: true,
                ..n
            },
        ),
        TarotType::TheHermit if gallery => (
            Expiry::Days(1),
            Modifiers {
                blocks_creation: true,
                ..n
            },
        ),
        TarotType::TheHermit => (
            Expiry::Days(1),
            Modifiers {
                blocks_work: true,
                ..n
            },
        ),
        TarotType::TheFool if gallery => (
            Expiry::Paintings(FOOL_CHARGES),
            Modifiers {
                painting_value_multiplier: 0.9,
                ..n
            },
        ),
        TarotType::TheFool => (
            Expiry::WorkSessions(FOOL_CHARGES),
            Modifiers {
                salary_bonus: -0.10,
                ..n
            },
        ),
        TarotType::TheMoon if gallery => (
            Expiry::Days(1),
            Modifiers {
                rent_chance_multiplier: 0.5,
                ..n
            },
        ),
        TarotType::TheMoon => (
            Expiry::Days(1),
            Modifiers {
                chaotic_work_button: true,
                ..n
            },
        ),
    };
    ActiveEffect {
        card,
        variant,
        expiry,
        modifiers,
    }
}

pub(super) fn apply_instant<T: EffectTarget + ?Sized>(effect: &ActiveEffect, target: &mut T) {
    let gallery = effect.variant == Variant::Gallery;
    match effect.card {
        TarotType::AceOfPentacles => {
            target.add_money(ACE_BONUS);
            target.show_message(&format!("Ace of Pentacles: +${}!", ACE_BONUS));
        }
        TarotType::TheHangedMan => {
            let loss = HANGED_MAN_LOSS.min(target.money().max(0));
            target.deduct_money(loss);
            target.show_message(&format!(
                "The Hanged Man: Lost ${}... but it's just pocket change!",
                loss
            ));
        }
        TarotType::TheStar => {
            target.reset_fatigue();
            target.show_message("The Star: Fatigue fully healed!");
        }
        TarotType::TwoOfPentacles => {
            target.show_message("Two of Pentacles: The stars are balanced. Nothing happens.");
        }
        TarotType::TheEmpress => {
            target.show_message("The Empress: All earnings x2 for 3 days!");
        }
        TarotType::TenOfPentacles => {
            target.show_message("Ten of Pentacles: Salary +10% for 3 days!");
        }
        TarotType::WheelOfFortune if gallery => {
            target.show_message("Wheel of Fortune: Your gallery is buzzing with interest!");
        }
        TarotType::WheelOfFortune => {
            target.show_message("Wheel of Fortune: Your next mini-game is a guaranteed big win!");
        }
        TarotType::TheMagician if gallery => {
            target.show_message("The Magician: Create art without getting tired today!");
        }
        TarotType::TheMagician => {
            target.show_message("The Magician: Work without getting tired today!");
        }
        TarotType::TheHermit if gallery => {
            target.show_message("The Hermit: Take the day off... no creating today.");
        }
        TarotType::TheHermit => {
            target.show_message("The Hermit: Take the day off... no work today.");
        }
        TarotType::TheFool if gallery => {
            target.show_message("The Fool: Oops! Next 3 paintings lose 10% value.");
        }
        TarotType::TheFool => {
            target.show_message("The Fool: Oops! Next 3 work sessions earn 10% less.");
        }
        TarotType::TheMoon if gallery => {
            target.show_message("The Moon: A playful ghost is scaring away customers tonight!");
        }
        TarotType::TheMoon => {
            target.show_message("The Moon: The work button has a mind of its own today!");
        }
    }
}

pub(super) fn describe(effect: &ActiveEffect) -> String {
    let gallery = effect.variant == Variant::Gallery;
    let left = effect.expiry.remaining().unwrap_or(0);
    match effect.card {
        TarotType::AceOfPentacles => format!("A gift of gold! +{} coins instantly.", ACE_BONUS),
        TarotType::TheEmpress => format!("Earnings doubled! ({} days left)", left),
        TarotType::TenOfPentacles => format!("Salary +10%! ({} days left)", left),
        TarotType::WheelOfFortune if gallery => "Rent chance doubled tonight!".to_string(),
        TarotType::WheelOfFortune => "Next mini-game is a guaranteed big win!".to_string(),
        TarotType::TheMagician if gallery => "Creating art costs no fatigue today!".to_string(),
        TarotType::TheMagician => "Working costs no fatigue today!".to_string(),
        TarotType::TheStar => "Full recovery! Fatigue reset to 0.".to_string(),
        TarotType::TwoOfPentacles => "Balance... nothing happens this time.".to_string(),
        TarotType::TheHermit if gallery => "Forced rest. No creating today.".to_string(),
        TarotType::TheHermit => "Forced rest. No work today.".to_string(),
        TarotType::TheFool if gallery => {
            format!("Clumsy! Painting value -10% ({} paintings left)", left)
        }
        TarotType::TheFool => format!("Clumsy! Salary -10% ({} work sessions left)", left),
        TarotType::TheHangedMan => {
            format!("Feeling heavy... lost {} coins.", HANGED_MAN_LOSS)
        }
        TarotType::TheMoon if gallery => "Mischievous ghost! Rent chance halved tonight.".to_string(),
        TarotType::TheMoon => "The work button moves around chaotically today!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tarot::ALL_CARDS;

    #[derive(Default)]
    struct Wallet {
        money: i64,
        fatigue: u32,
        messages: Vec<String>,
    }

    impl EffectTarget for Wallet {
        fn money(&self) -> i64 {
            self.money
        }
        fn add_money(&mut self, amount: i64) {
            self.money += amount;
        }
        fn deduct_money(&mut self, amount: i64) {
            self.money = (self.money - amount).max(0);
        }
        fn reset_fatigue(&mut self) {
            self.fatigue = 0;
        }
        fn show_message(&mut self, text: &str) {
            self.messages.push(text.to_string());
        }
    }

    #[test]
    fn every_card_has_name_and_symbol() {
        for card in ALL_CARDS {
            let info = card_info(card);
            assert!(!info.name.is_empty());
            assert!(!info.symbol.is_empty());
        }
    }

    #[test]
    fn every_card_shows_a_message_when_applied() {
        for variant in [Variant::Classic, Variant::Gallery] {
            for card in ALL_CARDS {
                let mut w = Wallet::default();
                create(card, variant).on_apply(&mut w);
                assert_eq!(w.messages.len(), 1, "{:?}", card);
            }
        }
    }

    #[test]
    fn ace_pays_flat_hundred() {
        let mut w = Wallet::default();
        create(TarotType::AceOfPentacles, Variant::Classic).on_apply(&mut w);
        assert_eq!(w.money, 100);
        assert_eq!(w.messages[0], "Ace of Pentacles: +$100!");
    }

    #[test]
    fn hanged_man_takes_at_most_twenty() {
        let mut w = Wallet {
            money: 500,
            ..Wallet::default()
        };
        create(TarotType::TheHangedMan, Variant::Classic).on_apply(&mut w);
        assert_eq!(w.money, 480);

        let mut poor = Wallet {
            money: 7,
            ..Wallet::default()
        };
        create(TarotType::TheHangedMan, Variant::Classic).on_apply(&mut poor);
        assert_eq!(poor.money, 0);
        assert!(poor.messages[0].contains("Lost $7"));
    }

    #[test]
    fn star_resets_fatigue() {
        let mut w = Wallet {
            fatigue: 90,
            ..Wallet::default()
        };
        create(TarotType::TheStar, Variant::Gallery).on_apply(&mut w);
        assert_eq!(w.fatigue, 0);
    }

    #[test]
    fn variants_swap_the_themed_cards() {
        let wheel = create(TarotType::WheelOfFortune, Variant::Gallery);
        assert!(!wheel.modifiers.guarantees_mini_game_win);
        assert_eq!(wheel.modifiers.rent_chance_multiplier, 2.0);

        let hermit = create(TarotType::TheHermit, Variant::Gallery);
        assert!(hermit.modifiers.blocks_creation);
        assert!(!hermit.modifiers.blocks_work);

        let fool = create(TarotType::TheFool, Variant::Classic);
        assert_eq!(fool.expiry, Expiry::WorkSessions(3));
        assert_eq!(fool.modifiers.painting_value_multiplier, 1.0);
    }

    #[test]
    fn descriptions_show_remaining_counts() {
        let mut empress = create(TarotType::TheEmpress, Variant::Classic);
        assert_eq!(empress.description(), "Earnings doubled! (3 days left)");
        empress.expiry = Expiry::Days(1);
        assert_eq!(empress.description(), "Earnings doubled! (1 days left)");

        let fool = create(TarotType::TheFool, Variant::Gallery);
        assert_eq!(
            fool.description(),
            "Clumsy! Painting value -10% (3 paintings left)"
        );
    }
}
