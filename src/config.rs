//! Game configuration: every tunable number of the rules, loadable from TOML.
//!
//! All sections and keys are optional; anything missing falls back to the
//! defaults below.
//!
//! ```toml
//! [game]
//! variant = "gallery"
//! starting_money = 1500
//!
//! [slot]
//! win_rate = 0.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which income loop the game runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Work for a salary, gamble at the arcade.
    #[default]
    Classic,
    /// Paint, hang paintings and let the nightly market rent or sell them.
    Gallery,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameSettings {
    pub game: CoreSettings,
    pub work: WorkSettings,
    pub tarot: TarotSettings,
    pub slot: SlotSettings,
    pub mole: MoleSettings,
    pub gallery: GallerySettings,
    pub shop: ShopSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreSettings {
    pub variant: Variant,
    pub starting_money: i64,
    /// Maximum fatigue before the player must sleep.
    pub max_fatigue: u32,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            starting_money: 1000,
            max_fatigue: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkSettings {
    pub salary: i64,
    pub fatigue_cost: u32,
}

impl Default for WorkSettings {
    fn default() -> Self {
        Self {
            salary: 500,
            fatigue_cost: 30,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TarotSettings {
    /// Price of one reading.
    pub fortune_cost: i64,
    pub cards_per_draw: usize,
}

impl Default for TarotSettings {
    fn default() -> Self {
        Self {
            fortune_cost: 200,
            cards_per_draw: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotSettings {
    pub cost: i64,
    pub win_rate: f64,
    /// Share of wins that are big wins.
    pub big_win_share: f64,
    pub small_reward: i64,
    pub big_reward: i64,
}

impl Default for SlotSettings {
    fn default() -> Self {
        Self {
            cost: 50,
            win_rate: 0.7,
            big_win_share: 0.30,
            small_reward: 100,
            big_reward: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoleSettings {
    pub cost: i64,
    pub duration_secs: f64,
    pub hit_reward: i64,
    pub gold_hit_reward: i64,
    pub bomb_penalty: i64,
    pub bomb_rate: f64,
    pub gold_rate: f64,
    /// Gold share of moles in a guaranteed-win round (no bombs spawn).
    pub guaranteed_gold_rate: f64,
    pub spawn_delay_secs: (f64, f64),
    pub display_secs: (f64, f64),
}

impl Default for MoleSettings {
    fn default() -> Self {
        Self {
            cost: 50,
            duration_secs: 20.0,
            hit_reward: 30,
            gold_hit_reward: 100,
            bomb_penalty: 50,
            bomb_rate: 0.12,
            gold_rate: 0.35,
            guaranteed_gold_rate: 0.7,
            spawn_delay_secs: (0.6, 1.2),
            display_secs: (1.2, 2.5),
        }
    }
}

/// One entry of the drawing catalogue a new painting is picked from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawingEntry {
    pub name: String,
    pub price: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    pub painting_fatigue_cost: u32,
    pub promotion_cost: i64,
    pub max_display_slots: usize,
    pub base_sell_chance: f64,
    pub base_rent_chance: f64,
    pub sell_price_multiplier: f64,
    pub rent_income_multiplier: f64,
    pub min_rent_days: u32,
    pub max_rent_days: u32,
    /// Price range for "Untitled" paintings when the catalogue is empty.
    pub base_price_min: i64,
    pub base_price_max: i64,
    pub catalogue: Vec<DrawingEntry>,
}

impl Default for GallerySettings {
    fn default() -> Self {
        let catalogue = [
            ("Sunflowers at Dusk", 120),
            ("Harbor in the Rain", 150),
            ("Portrait of a Cat", 90),
            ("Quiet Forest", 110),
            ("Neon Alley", 180),
            ("Morning Tea", 80),
        ]
        .into_iter()
        .map(|(name, price)| DrawingEntry {
            name: name.to_string(),
            price,
        })
        .collect();

        Self {
            painting_fatigue_cost: 25,
            promotion_cost: 150,
            max_display_slots: 4,
            base_sell_chance: 0.05,
            base_rent_chance: 0.35,
            sell_price_multiplier: 3.0,
            rent_income_multiplier: 0.2,
            min_rent_days: 2,
            max_rent_days: 4,
            base_price_min: 80,
            base_price_max: 200,
            catalogue,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gift {
    pub name: String,
    pub price: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopSettings {
    pub gifts: Vec<Gift>,
}

impl Default for ShopSettings {
    fn default() -> Self {
        let gifts = [("Teddy Bear", 500), ("Music Box", 800), ("Birthday Cake", 1200)]
            .into_iter()
            .map(|(name, price)| Gift {
                name: name.to_string(),
                price,
            })
            .collect();
        Self { gifts }
    }
}

impl GameSettings {
    /// Load settings from a TOML file and validate them.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from a TOML string and validate them.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: GameSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the rules cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_positive("game.max_fatigue", self.game.max_fatigue as f64)?;
        validate_non_negative("game.starting_money", self.game.starting_money as f64)?;
        validate_non_negative("work.salary", self.work.salary as f64)?;
        validate_fatigue_cost("work.fatigue_cost", self.work.fatigue_cost, self.game.max_fatigue)?;
        validate_fatigue_cost(
            "gallery.painting_fatigue_cost",
            self.gallery.painting_fatigue_cost,
            self.game.max_fatigue,
        )?;
        validate_non_negative("tarot.fortune_cost", self.tarot.fortune_cost as f64)?;
        validate_positive("tarot.cards_per_draw", self.tarot.cards_per_draw as f64)?;
        if self.tarot.cards_per_draw > crate::tarot::ALL_CARDS.len() {
            return Err(invalid(
                "tarot.cards_per_draw",
                format!("at most {} distinct cards exist", crate::tarot::ALL_CARDS.len()),
            ));
        }

        validate_non_negative("slot.cost", self.slot.cost as f64)?;
        validate_probability("slot.win_rate", self.slot.win_rate)?;
        validate_probability("slot.big_win_share", self.slot.big_win_share)?;

        validate_non_negative("mole.cost", self.mole.cost as f64)?;
        validate_positive("mole.duration_secs", self.mole.duration_secs)?;
        validate_probability("mole.bomb_rate", self.mole.bomb_rate)?;
        validate_probability("mole.gold_rate", self.mole.gold_rate)?;
        validate_probability("mole.guaranteed_gold_rate", self.mole.guaranteed_gold_rate)?;
        if self.mole.bomb_rate + self.mole.gold_rate > 1.0 {
            return Err(invalid(
                "mole.gold_rate",
                "bomb_rate + gold_rate must not exceed 1".to_string(),
            ));
        }
        validate_range("mole.spawn_delay_secs", self.mole.spawn_delay_secs)?;
        validate_range("mole.display_secs", self.mole.display_secs)?;

        let g = &self.gallery;
        validate_probability("gallery.base_sell_chance", g.base_sell_chance)?;
        validate_probability("gallery.base_rent_chance", g.base_rent_chance)?;
        validate_non_negative("gallery.sell_price_multiplier", g.sell_price_multiplier)?;
        validate_non_negative("gallery.rent_income_multiplier", g.rent_income_multiplier)?;
        if g.min_rent_days == 0 || g.min_rent_days > g.max_rent_days {
            return Err(invalid(
                "gallery.min_rent_days",
                "must be at least 1 and not above max_rent_days".to_string(),
            ));
        }
        if g.base_price_min < 1 || g.base_price_min > g.base_price_max {
            return Err(invalid(
                "gallery.base_price_min",
                "must be at least 1 and not above base_price_max".to_string(),
            ));
        }

        if let Some(gift) = self.shop.gifts.iter().find(|g| g.price < 0) {
            return Err(invalid(
                "shop.gifts",
                format!("{} has a negative price", gift.name),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason,
    }
}

fn validate_probability(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not within 0..=1")))
    }
}

fn validate_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive")))
    }
}

fn validate_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must not be negative")))
    }
}

fn validate_fatigue_cost(field: &str, cost: u32, max_fatigue: u32) -> Result<(), ConfigError> {
    if cost <= max_fatigue {
        Ok(())
    } else {
        Err(invalid(field, format!("{cost} exceeds max_fatigue {max_fatigue}")))
    }
}

fn validate_range(field: &str, (lo, hi): (f64, f64)) -> Result<(), ConfigError> {
    if lo > 0.0 && lo <= hi {
        Ok(())
    } else {
        Err(invalid(field, format!("({lo}, {hi}) is not a positive range")))
    }
}
