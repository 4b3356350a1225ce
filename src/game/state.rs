//! Life-sim state: the player's stats, the active tarot effects, the gallery
//! and whatever mini-game is on screen.

use serde::{Deserialize, Serialize};

use crate::arcade::{MoleRound, SpinOutcome};
use crate::config::{GameSettings, Variant};
use crate::gallery::{Gallery, MarketReport, PaintingState};
use crate::rng::SimpleRng;
use crate::tarot::{ActiveEffects, EffectTarget, TarotType};
use crate::time::FixedClock;

/// Messages kept in the toast log.
pub const MAX_LOG: usize = 30;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub money: i64,
    pub fatigue: u32,
    pub max_fatigue: u32,
    pub day: u32,
    pub log: Vec<String>,
}

impl Player {
    pub fn new(money: i64, max_fatigue: u32) -> Self {
        Self {
            money,
            fatigue: 0,
            max_fatigue,
            day: 1,
            log: Vec::new(),
        }
    }

    pub fn add_log(&mut self, text: &str) {
        self.log.push(text.to_string());
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    pub fn is_too_tired(&self) -> bool {
        self.fatigue >= self.max_fatigue
    }
}

impl EffectTarget for Player {
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
        self.add_log(text);
    }
}

/// Running totals for reports and balance checks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub work_sessions: u32,
    pub fortunes_drawn: u32,
    pub slot_spins: u32,
    pub mole_rounds: u32,
    pub paintings_created: u32,
    pub paintings_sold: u32,
    /// Money credited through earnings (salary, prizes, gallery).
    pub total_earned: i64,
    pub total_spent: i64,
}

pub struct LifeState {
    pub settings: GameSettings,
    pub player: Player,
    pub effects: ActiveEffects,
    pub gallery: Gallery,
    /// Cards laid out by the fortune teller, waiting for a pick.
    pub pending_draw: Option<Vec<TarotType>>,
    pub mole: Option<MoleRound>,
    pub clock: FixedClock,
    pub rng: SimpleRng,
    /// Name of the gift that cleared the game.
    pub cleared_with: Option<String>,
    pub stats: Stats,
    pub last_spin: Option<SpinOutcome>,
    pub last_market: Option<MarketReport>,
}

impl LifeState {
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        let player = Player::new(settings.game.starting_money, settings.game.max_fatigue);
        Self {
            settings,
            player,
            effects: ActiveEffects::new(),
            gallery: Gallery::new(),
            pending_draw: None,
            mole: None,
            clock: FixedClock::new(),
            rng: SimpleRng::new(seed),
            cleared_with: None,
            stats: Stats::default(),
            last_spin: None,
            last_market: None,
        }
    }

    pub fn variant(&self) -> Variant {
        self.settings.game.variant
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared_with.is_some()
    }

    pub fn add_log(&mut self, text: &str) {
        self.player.add_log(text);
    }

    pub fn hud(&self) -> Hud {
        let gallery = (self.variant() == Variant::Gallery).then(|| GalleryHud {
            inventory: self.gallery.in_state(PaintingState::Inventory).count(),
            displayed: self.gallery.wall_count(),
            max_display: self.settings.gallery.max_display_slots,
            rented: self.gallery.in_state(PaintingState::Rented).count(),
            promotion_active: self.gallery.promotion_active,
        });
        Hud {
            money: self.player.money,
            fatigue: self.player.fatigue,
            max_fatigue: self.player.max_fatigue,
            day: self.player.day,
            effects: self.effects.display(),
            effect_symbols: self.effects.iter().map(|e| e.symbol().to_string()).collect(),
            pending_draw: self
                .pending_draw
                .as_ref()
                .map(|cards| cards.iter().map(|c| c.name().to_string()).collect())
                .unwrap_or_default(),
            chaotic_work_button: self.effects.chaotic_work_button(),
            mole_seconds_left: self.mole.as_ref().map(|r| r.seconds_left()),
            gallery,
            cleared_with: self.cleared_with.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GalleryHud {
    pub inventory: usize,
    pub displayed: usize,
    pub max_display: usize,
    pub rented: usize,
    pub promotion_active: bool,
}

/// Snapshot of everything the status bar shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Hud {
    pub money: i64,
    pub fatigue: u32,
    pub max_fatigue: u32,
    pub day: u32,
    pub effects: String,
    pub effect_symbols: Vec<String>,
    pub pending_draw: Vec<String>,
    pub chaotic_work_button: bool,
    pub mole_seconds_left: Option<u32>,
    pub gallery: Option<GalleryHud>,
    pub cleared_with: Option<String>,
}
