//! Balance simulator: plays whole runs with a fixed strategy.
//! Run the balance report with: cargo test simulate_ -- --nocapture

use serde::Serialize;

use crate::arcade::mole::MoleKind;
use crate::arcade::HOLES;
use crate::config::Variant;
use crate::gallery::PaintingState;
use crate::tarot::TarotType;

use super::logic;
use super::state::{Hud, LifeState, Stats};

/// Work shifts tried per day. The Magician makes work free, so there must
/// be a cap.
const MAX_SHIFTS_PER_DAY: u32 = 5;
const MAX_PAINTINGS_PER_DAY: u32 = 6;
const MAX_SPINS_PER_DAY: u32 = 10;
/// Money a careful strategy never gambles or promotes below.
const RESERVE: i64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Works every shift it can and saves up for the best gift.
    Worker,
    /// Works, then spends the surplus at the arcade.
    Gambler,
    /// Paints, fills the wall and promotes the gallery.
    Painter,
    /// Reads the cards every morning, then works or paints.
    Mystic,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimReport {
    pub strategy: Strategy,
    pub variant: Variant,
    pub seed: u64,
    pub days_played: u32,
    pub cleared_on_day: Option<u32>,
    pub hud: Hud,
    pub stats: Stats,
    pub log_tail: Vec<String>,
}

/// Play up to `days` days, stopping early once a gift clears the game.
pub fn simulate(state: &mut LifeState, strategy: Strategy, days: u32, seed: u64) -> SimReport {
    let mut days_played = 0;
    let mut cleared_on_day = None;

    for _ in 0..days {
        if state.is_cleared() {
            break;
        }
        play_day(state, strategy);
        days_played += 1;
        if try_buy_gift(state) {
            cleared_on_day = Some(state.player.day);
            break;
        }
        if let Err(err) = logic::sleep(state) {
            tracing::warn!(%err, day = state.player.day, "could not end the day, stopping");
            break;
        }
    }

    tracing::info!(
        ?strategy,
        days_played,
        money = state.player.money,
        cleared = state.is_cleared(),
        "simulation finished"
    );

    let tail_start = state.player.log.len().saturating_sub(10);
    SimReport {
        strategy,
        variant: state.variant(),
        seed,
        days_played,
        cleared_on_day,
        hud: state.hud(),
        stats: state.stats.clone(),
        log_tail: state.player.log[tail_start..].to_vec(),
    }
}

fn play_day(state: &mut LifeState, strategy: Strategy) {
    let classic = state.variant() == Variant::Classic;
    match strategy {
        Strategy::Worker => routine(state, classic),
        Strategy::Gambler => {
            routine(state, classic);
            gamble(state);
        }
        Strategy::Painter => routine(state, classic),
        Strategy::Mystic => {
            read_cards(state);
            routine(state, classic);
        }
    }
}

/// The variant's income activity.
fn routine(state: &mut LifeState, classic: bool) {
    if classic {
        for _ in 0..MAX_SHIFTS_PER_DAY {
            if logic::work(state).is_err() {
                break;
            }
        }
    } else {
        tend_gallery(state);
    }
}

fn tend_gallery(state: &mut LifeState) {
    for _ in 0..MAX_PAINTINGS_PER_DAY {
        if logic::create_painting(state).is_err() {
            break;
        }
    }

    let mut stock: Vec<(i64, String)> = state
        .gallery
        .in_state(PaintingState::Inventory)
        .map(|p| (p.base_price, p.id.clone()))
        .collect();
    stock.sort_by(|a, b| b.0.cmp(&a.0));
    let slots = state.settings.gallery.max_display_slots;
    for (_, id) in stock {
        if state.gallery.wall_count() >= slots {
            break;
        }
        let _ = logic::display_painting(state, &id);
    }

    let cost = state.settings.gallery.promotion_cost;
    if state.gallery.wall_count() >= 2 && state.player.money >= cost + RESERVE {
        let _ = logic::promote(state);
    }
}

fn gamble(state: &mut LifeState) {
    let spin_cost = state.settings.slot.cost;
    for _ in 0..MAX_SPINS_PER_DAY {
        if state.player.money < RESERVE + spin_cost || logic::spin_slot(state).is_err() {
            break;
        }
    }
    if state.player.money >= RESERVE + state.settings.mole.cost && logic::start_mole(state).is_ok() {
        play_mole_round(state);
    }
}

/// A sharp-eyed player: whacks every mole that is not a bomb, every tick.
fn play_mole_round(state: &mut LifeState) {
    while state.mole.is_some() {
        let targets: Vec<usize> = match state.mole.as_ref() {
            Some(round) => (0..HOLES)
                .filter(|&i| matches!(round.holes[i], Some(m) if m.kind != MoleKind::Bomb))
                .collect(),
            None => Vec::new(),
        };
        for hole in targets {
            let _ = logic::whack(state, hole);
        }
        logic::advance_mole(state, 1);
    }
}

fn card_preference(card: TarotType, variant: Variant) -> i32 {
    let gallery = variant == Variant::Gallery;
    match card {
        TarotType::TheEmpress => 10,
        TarotType::TheMagician => 8,
        TarotType::TenOfPentacles if gallery => 3,
        TarotType::TenOfPentacles => 7,
        TarotType::WheelOfFortune => 6,
        TarotType::AceOfPentacles => 5,
        TarotType::TheStar => 4,
        TarotType::TwoOfPentacles => 2,
        TarotType::TheHangedMan => 1,
        TarotType::TheMoon if gallery => 0,
        TarotType::TheMoon => 1,
        TarotType::TheHermit | TarotType::TheFool => 0,
    }
}

fn read_cards(state: &mut LifeState) {
    let cost = state.settings.tarot.fortune_cost;
    if state.player.money < cost + RESERVE / 2 {
        return;
    }
    let Ok(cards) = logic::draw_fortune(state) else {
        return;
    };
    let variant = state.variant();
    let best = cards
        .iter()
        .enumerate()
        .max_by_key(|(_, c)| card_preference(**c, variant))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let _ = logic::pick_card(state, best);
}

/// Buy the priciest gift once it is affordable.
fn try_buy_gift(state: &mut LifeState) -> bool {
    let target = state
        .settings
        .shop
        .gifts
        .iter()
        .enumerate()
        .max_by_key(|(_, g)| g.price)
        .map(|(i, g)| (i, g.price));
    match target {
        Some((index, price)) if state.player.money >= price => {
            logic::buy_gift(state, index).is_ok()
        }
        _ => false,
    }
}
