//! Tarot Days game logic: pure functions over `LifeState`, fully testable.
//!
//! Every player-facing operation returns a `Result`. A rejected operation
//! pushes its message to the log and leaves the state untouched.

use crate::arcade::{slot, MoleRound, SpinOutcome, WhackHit};
use crate::config::Variant;
use crate::error::{GameError, Result};
use crate::gallery::{self, MarketReport, Painting};
use crate::round_money;
use crate::tarot::{self, ActiveEffect, ActiveEffects, TarotType};

use super::state::{LifeState, Player, Stats};

fn reject<T>(state: &mut LifeState, err: GameError) -> Result<T> {
    tracing::debug!(%err, "action rejected");
    state.add_log(&err.to_string());
    Err(err)
}

/// Common precondition for every action except whacks and clock updates.
fn ready(state: &mut LifeState) -> Result<()> {
    if state.is_cleared() {
        return reject(state, GameError::GameCleared);
    }
    if state.mole.is_some() {
        return reject(state, GameError::MiniGameBusy);
    }
    Ok(())
}

fn require_variant(state: &mut LifeState, variant: Variant, activity: &'static str) -> Result<()> {
    if state.variant() != variant {
        return reject(state, GameError::WrongVariant { activity });
    }
    Ok(())
}

fn log_worn_off(state: &mut LifeState, expired: Vec<ActiveEffect>) {
    for effect in expired {
        tracing::debug!(card = effect.name(), "tarot effect expired");
        state.add_log(&format!("{} has worn off.", effect.name()));
    }
}

// ── Money ───────────────────────────────────────────────────────

/// Credit `base` through the earnings multiplier. Split out from
/// [`earn_money`] so the market can credit while it holds the gallery.
fn credit_earnings(player: &mut Player, effects: &ActiveEffects, stats: &mut Stats, base: i64) -> i64 {
    let multiplier = effects.earnings_multiplier();
    let amount = round_money(base as f64 * multiplier);
    player.money += amount;
    stats.total_earned += amount;
    if multiplier > 1.0 {
        player.add_log(&format!("Bonus! +${} (x{:.1})", amount, multiplier));
    }
    amount
}

/// Earn `base` with all earnings multipliers applied. Returns the amount
/// credited.
pub fn earn_money(state: &mut LifeState, base: i64) -> i64 {
    credit_earnings(&mut state.player, &state.effects, &mut state.stats, base)
}

/// Earn a work salary: the salary bonus applies first, then the earnings
/// multiplier. Always at least 1.
pub fn earn_work_salary(state: &mut LifeState, base: i64) -> i64 {
    let bonus = state.effects.salary_bonus();
    let multiplier = state.effects.earnings_multiplier();
    let adjusted = round_money(base as f64 * (1.0 + bonus));
    let amount = round_money(adjusted as f64 * multiplier).max(1);
    state.player.money += amount;
    state.stats.total_earned += amount;
    amount
}

/// Credit money directly, no multipliers.
pub fn add_money(state: &mut LifeState, amount: i64) {
    state.player.money += amount;
}

/// Debit money directly. Never goes below zero.
pub fn deduct_money(state: &mut LifeState, amount: i64) {
    state.player.money = (state.player.money - amount).max(0);
}

pub fn spend_money(state: &mut LifeState, amount: i64) -> Result<()> {
    if state.player.money < amount {
        let err = GameError::NotEnoughMoney {
            need: amount,
            have: state.player.money,
        };
        return reject(state, err);
    }
    state.player.money -= amount;
    state.stats.total_spent += amount;
    Ok(())
}

// ── Fatigue ─────────────────────────────────────────────────────

pub fn add_fatigue(state: &mut LifeState, amount: u32) -> Result<()> {
    if state.effects.blocks_fatigue() {
        state.add_log("Magic power! No fatigue consumed.");
        return Ok(());
    }
    let over = state
        .player
        .fatigue
        .checked_add(amount)
        .map_or(true, |f| f > state.player.max_fatigue);
    if over {
        return reject(state, GameError::TooTired);
    }
    state.player.fatigue += amount;
    Ok(())
}

pub fn reset_fatigue(state: &mut LifeState) {
    state.player.fatigue = 0;
}

pub fn is_too_tired(state: &LifeState) -> bool {
    state.player.is_too_tired()
}

// ── Day flow ────────────────────────────────────────────────────

/// Go to work: costs fatigue, pays the salary.
pub fn work(state: &mut LifeState) -> Result<i64> {
    ready(state)?;
    require_variant(state, Variant::Classic, "Work")?;
    if state.effects.blocks_work() {
        return reject(state, GameError::WorkBlocked);
    }
    if state.player.is_too_tired() {
        return reject(state, GameError::TooTired);
    }
    let (salary, fatigue_cost) = (state.settings.work.salary, state.settings.work.fatigue_cost);
    add_fatigue(state, fatigue_cost)?;

    let earned = earn_work_salary(state, salary);
    state.stats.work_sessions += 1;
    state.add_log(&format!("A hard day's work: +${}", earned));
    tracing::debug!(earned, fatigue = state.player.fatigue, "work session");

    let expired = state.effects.on_work_performed();
    log_worn_off(state, expired);
    Ok(earned)
}

/// Start the next day. Effects are told about the new day and the expired
/// ones are dropped.
pub fn advance_day(state: &mut LifeState) {
    state.player.day += 1;
    let expired = state.effects.on_day_advanced();
    log_worn_off(state, expired);
    tracing::debug!(day = state.player.day, money = state.player.money, "day advanced");
}

/// Sleep through the night. In the gallery the market runs first, under
/// tonight's effects.
pub fn sleep(state: &mut LifeState) -> Result<Option<MarketReport>> {
    ready(state)?;

    let report = if state.variant() == Variant::Gallery {
        let rent_multiplier = state.effects.rent_chance_multiplier();
        let player = &mut state.player;
        let effects = &state.effects;
        let stats = &mut state.stats;
        let report = gallery::process_night(
            &mut state.gallery,
            &state.settings.gallery,
            rent_multiplier,
            &mut state.rng,
            |base| credit_earnings(player, effects, stats, base),
        );
        state.stats.paintings_sold += report.sold.len() as u32;
        state.add_log(&report.to_string());
        state.last_market = Some(report.clone());
        Some(report)
    } else {
        None
    };

    reset_fatigue(state);
    advance_day(state);
    state.add_log(&format!("Good morning! Day {} begins.", state.player.day));
    Ok(report)
}

// ── Fortune teller ──────────────────────────────────────────────

/// Pay for a reading and lay out the cards to choose from.
pub fn draw_fortune(state: &mut LifeState) -> Result<Vec<TarotType>> {
    ready(state)?;
    if state.pending_draw.is_some() {
        return reject(state, GameError::DrawPending);
    }
    let cost = state.settings.tarot.fortune_cost;
    spend_money(state, cost)?;

    let cards = tarot::deal(&mut state.rng, state.settings.tarot.cards_per_draw);
    let names: Vec<&str> = cards.iter().map(|c| c.name()).collect();
    state.add_log(&format!("The fortune teller lays out: {}", names.join(", ")));
    state.stats.fortunes_drawn += 1;
    state.pending_draw = Some(cards.clone());
    Ok(cards)
}

/// Take one of the laid-out cards. Its effect applies at once.
pub fn pick_card(state: &mut LifeState, index: usize) -> Result<ActiveEffect> {
    ready(state)?;
    let card = match state.pending_draw.as_ref().map(|cards| cards.get(index).copied()) {
        None => return reject(state, GameError::NoDrawPending),
        Some(None) => return reject(state, GameError::InvalidCard(index)),
        Some(Some(card)) => card,
    };
    state.pending_draw = None;
    let variant = state.variant();
    Ok(state.effects.apply(card, variant, &mut state.player))
}

// ── Arcade ──────────────────────────────────────────────────────

pub fn spin_slot(state: &mut LifeState) -> Result<SpinOutcome> {
    ready(state)?;
    let cost = state.settings.slot.cost;
    spend_money(state, cost)?;
    state.stats.slot_spins += 1;

    let guaranteed = state.effects.guarantees_mini_game_win();
    if guaranteed {
        state.add_log("Wheel of Fortune activated! Guaranteed BIG WIN!");
    }
    let result = slot::roll_result(&state.settings.slot, guaranteed, &mut state.rng);
    let reels = slot::reels_for(result, &mut state.rng);
    let expired = state.effects.on_mini_game_played();
    log_worn_off(state, expired);

    let base = slot::base_reward(&state.settings.slot, result);
    let payout = if base > 0 { earn_money(state, base) } else { 0 };
    match result {
        slot::SlotResult::BigWin => state.add_log(&format!("JACKPOT! You won ${}!", payout)),
        slot::SlotResult::SmallWin => state.add_log(&format!("Nice! You won ${}!", payout)),
        slot::SlotResult::Lose => state.add_log("Almost! Try again!"),
    }

    let outcome = SpinOutcome {
        result,
        reels,
        payout,
    };
    tracing::debug!(?result, payout, "slot spin");
    state.last_spin = Some(outcome.clone());
    Ok(outcome)
}

/// Pay for a Whac-A-Mole round and start it.
pub fn start_mole(state: &mut LifeState) -> Result<()> {
    ready(state)?;
    let cost = state.settings.mole.cost;
    spend_money(state, cost)?;
    state.stats.mole_rounds += 1;

    let guaranteed = state.effects.guarantees_mini_game_win();
    if guaranteed {
        state.add_log("Wheel of Fortune! All moles are golden!");
    }
    let expired = state.effects.on_mini_game_played();
    log_worn_off(state, expired);

    state.mole = Some(MoleRound::new(&state.settings.mole, guaranteed, &mut state.rng));
    state.clock.reset();
    tracing::debug!(guaranteed, "mole round started");
    Ok(())
}

pub fn whack(state: &mut LifeState, hole: usize) -> Result<Option<WhackHit>> {
    if state.is_cleared() {
        return reject(state, GameError::GameCleared);
    }
    let outcome = match state.mole.as_mut() {
        None => Err(GameError::NoRound),
        Some(round) => round.whack(hole, &state.settings.mole),
    };
    match outcome {
        Ok(hit) => Ok(hit),
        Err(err) => reject(state, err),
    }
}

/// Feed a wall-clock timestamp to the running round. Returns the payout
/// when the round ends on this update.
pub fn update_clock(state: &mut LifeState, now_ms: f64) -> Option<i64> {
    state.mole.as_ref()?;
    let ticks = state.clock.update(now_ms);
    advance_mole(state, ticks)
}

/// Advance the running round by `ticks`. Returns the payout when the round
/// ends.
pub fn advance_mole(state: &mut LifeState, ticks: u32) -> Option<i64> {
    let round = state.mole.as_mut()?;
    let mut finished = round.is_finished();
    for _ in 0..ticks {
        if round.tick(&state.settings.mole, &mut state.rng) {
            finished = true;
            break;
        }
    }
    if !finished {
        return None;
    }

    let round = state.mole.take()?;
    let payout = if round.score > 0 {
        let paid = earn_money(state, round.score);
        state.add_log(&format!("Whac-A-Mole complete! Earned ${}!", paid));
        paid
    } else {
        state.add_log("Whac-A-Mole complete! Better luck next time!");
        0
    };
    tracing::debug!(score = round.score, hits = round.hits, payout, "mole round over");
    Some(payout)
}

// ── Gallery ─────────────────────────────────────────────────────

/// Paint something new. Costs fatigue; the value follows tonight's effects.
pub fn create_painting(state: &mut LifeState) -> Result<Painting> {
    ready(state)?;
    require_variant(state, Variant::Gallery, "Painting")?;
    if state.effects.blocks_creation() {
        return reject(state, GameError::CreationBlocked);
    }
    let fatigue_cost = state.settings.gallery.painting_fatigue_cost;
    add_fatigue(state, fatigue_cost)?;

    let number = state.gallery.created + 1;
    let settings = &state.settings.gallery;
    let (title, price) = if settings.catalogue.is_empty() {
        let price = state
            .rng
            .range_inclusive(settings.base_price_min, settings.base_price_max);
        (format!("Untitled #{}", number), price)
    } else {
        let entry = &settings.catalogue[state.rng.index(settings.catalogue.len())];
        let title = if entry.name.is_empty() {
            format!("Untitled #{}", number)
        } else {
            entry.name.clone()
        };
        (title, entry.price.max(1))
    };

    let value = round_money(price as f64 * state.effects.painting_value_multiplier()).max(1);
    let painting = state.gallery.add(title, value).clone();
    state.stats.paintings_created += 1;
    state.add_log(&format!("Created \"{}\" (Value: ${})", painting.title, value));

    let expired = state.effects.on_painting_created();
    log_worn_off(state, expired);
    Ok(painting)
}

pub fn display_painting(state: &mut LifeState, id: &str) -> Result<()> {
    ready(state)?;
    require_variant(state, Variant::Gallery, "The gallery")?;
    let slots = state.settings.gallery.max_display_slots;
    match state.gallery.display(id, slots).map(|p| p.title.clone()) {
        Ok(title) => {
            state.add_log(&format!("\"{}\" is on the wall.", title));
            Ok(())
        }
        Err(err) => reject(state, err),
    }
}

pub fn remove_from_display(state: &mut LifeState, id: &str) -> Result<()> {
    ready(state)?;
    require_variant(state, Variant::Gallery, "The gallery")?;
    match state.gallery.remove_from_display(id).map(|p| p.title.clone()) {
        Ok(title) => {
            state.add_log(&format!("\"{}\" is back in storage.", title));
            Ok(())
        }
        Err(err) => reject(state, err),
    }
}

/// Pay for a promotion: sell and rent chances double for tonight's market.
pub fn promote(state: &mut LifeState) -> Result<()> {
    ready(state)?;
    require_variant(state, Variant::Gallery, "Promotion")?;
    if state.gallery.promotion_active {
        return reject(state, GameError::PromotionActive);
    }
    let cost = state.settings.gallery.promotion_cost;
    spend_money(state, cost)?;
    state.gallery.promotion_active = true;
    state.add_log("Promotion active! Rent & sell chances doubled tonight!");
    Ok(())
}

// ── Shop ────────────────────────────────────────────────────────

/// Buy a birthday gift. Any gift clears the game.
pub fn buy_gift(state: &mut LifeState, index: usize) -> Result<String> {
    ready(state)?;
    let Some(gift) = state.settings.shop.gifts.get(index).cloned() else {
        return reject(state, GameError::UnknownGift(index));
    };
    spend_money(state, gift.price)?;
    state.add_log(&format!("You bought a {}! Happy Birthday!", gift.name));
    tracing::info!(gift = %gift.name, day = state.player.day, "game cleared");
    state.cleared_with = Some(gift.name.clone());
    Ok(gift.name)
}
