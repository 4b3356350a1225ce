//! Nightly market: displayed paintings may sell or get rented, rentals pay
//! out and eventually come back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GallerySettings;
use crate::rng::SimpleRng;
use crate::round_money;

use super::{Gallery, PaintingState};

/// What happened overnight. Incomes are the amounts actually credited.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    pub rent_income: i64,
    pub newly_rented: Vec<String>,
    pub sold: Vec<String>,
    pub sell_income: i64,
    pub returned: Vec<String>,
}

impl MarketReport {
    pub fn is_quiet(&self) -> bool {
        self.rent_income == 0
            && self.newly_rented.is_empty()
            && self.sold.is_empty()
            && self.returned.is_empty()
    }
}

impl fmt::Display for MarketReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.rent_income > 0 {
            parts.push(format!("Rent collected: ${}", self.rent_income));
        }
        if !self.newly_rented.is_empty() {
            parts.push(format!("Newly rented: {}", self.newly_rented.join(", ")));
        }
        if !self.sold.is_empty() {
            parts.push(format!(
                "SOLD: {} (+${})",
                self.sold.join(", "),
                self.sell_income
            ));
        }
        if !self.returned.is_empty() {
            parts.push(format!("Returned: {}", self.returned.join(", ")));
        }
        if parts.is_empty() {
            write!(f, "Quiet night... no gallery activity.")
        } else {
            write!(f, "{}", parts.join(" | "))
        }
    }
}

/// Run one night of the market.
///
/// `rent_chance_multiplier` is the aggregate from tonight's tarot effects.
/// `earn` credits a base amount through the earnings multipliers and returns
/// what was actually credited.
pub fn process_night<F>(
    gallery: &mut Gallery,
    settings: &GallerySettings,
    rent_chance_multiplier: f64,
    rng: &mut SimpleRng,
    mut earn: F,
) -> MarketReport
where
    F: FnMut(i64) -> i64,
{
    let mut report = MarketReport::default();
    let promo = if gallery.promotion_active { 2.0 } else { 1.0 };
    let sell_chance = settings.base_sell_chance * promo;
    let rent_chance = settings.base_rent_chance * promo * rent_chance_multiplier;

    for painting in gallery
        .paintings
        .iter_mut()
        .filter(|p| p.state == PaintingState::Displayed)
    {
        if rng.next_f64() < sell_chance {
            painting.state = PaintingState::Sold;
            let price = round_money(painting.base_price as f64 * settings.sell_price_multiplier);
            report.sell_income += earn(price);
            report.sold.push(painting.title.clone());
            continue;
        }
        if rng.next_f64() < rent_chance {
            painting.state = PaintingState::Rented;
            let (lo, hi) = (settings.min_rent_days as i64, settings.max_rent_days as i64);
            painting.rent_days_left = rng.range_inclusive(lo, hi) as u32;
            report.newly_rented.push(painting.title.clone());
        }
    }

    for painting in gallery
        .paintings
        .iter_mut()
        .filter(|p| p.state == PaintingState::Rented)
    {
        let rent = round_money(painting.base_price as f64 * settings.rent_income_multiplier);
        report.rent_income += earn(rent);
        painting.rent_days_left = painting.rent_days_left.saturating_sub(1);
        if painting.rent_days_left == 0 {
            painting.state = PaintingState::Displayed;
            report.returned.push(painting.title.clone());
        }
    }

    gallery.purge_sold();
    gallery.promotion_active = false;
    tracing::debug!(
        sold = report.sold.len(),
        rented = report.newly_rented.len(),
        returned = report.returned.len(),
        rent_income = report.rent_income,
        "market night processed"
    );
    report
}
