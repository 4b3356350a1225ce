//! Paintings and the gallery wall.

pub mod market;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

pub use market::{process_night, MarketReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaintingState {
    #[default]
    Inventory,
    Displayed,
    Rented,
    Sold,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Painting {
    pub id: String,
    pub title: String,
    pub base_price: i64,
    pub state: PaintingState,
    /// Nights left on the current rental.
    #[serde(default)]
    pub rent_days_left: u32,
}

/// Every painting the player owns plus tonight's promotion flag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gallery {
    pub paintings: Vec<Painting>,
    /// Counter behind `painting_<n>` ids and "Untitled #n" titles.
    pub created: u32,
    pub promotion_active: bool,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fresh painting to inventory.
    pub fn add(&mut self, title: String, base_price: i64) -> &Painting {
        self.created += 1;
        self.paintings.push(Painting {
            id: format!("painting_{}", self.created),
            title,
            base_price: base_price.max(1),
            state: PaintingState::Inventory,
            rent_days_left: 0,
        });
        &self.paintings[self.paintings.len() - 1]
    }

    pub fn get(&self, id: &str) -> Option<&Painting> {
        self.paintings.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Painting> {
        self.paintings
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| GameError::PaintingNotFound(id.to_string()))
    }

    pub fn in_state(&self, state: PaintingState) -> impl Iterator<Item = &Painting> {
        self.paintings.iter().filter(move |p| p.state == state)
    }

    /// Paintings currently hanging and available to the market.
    pub fn wall_count(&self) -> usize {
        self.in_state(PaintingState::Displayed).count()
    }

    /// Hang an inventory painting.
    pub fn display(&mut self, id: &str, max_slots: usize) -> Result<&Painting> {
        let full = self.wall_count() >= max_slots;
        let painting = self.get_mut(id)?;
        if painting.state != PaintingState::Inventory {
            return Err(GameError::PaintingNotFound(id.to_string()));
        }
        if full {
            return Err(GameError::DisplayFull);
        }
        painting.state = PaintingState::Displayed;
        Ok(painting)
    }

    /// Take a displayed painting back into inventory.
    pub fn remove_from_display(&mut self, id: &str) -> Result<&Painting> {
        let painting = self.get_mut(id)?;
        if painting.state != PaintingState::Displayed {
            return Err(GameError::PaintingNotFound(id.to_string()));
        }
        painting.state = PaintingState::Inventory;
        Ok(painting)
    }

    /// Lift the id counter past every `painting_<n>` already held, so a
    /// restored gallery never hands out a taken id.
    pub fn resume_numbering(&mut self) {
        let highest = self
            .paintings
            .iter()
            .filter_map(|p| p.id.strip_prefix("painting_")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        self.created = self.created.max(highest);
    }

    pub fn purge_sold(&mut self) {
        self.paintings.retain(|p| p.state != PaintingState::Sold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_count_up() {
        let mut g = Gallery::new();
        assert_eq!(g.add("A".into(), 100).id, "painting_1");
        assert_eq!(g.add("B".into(), 100).id, "painting_2");
        assert_eq!(g.in_state(PaintingState::Inventory).count(), 2);
    }

    #[test]
    fn price_is_at_least_one() {
        let mut g = Gallery::new();
        assert_eq!(g.add("Scribble".into(), 0).base_price, 1);
    }

    #[test]
    fn display_respects_slot_limit() {
        let mut g = Gallery::new();
        for i in 0..3 {
            g.add(format!("P{}", i), 100);
        }
        g.display("painting_1", 2).unwrap();
        g.display("painting_2", 2).unwrap();
        assert_eq!(g.display("painting_3", 2).unwrap_err(), GameError::DisplayFull);
        assert_eq!(g.wall_count(), 2);
    }

    #[test]
    fn rented_paintings_free_their_slot() {
        let mut g = Gallery::new();
        g.add("A".into(), 100);
        g.add("B".into(), 100);
        g.display("painting_1", 1).unwrap();
        g.paintings[0].state = PaintingState::Rented;
        g.display("painting_2", 1).unwrap();
        assert_eq!(g.wall_count(), 1);
    }

    #[test]
    fn only_inventory_can_be_displayed() {
        let mut g = Gallery::new();
        g.add("A".into(), 100);
        g.display("painting_1", 4).unwrap();
        assert!(g.display("painting_1", 4).is_err());
        assert_eq!(
            g.display("painting_9", 4).unwrap_err(),
            GameError::PaintingNotFound("painting_9".into())
        );
    }

    #[test]
    fn remove_returns_to_inventory() {
        let mut g = Gallery::new();
        g.add("A".into(), 100);
        assert!(g.remove_from_display("painting_1").is_err());
        g.display("painting_1", 4).unwrap();
        let p = g.remove_from_display("painting_1").unwrap();
        assert_eq!(p.state, PaintingState::Inventory);
    }

    #[test]
    fn resumed_numbering_skips_held_ids() {
        let mut g = Gallery::new();
        g.add("A".into(), 100);
        g.add("B".into(), 100);
        g.add("C".into(), 100);
        g.paintings.remove(0);
        g.created = 0;
        g.resume_numbering();
        assert_eq!(g.created, 3);
        assert_eq!(g.add("D".into(), 100).id, "painting_4");
    }

    #[test]
    fn resumed_numbering_never_lowers_counter() {
        let mut g = Gallery::new();
        g.add("A".into(), 100);
        g.created = 7;
        g.resume_numbering();
        assert_eq!(g.created, 7);
    }

    #[test]
    fn purge_drops_sold() {
        let mut g = Gallery::new();
        g.add("A".into(), 100);
        g.add("B".into(), 100);
        g.paintings[0].state = PaintingState::Sold;
        g.purge_sold();
        assert_eq!(g.paintings.len(), 1);
        assert_eq!(g.paintings[0].title, "B");
    }
}
