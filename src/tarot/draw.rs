//! Weighted fortune-teller draws.

use crate::rng::SimpleRng;

use super::TarotType;

/// Relative draw weights. Good cards come up most often.
pub const DRAW_TABLE: [(TarotType, u32); 11] = [
    (TarotType::AceOfPentacles, 15),
    (TarotType::TheEmpress, 12),
    (TarotType::TenOfPentacles, 12),
    (TarotType::WheelOfFortune, 8),
    (TarotType::TheMagician, 10),
    (TarotType::TheStar, 10),
    (TarotType::TwoOfPentacles, 8),
    (TarotType::TheHermit, 7),
    (TarotType::TheFool, 7),
    (TarotType::TheHangedMan, 6),
    (TarotType::TheMoon, 5),
];

/// Pick one card from `pool` by weight.
fn pick(pool: &[(TarotType, u32)], rng: &mut SimpleRng) -> usize {
    let total: u32 = pool.iter().map(|&(_, w)| w).sum();
    let roll = rng.range_inclusive(0, total as i64 - 1) as u32;
    let mut cumulative = 0;
    for (i, &(_, weight)) in pool.iter().enumerate() {
        cumulative += weight;
        if roll < cumulative {
            return i;
        }
    }
    pool.len() - 1
}

/// Deal `count` distinct cards. Asking for more cards than exist deals the
/// whole deck.
pub fn deal(rng: &mut SimpleRng, count: usize) -> Vec<TarotType> {
    let mut pool: Vec<(TarotType, u32)> = DRAW_TABLE.to_vec();
    let mut hand = Vec::with_capacity(count.min(pool.len()));
    while hand.len() < count && !pool.is_empty() {
        let i = pick(&pool, rng);
        hand.push(pool.remove(i).0);
    }
    hand
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tarot::ALL_CARDS;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn table_covers_every_card_once() {
        for card in ALL_CARDS {
            assert_eq!(DRAW_TABLE.iter().filter(|(c, _)| *c == card).count(), 1);
        }
        let total: u32 = DRAW_TABLE.iter().map(|(_, w)| w).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn deals_three() {
        let mut rng = SimpleRng::new(3);
        assert_eq!(deal(&mut rng, 3).len(), 3);
    }

    #[test]
    fn oversized_request_deals_whole_deck() {
        let mut rng = SimpleRng::new(3);
        assert_eq!(deal(&mut rng, 20).len(), ALL_CARDS.len());
    }

    #[test]
    fn heavy_cards_come_up_more_often() {
        let mut rng = SimpleRng::new(99);
        let mut counts: HashMap<TarotType, u32> = HashMap::new();
        for _ in 0..5000 {
            *counts.entry(deal(&mut rng, 1)[0]).or_default() += 1;
        }
        let ace = counts[&TarotType::AceOfPentacles];
        let moon = counts[&TarotType::TheMoon];
        assert!(ace > moon * 2, "ace {} moon {}", ace, moon);
    }

    proptest! {
        #[test]
        fn prop_hand_has_no_duplicates(seed in any::<u64>(), count in 0usize..12) {
            let mut rng = SimpleRng::new(seed);
            let hand = deal(&mut rng, count);
            prop_assert_eq!(hand.len(), count.min(ALL_CARDS.len()));
            for (i, a) in hand.iter().enumerate() {
                prop_assert!(!hand[i + 1..].contains(a));
            }
        }
    }
}
