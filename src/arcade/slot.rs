//! Slot machine: one roll decides the result, the reels are dressed to match.

use serde::{Deserialize, Serialize};

use crate::config::SlotSettings;
use crate::rng::SimpleRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotResult {
    Lose,
    SmallWin,
    BigWin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotSymbol {
    Cherry,
    Star,
    Bell,
    Seven,
    Diamond,
}

pub const SYMBOLS: [SlotSymbol; 5] = [
    SlotSymbol::Cherry,
    SlotSymbol::Star,
    SlotSymbol::Bell,
    SlotSymbol::Seven,
    SlotSymbol::Diamond,
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub result: SlotResult,
    pub reels: [SlotSymbol; 3],
    /// Amount credited after earnings multipliers.
    pub payout: i64,
}

/// Decide a spin. A guaranteed spin is always a big win.
pub fn roll_result(settings: &SlotSettings, guaranteed: bool, rng: &mut SimpleRng) -> SlotResult {
    if guaranteed {
        return SlotResult::BigWin;
    }
    if rng.next_f64() < settings.win_rate {
        if rng.next_f64() < settings.big_win_share {
            SlotResult::BigWin
        } else {
            SlotResult::SmallWin
        }
    } else {
        SlotResult::Lose
    }
}

/// Base reward before earnings multipliers.
pub fn base_reward(settings: &SlotSettings, result: SlotResult) -> i64 {
    match result {
        SlotResult::Lose => 0,
        SlotResult::SmallWin => settings.small_reward,
        SlotResult::BigWin => settings.big_reward,
    }
}

/// Reels that read as `result`: three of a kind, a pair, or all different.
pub fn reels_for(result: SlotResult, rng: &mut SimpleRng) -> [SlotSymbol; 3] {
    match result {
        SlotResult::BigWin => [SYMBOLS[rng.index(SYMBOLS.len())]; 3],
        SlotResult::SmallWin => {
            let [pair, odd] = distinct_symbols::<2>(rng);
            let mut reels = [pair; 3];
            reels[rng.index(3)] = odd;
            reels
        }
        SlotResult::Lose => distinct_symbols::<3>(rng),
    }
}

fn distinct_symbols<const N: usize>(rng: &mut SimpleRng) -> [SlotSymbol; N] {
    let mut pool = SYMBOLS.to_vec();
    std::array::from_fn(|_| pool.remove(rng.index(pool.len())))
}

pub fn classify(reels: &[SlotSymbol; 3]) -> SlotResult {
    let [a, b, c] = *reels;
    if a == b && b == c {
        SlotResult::BigWin
    } else if a == b || b == c || a == c {
        SlotResult::SmallWin
    } else {
        SlotResult::Lose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn guaranteed_spin_is_big() {
        let mut rng = SimpleRng::new(1);
        let settings = SlotSettings {
            win_rate: 0.0,
            ..SlotSettings::default()
        };
        assert_eq!(roll_result(&settings, true, &mut rng), SlotResult::BigWin);
    }

    #[test]
    fn zero_win_rate_always_loses() {
        let mut rng = SimpleRng::new(1);
        let settings = SlotSettings {
            win_rate: 0.0,
            ..SlotSettings::default()
        };
        for _ in 0..100 {
            assert_eq!(roll_result(&settings, false, &mut rng), SlotResult::Lose);
        }
    }

    #[test]
    fn certain_win_splits_by_big_share() {
        let mut rng = SimpleRng::new(1);
        let small_only = SlotSettings {
            win_rate: 1.0,
            big_win_share: 0.0,
            ..SlotSettings::default()
        };
        for _ in 0..50 {
            assert_eq!(
                roll_result(&small_only, false, &mut rng),
                SlotResult::SmallWin
            );
        }
    }

    #[test]
    fn default_win_rate_is_roughly_seventy_percent() {
        let mut rng = SimpleRng::new(2024);
        let settings = SlotSettings::default();
        let wins = (0..10_000)
            .filter(|_| roll_result(&settings, false, &mut rng) != SlotResult::Lose)
            .count();
        assert!((6_500..7_500).contains(&wins), "wins {}", wins);
    }

    #[test]
    fn rewards() {
        let s = SlotSettings::default();
        assert_eq!(base_reward(&s, SlotResult::Lose), 0);
        assert_eq!(base_reward(&s, SlotResult::SmallWin), 100);
        assert_eq!(base_reward(&s, SlotResult::BigWin), 300);
    }

    proptest! {
        #[test]
        fn prop_reels_match_result(seed in any::<u64>(), pick in 0usize..3) {
            let result = [SlotResult::Lose, SlotResult::SmallWin, SlotResult::BigWin][pick];
            let mut rng = SimpleRng::new(seed);
            let reels = reels_for(result, &mut rng);
            prop_assert_eq!(classify(&reels), result);
        }
    }
}
