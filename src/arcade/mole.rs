//! Whac-a-mole round, advanced in fixed ticks.

use serde::{Deserialize, Serialize};

use crate::config::MoleSettings;
use crate::rng::SimpleRng;
use crate::time::{secs_to_ticks, ticks_to_display_secs};

/// 3×3 grid.
pub const HOLES: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoleKind {
    Normal,
    Gold,
    Bomb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mole {
    pub kind: MoleKind,
    /// Ticks until it ducks back down on its own.
    pub ticks_left: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WhackHit {
    pub kind: MoleKind,
    /// Score change, negative for bombs.
    pub delta: i64,
}

#[derive(Clone, Debug)]
pub struct MoleRound {
    pub holes: [Option<Mole>; HOLES],
    pub score: i64,
    pub hits: u32,
    /// Latched at start; a guaranteed round never spawns bombs.
    pub guaranteed: bool,
    ticks_left: u32,
    spawn_timer: u32,
}

impl MoleRound {
    pub fn new(settings: &MoleSettings, guaranteed: bool, rng: &mut SimpleRng) -> Self {
        Self {
            holes: [None; HOLES],
            score: 0,
            hits: 0,
            guaranteed,
            ticks_left: secs_to_ticks(settings.duration_secs),
            spawn_timer: spawn_delay(settings, rng),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.ticks_left == 0
    }

    pub fn ticks_left(&self) -> u32 {
        self.ticks_left
    }

    /// Whole seconds left, rounded up.
    pub fn seconds_left(&self) -> u32 {
        ticks_to_display_secs(self.ticks_left)
    }

    pub fn active_moles(&self) -> usize {
        self.holes.iter().flatten().count()
    }

    /// Advance one tick: moles duck, a new one may pop up. Returns true once
    /// the round is over.
    pub fn tick(&mut self, settings: &MoleSettings, rng: &mut SimpleRng) -> bool {
        if self.is_finished() {
            return true;
        }
        self.ticks_left -= 1;

        for hole in self.holes.iter_mut() {
            if let Some(mole) = hole {
                mole.ticks_left = mole.ticks_left.saturating_sub(1);
                if mole.ticks_left == 0 {
                    *hole = None;
                }
            }
        }

        self.spawn_timer = self.spawn_timer.saturating_sub(1);
        if self.spawn_timer == 0 {
            self.spawn(settings, rng);
            self.spawn_timer = spawn_delay(settings, rng);
        }

        self.is_finished()
    }

    fn spawn(&mut self, settings: &MoleSettings, rng: &mut SimpleRng) {
        let empty: Vec<usize> = (0..HOLES).filter(|&i| self.holes[i].is_none()).collect();
        if empty.is_empty() {
            return;
        }
        let hole = empty[rng.index(empty.len())];
        let kind = roll_kind(settings, self.guaranteed, rng);
        let (lo, hi) = settings.display_secs;
        let ticks_left = secs_to_ticks(rng.range_f64(lo, hi)).max(1);
        self.holes[hole] = Some(Mole { kind, ticks_left });
    }

    /// Hit `hole`. `Ok(None)` is a miss on an empty hole.
    pub fn whack(
        &mut self,
        hole: usize,
        settings: &MoleSettings,
    ) -> crate::error::Result<Option<WhackHit>> {
        let slot = self
            .holes
            .get_mut(hole)
            .ok_or(crate::error::GameError::InvalidHole(hole))?;
        let Some(mole) = slot.take() else {
            return Ok(None);
        };
        let delta = match mole.kind {
            MoleKind::Normal => settings.hit_reward,
            MoleKind::Gold => settings.gold_hit_reward,
            MoleKind::Bomb => -settings.bomb_penalty,
        };
        self.score = (self.score + delta).max(0);
        if mole.kind != MoleKind::Bomb {
            self.hits += 1;
        }
        Ok(Some(WhackHit {
            kind: mole.kind,
            delta,
        }))
    }
}

fn spawn_delay(settings: &MoleSettings, rng: &mut SimpleRng) -> u32 {
    let (lo, hi) = settings.spawn_delay_secs;
    secs_to_ticks(rng.range_f64(lo, hi)).max(1)
}

pub fn roll_kind(settings: &MoleSettings, guaranteed: bool, rng: &mut SimpleRng) -> MoleKind {
    let roll = rng.next_f64();
    if guaranteed {
        return if roll < settings.guaranteed_gold_rate {
            MoleKind::Gold
        } else {
            MoleKind::Normal
        };
    }
    if roll < settings.bomb_rate {
        MoleKind::Bomb
    } else if roll < settings.bomb_rate + settings.gold_rate {
        MoleKind::Gold
    } else {
        MoleKind::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    fn run_to_end(round: &mut MoleRound, settings: &MoleSettings, rng: &mut SimpleRng) -> u32 {
        let mut ticks = 0;
        while !round.tick(settings, rng) {
            ticks += 1;
        }
        ticks + 1
    }

    #[test]
    fn round_lasts_twenty_seconds() {
        let settings = MoleSettings::default();
        let mut rng = SimpleRng::new(5);
        let mut round = MoleRound::new(&settings, false, &mut rng);
        assert_eq!(round.seconds_left(), 20);
        assert_eq!(run_to_end(&mut round, &settings, &mut rng), 200);
        assert!(round.is_finished());
        assert!(round.tick(&settings, &mut rng));
    }

    #[test]
    fn moles_appear_and_duck() {
        let settings = MoleSettings::default();
        let mut rng = SimpleRng::new(11);
        let mut round = MoleRound::new(&settings, false, &mut rng);
        let mut seen = 0;
        for _ in 0..100 {
            round.tick(&settings, &mut rng);
            seen = seen.max(round.active_moles());
        }
        assert!(seen >= 1);
        assert!(seen < HOLES);
    }

    #[test]
    fn guaranteed_round_never_spawns_bombs() {
        let settings = MoleSettings::default();
        let mut rng = SimpleRng::new(3);
        for _ in 0..1000 {
            assert_ne!(roll_kind(&settings, true, &mut rng), MoleKind::Bomb);
        }
    }

    #[test]
    fn kind_rates_follow_settings() {
        let mut rng = SimpleRng::new(3);
        let all_bombs = MoleSettings {
            bomb_rate: 1.0,
            gold_rate: 0.0,
            ..MoleSettings::default()
        };
        assert_eq!(roll_kind(&all_bombs, false, &mut rng), MoleKind::Bomb);
        let all_gold = MoleSettings {
            bomb_rate: 0.0,
            gold_rate: 1.0,
            ..MoleSettings::default()
        };
        assert_eq!(roll_kind(&all_gold, false, &mut rng), MoleKind::Gold);
    }

    #[test]
    fn whack_scores_and_hides() {
        let settings = MoleSettings::default();
        let mut rng = SimpleRng::new(1);
        let mut round = MoleRound::new(&settings, false, &mut rng);
        round.holes[4] = Some(Mole {
            kind: MoleKind::Gold,
            ticks_left: 10,
        });
        let hit = round.whack(4, &settings).unwrap().unwrap();
        assert_eq!(hit.delta, 100);
        assert_eq!(round.score, 100);
        assert_eq!(round.hits, 1);
        assert!(round.holes[4].is_none());
        assert_eq!(round.whack(4, &settings).unwrap(), None);
    }

    #[test]
    fn bomb_floors_score_at_zero() {
        let settings = MoleSettings::default();
        let mut rng = SimpleRng::new(1);
        let mut round = MoleRound::new(&settings, false, &mut rng);
        round.holes[0] = Some(Mole {
            kind: MoleKind::Normal,
            ticks_left: 10,
        });
        round.holes[1] = Some(Mole {
            kind: MoleKind::Bomb,
            ticks_left: 10,
        });
        round.whack(0, &settings).unwrap();
        let hit = round.whack(1, &settings).unwrap().unwrap();
        assert_eq!(hit.delta, -50);
        assert_eq!(round.score, 0);
        assert_eq!(round.hits, 1);
    }

    #[test]
    fn whack_outside_grid_is_rejected() {
        let settings = MoleSettings::default();
        let mut rng = SimpleRng::new(1);
        let mut round = MoleRound::new(&settings, false, &mut rng);
        assert_eq!(round.whack(9, &settings), Err(GameError::InvalidHole(9)));
    }
}
