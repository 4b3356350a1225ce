//! Fixed-timestep clock for real-time mini-games.
//!
//! The host reports wall-clock timestamps at whatever rate it likes;
//! `FixedClock` turns them into whole ticks so the whac-a-mole round
//! advances deterministically and can be driven tick-by-tick in tests.

/// Ticks per second of every real-time mini-game.
pub const TICKS_PER_SEC: u32 = 10;

/// Longest gap (ms) a single update may account for. A stalled host
/// does not burn through a whole round in one frame.
const MAX_FRAME_MS: f64 = 500.0;

/// Convert seconds to whole ticks, rounding to the nearest tick.
pub fn secs_to_ticks(secs: f64) -> u32 {
    (secs * TICKS_PER_SEC as f64).round().max(0.0) as u32
}

/// Convert ticks back to whole seconds, rounding up (what a countdown shows).
pub fn ticks_to_display_secs(ticks: u32) -> u32 {
    ticks.div_ceil(TICKS_PER_SEC)
}

#[derive(Clone, Debug)]
pub struct FixedClock {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    accumulator: f64,
    last_timestamp: Option<f64>,
    pub total_ticks: u64,
}

impl FixedClock {
    pub fn new() -> Self {
        Self {
            ms_per_tick: 1000.0 / TICKS_PER_SEC as f64,
            accumulator: 0.0,
            last_timestamp: None,
            total_ticks: 0,
        }
    }

    /// Feed a wall-clock timestamp in ms. Returns the ticks elapsed since the
    /// previous call; the first call only anchors the clock.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }

    /// Forget the anchor so the next update starts a fresh measurement.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new()
    }
}
