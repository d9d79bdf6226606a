//! Wall-clock driven timing.
//!
//! `draw_web()` calls at ~60fps with variable delta. Production is a function
//! of real elapsed time, so the clock hands out elapsed seconds rather than a
//! tick count, and large gaps (a backgrounded tab) are accrued in full.
//! `Schedule` turns frame timestamps into the two periodic triggers of the
//! game: the simulation tick and the autosave.

/// Simulation tick period.
pub const TICK_INTERVAL_MS: f64 = 50.0;

/// オートセーブの間隔 (30秒)。
pub const AUTOSAVE_INTERVAL_MS: f64 = 30_000.0;

/// Tracks the last wall-clock reading and reports elapsed time.
pub struct GameClock {
    /// Timestamp of the last update (ms), None before the first reading
    last_timestamp: Option<f64>,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
        }
    }

    /// Record a reading without reporting elapsed time.
    /// Does nothing once the clock has a reading.
    pub fn prime(&mut self, now_ms: f64) {
        if self.last_timestamp.is_none() {
            self.last_timestamp = Some(now_ms);
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()` or similar).
    /// Returns the seconds elapsed since the previous reading; zero on the
    /// first reading or when the clock went backwards.
    pub fn update(&mut self, now_ms: f64) -> f64 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);
        delta / 1000.0
    }
}

/// A periodic trigger polled with the current time.
pub struct Interval {
    period_ms: f64,
    next_due: Option<f64>,
}

impl Interval {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            next_due: None,
        }
    }

    /// Returns true when the period has elapsed. The first poll only arms the
    /// interval. Missed periods collapse into a single firing.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.next_due {
            None => {
                self.next_due = Some(now_ms + self.period_ms);
                false
            }
            Some(due) if now_ms >= due => {
                self.next_due = Some(now_ms + self.period_ms);
                true
            }
            Some(due) => {
                // Clock went backwards: re-arm from the new reading.
                if due - now_ms > self.period_ms {
                    self.next_due = Some(now_ms + self.period_ms);
                }
                false
            }
        }
    }
}

/// Intervals for the two periodic tasks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleConfig {
    pub tick_interval_ms: f64,
    pub autosave_interval_ms: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
        }
    }
}

/// Which tasks are due on this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Due {
    pub tick: bool,
    pub autosave: bool,
}

/// The simulation tick and the autosave, cancelled together.
pub struct Schedule {
    tick: Interval,
    autosave: Interval,
    running: bool,
}

impl Schedule {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            tick: Interval::new(config.tick_interval_ms),
            autosave: Interval::new(config.autosave_interval_ms),
            running: true,
        }
    }

    pub fn poll(&mut self, now_ms: f64) -> Due {
        if !self.running {
            return Due::default();
        }
        Due {
            tick: self.tick.poll(now_ms),
            autosave: self.autosave.poll(now_ms),
        }
    }

    /// Cancel both tasks. A stopped schedule never fires again.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
