//! # atlas_sim
//!
//! [`TickScheduler`] — a fixed-rate logical clock. It never reads
//! wall-clock time; the host loop decides how often to call
//! [`TickScheduler::tick`], which keeps determinism and headless replay
//! trivial.

/// A fixed-rate logical clock.
///
/// Owns an integer tick rate in Hz (default 30, clamped to a minimum of 1)
/// and a monotonic tick counter starting at 0.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    tick_rate: u32,
    current_tick: u64,
}

impl TickScheduler {
    /// Creates a scheduler at the default 30 Hz tick rate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_rate: 30,
            current_tick: 0,
        }
    }

    /// Sets the tick rate. `hz == 0` is clamped to `1` rather than rejected.
    pub fn set_tick_rate(&mut self, hz: u32) {
        self.tick_rate = if hz > 0 { hz } else { 1 };
    }

    /// Returns the current tick rate.
    #[must_use]
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Returns `1.0 / tick_rate`.
    #[must_use]
    pub fn fixed_delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Invokes `callback` with [`Self::fixed_delta_time`], then increments
    /// the tick counter. `callback` always runs exactly once per call.
    pub fn tick(&mut self, mut callback: impl FnMut(f32)) {
        callback(self.fixed_delta_time());
        self.current_tick += 1;
    }

    /// Returns the monotonic tick counter.
    #[must_use]
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_is_thirty_hz() {
        let scheduler = TickScheduler::new();
        assert_eq!(scheduler.tick_rate(), 30);
    }

    #[test]
    fn zero_tick_rate_clamps_to_one() {
        let mut scheduler = TickScheduler::new();
        scheduler.set_tick_rate(0);
        assert_eq!(scheduler.tick_rate(), 1);
        assert_eq!(scheduler.fixed_delta_time(), 1.0);
    }

    #[test]
    fn fixed_delta_time_is_inverse_of_rate() {
        let mut scheduler = TickScheduler::new();
        scheduler.set_tick_rate(60);
        assert_eq!(scheduler.fixed_delta_time(), 1.0 / 60.0);
    }

    #[test]
    fn tick_invokes_callback_and_increments_counter() {
        let mut scheduler = TickScheduler::new();
        let mut invocations = 0;
        scheduler.tick(|_dt| invocations += 1);
        scheduler.tick(|_dt| invocations += 1);
        assert_eq!(invocations, 2);
        assert_eq!(scheduler.current_tick(), 2);
    }
}
