use std::time::Duration;

/// Event-loop poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Interval between timer engine ticks (one second, per the countdown contract)
pub const TIMER_TICK_MS: u64 = 1000;

/// Get poll tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Get timer tick duration
pub fn timer_tick_duration() -> Duration {
    Duration::from_millis(TIMER_TICK_MS)
}
