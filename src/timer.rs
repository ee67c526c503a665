/// Countdown/overtime stopwatch for a single task.
///
/// The engine is advanced by explicit one-second ticks supplied by the
/// event loop; it never reads the wall clock itself, so elapsed time is
/// exactly the number of ticks received while running.

/// State of the timer engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Finished,
}

/// A per-task countdown that keeps ticking into overtime
#[derive(Debug, Clone)]
pub struct TimerEngine {
    estimate_seconds: u32,
    remaining_seconds: i64,
    elapsed_seconds: u32,
    state: TimerState,
}

impl TimerEngine {
    /// Activate a timer for a task with the given estimate
    pub fn new(estimated_minutes: u32) -> Self {
        let estimate_seconds = estimated_minutes * 60;
        Self {
            estimate_seconds,
            remaining_seconds: i64::from(estimate_seconds),
            elapsed_seconds: 0,
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_seconds(&self) -> i64 {
        self.remaining_seconds
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Remaining time has gone negative; reset is no longer allowed
    pub fn is_overtime(&self) -> bool {
        self.remaining_seconds < 0
    }

    /// Start or resume the countdown
    pub fn start(&mut self) {
        if matches!(self.state, TimerState::Idle | TimerState::Paused) {
            self.state = TimerState::Running;
        }
    }

    /// Freeze both counters; no-op unless running
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Restore the original estimate and return to Idle.
    /// Only permitted while paused and not yet in overtime.
    /// Returns whether the reset was applied.
    pub fn reset(&mut self) -> bool {
        if self.state == TimerState::Paused && !self.is_overtime() {
            self.remaining_seconds = i64::from(self.estimate_seconds);
            self.elapsed_seconds = 0;
            self.state = TimerState::Idle;
            return true;
        }
        false
    }

    /// Finish from any non-terminal state and report the elapsed seconds,
    /// which is the authoritative actual duration (never the estimate).
    pub fn finish(&mut self) -> Option<u32> {
        if self.state == TimerState::Finished {
            return None;
        }
        self.state = TimerState::Finished;
        Some(self.elapsed_seconds)
    }

    /// Advance one second. Only counts while running; remaining may go
    /// negative without bound.
    pub fn tick(&mut self) {
        if self.state == TimerState::Running {
            self.remaining_seconds -= 1;
            self.elapsed_seconds += 1;
        }
    }

    /// Remaining time as signed `MM:SS` ("-01:05" when in overtime)
    pub fn remaining_formatted(&self) -> String {
        format_signed_mmss(self.remaining_seconds)
    }

    /// Elapsed time as "Xm Ys" ("45s" when under a minute)
    pub fn elapsed_formatted(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

/// Format seconds as signed `MM:SS` with a leading minus when negative
pub fn format_signed_mmss(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let abs = seconds.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Format an elapsed duration as "Xm Ys", omitting minutes when zero
pub fn format_elapsed(seconds: u32) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;

    if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_engine_is_idle() {
        let engine = TimerEngine::new(25);
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_seconds(), 25 * 60);
        assert_eq!(engine.elapsed_seconds(), 0);
    }

    #[test]
    fn test_elapsed_counts_only_running_ticks() {
        let mut engine = TimerEngine::new(1);

        // Ticks before starting do nothing
        engine.tick();
        assert_eq!(engine.elapsed_seconds(), 0);

        engine.start();
        for _ in 0..5 {
            engine.tick();
        }

        engine.pause();
        engine.tick();
        engine.tick();
        assert_eq!(engine.elapsed_seconds(), 5);

        engine.start();
        for _ in 0..3 {
            engine.tick();
        }

        // 5 + 3 running ticks, regardless of pauses in between
        assert_eq!(engine.finish(), Some(8));
    }

    #[test]
    fn test_remaining_goes_negative() {
        let mut engine = TimerEngine::new(1);
        engine.start();
        for _ in 0..65 {
            engine.tick();
        }

        assert_eq!(engine.remaining_seconds(), -5);
        assert!(engine.is_overtime());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn test_pause_is_noop_when_not_running() {
        let mut engine = TimerEngine::new(5);
        engine.pause();
        assert_eq!(engine.state(), TimerState::Idle);

        engine.start();
        engine.pause();
        engine.pause();
        assert_eq!(engine.state(), TimerState::Paused);
    }

    #[test]
    fn test_reset_only_while_paused() {
        let mut engine = TimerEngine::new(5);
        assert!(!engine.reset());

        engine.start();
        engine.tick();
        assert!(!engine.reset());

        engine.pause();
        assert!(engine.reset());
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_seconds(), 5 * 60);
        assert_eq!(engine.elapsed_seconds(), 0);
    }

    #[test]
    fn test_reset_disallowed_in_overtime() {
        let mut engine = TimerEngine::new(1);
        engine.start();
        for _ in 0..61 {
            engine.tick();
        }
        engine.pause();

        assert!(engine.is_overtime());
        assert!(!engine.reset());
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.elapsed_seconds(), 61);
    }

    #[test]
    fn test_finish_from_any_non_terminal_state() {
        let mut idle = TimerEngine::new(1);
        assert_eq!(idle.finish(), Some(0));
        assert_eq!(idle.state(), TimerState::Finished);

        let mut paused = TimerEngine::new(1);
        paused.start();
        paused.tick();
        paused.pause();
        assert_eq!(paused.finish(), Some(1));

        // Terminal: a second finish reports nothing
        assert_eq!(paused.finish(), None);
    }

    #[test]
    fn test_ticks_ignored_after_finish() {
        let mut engine = TimerEngine::new(1);
        engine.start();
        engine.tick();
        engine.finish();

        engine.tick();
        assert_eq!(engine.elapsed_seconds(), 1);
    }

    #[test]
    fn test_format_signed_mmss() {
        assert_eq!(format_signed_mmss(0), "00:00");
        assert_eq!(format_signed_mmss(90), "01:30");
        assert_eq!(format_signed_mmss(-65), "-01:05");
        assert_eq!(format_signed_mmss(3605), "60:05");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(45), "45s");
        assert_eq!(format_elapsed(65), "1m 5s");
        assert_eq!(format_elapsed(0), "0s");
        assert_eq!(format_elapsed(600), "10m 0s");
    }
}
