//! Focus-protocol timer: alternating work and break countdowns.
//!
//! The timer never runs itself; the caller feeds it elapsed seconds.
//! Completing a phase stops the countdown and preloads the other phase,
//! so at most one completion can fall out of a single `advance` call.

use std::fmt;

use crate::constants::{FOCUS_BREAK_MINUTES, FOCUS_WORK_MINUTES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPhase {
    #[default]
    Work,
    Break,
}

impl FocusPhase {
    #[must_use]
    pub const fn duration_secs(self) -> u32 {
        match self {
            Self::Work => FOCUS_WORK_MINUTES * 60,
            Self::Break => FOCUS_BREAK_MINUTES * 60,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }
}

impl fmt::Display for FocusPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Countdown state for the focus protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTimer {
    phase: FocusPhase,
    remaining_secs: u32,
    running: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self {
            phase: FocusPhase::Work,
            remaining_secs: FocusPhase::Work.duration_secs(),
            running: false,
        }
    }
}

impl FocusTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> FocusPhase {
        self.phase
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Engage or pause the countdown.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stop and rewind to a full work phase.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed elapsed seconds into a running countdown.
    ///
    /// Returns the phase that completed, if any. Completion pauses the
    /// timer with the next phase loaded, so leftover seconds are dropped.
    pub fn advance(&mut self, secs: u32) -> Option<FocusPhase> {
        if !self.running || secs == 0 {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(secs);
        if self.remaining_secs > 0 {
            return None;
        }
        let completed = self.phase;
        self.phase = completed.next();
        self.remaining_secs = self.phase.duration_secs();
        self.running = false;
        Some(completed)
    }

    /// One-second tick, the granularity the display updates at.
    pub fn tick(&mut self) -> Option<FocusPhase> {
        self.advance(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_timer_is_parked_on_work() {
        let timer = FocusTimer::new();
        assert_eq!(timer.phase(), FocusPhase::Work);
        assert_eq!(timer.remaining_secs(), 25 * 60);
        assert!(!timer.is_running());
    }

    #[test]
    fn ticks_do_nothing_while_paused() {
        let mut timer = FocusTimer::new();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining_secs(), 25 * 60);
    }

    #[test]
    fn work_phase_completes_and_parks_on_break() {
        let mut timer = FocusTimer::new();
        timer.toggle();
        for _ in 0..(25 * 60 - 1) {
            assert_eq!(timer.tick(), None);
        }
        assert_eq!(timer.tick(), Some(FocusPhase::Work));
        assert_eq!(timer.phase(), FocusPhase::Break);
        assert_eq!(timer.remaining_secs(), 5 * 60);
        assert!(!timer.is_running());
    }

    #[test]
    fn break_completion_returns_to_work() {
        let mut timer = FocusTimer::new();
        timer.toggle();
        assert_eq!(timer.advance(25 * 60), Some(FocusPhase::Work));
        timer.toggle();
        assert_eq!(timer.advance(5 * 60), Some(FocusPhase::Break));
        assert_eq!(timer.phase(), FocusPhase::Work);
        assert_eq!(timer.remaining_secs(), 25 * 60);
    }

    #[test]
    fn overshoot_completes_once_and_drops_leftover() {
        let mut timer = FocusTimer::new();
        timer.toggle();
        assert_eq!(timer.advance(10_000), Some(FocusPhase::Work));
        assert_eq!(timer.phase(), FocusPhase::Break);
        assert_eq!(timer.remaining_secs(), 5 * 60);
        // Parked; the overshoot does not bleed into the break.
        assert_eq!(timer.advance(10_000), None);
    }

    #[test]
    fn pause_holds_remaining_time() {
        let mut timer = FocusTimer::new();
        timer.toggle();
        timer.advance(100);
        timer.toggle();
        assert_eq!(timer.advance(500), None);
        assert_eq!(timer.remaining_secs(), 25 * 60 - 100);
    }

    #[test]
    fn reset_rewinds_from_any_phase() {
        let mut timer = FocusTimer::new();
        timer.toggle();
        timer.advance(25 * 60);
        timer.toggle();
        timer.advance(17);
        timer.reset();
        assert_eq!(timer, FocusTimer::new());
    }
}
