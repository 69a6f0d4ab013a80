//! Journal streak accounting.
//!
//! Streaks move on calendar days, not timestamps. Two entries on the same
//! day leave the streak alone; a one-day gap extends it; anything larger
//! restarts at 1. While `pause_streaks` is set, submissions leave every
//! streak field untouched, including the anchor date.

use chrono::NaiveDate;

use crate::state::UserState;

/// Whole days between two dates, ignoring direction.
pub(crate) fn day_gap(from: NaiveDate, to: NaiveDate) -> u64 {
    (to - from).num_days().unsigned_abs()
}

/// Apply one journal submission on `today` to the streak fields.
pub(crate) fn record_journal_day(state: &mut UserState, today: NaiveDate) {
    if state.settings.pause_streaks {
        return;
    }
    let next = match state.last_journal_date {
        None => 1,
        Some(last) => match day_gap(last, today) {
            0 => state.current_streak,
            1 => state.current_streak + 1,
            _ => 1,
        },
    };
    state.current_streak = next;
    state.longest_streak = state.longest_streak.max(next);
    state.last_journal_date = Some(today);
}

/// Zero a streak that silently died while accrual was paused.
///
/// Called on unpause; without it a stale streak would read as alive
/// until the next journal entry corrected it.
pub(crate) fn reset_stale_streak(state: &mut UserState, today: NaiveDate) {
    if let Some(last) = state.last_journal_date {
        if day_gap(last, today) > 1 {
            state.current_streak = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_entry_starts_at_one() {
        let mut state = UserState::default();
        record_journal_day(&mut state, date(2026, 8, 21));
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.longest_streak, 1);
        assert_eq!(state.last_journal_date, Some(date(2026, 8, 21)));
    }

    #[test]
    fn consecutive_days_extend() {
        let mut state = UserState::default();
        record_journal_day(&mut state, date(2026, 8, 20));
        record_journal_day(&mut state, date(2026, 8, 21));
        assert_eq!(state.current_streak, 2);
        assert_eq!(state.longest_streak, 2);
    }

    #[test]
    fn same_day_is_idempotent() {
        let mut state = UserState::default();
        record_journal_day(&mut state, date(2026, 8, 21));
        record_journal_day(&mut state, date(2026, 8, 21));
        assert_eq!(state.current_streak, 1);
    }

    #[test]
    fn gap_restarts_but_keeps_longest() {
        let mut state = UserState::default();
        for day in 18..=20 {
            record_journal_day(&mut state, date(2026, 8, day));
        }
        assert_eq!(state.current_streak, 3);
        record_journal_day(&mut state, date(2026, 8, 25));
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.longest_streak, 3);
    }

    #[test]
    fn paused_submissions_touch_nothing() {
        let mut state = UserState::default();
        record_journal_day(&mut state, date(2026, 8, 20));
        state.settings.pause_streaks = true;
        record_journal_day(&mut state, date(2026, 8, 21));
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.last_journal_date, Some(date(2026, 8, 20)));
    }

    #[test]
    fn unpause_zeroes_only_stale_streaks() {
        let mut state = UserState::default();
        record_journal_day(&mut state, date(2026, 8, 20));
        reset_stale_streak(&mut state, date(2026, 8, 21));
        assert_eq!(state.current_streak, 1);

        reset_stale_streak(&mut state, date(2026, 8, 25));
        assert_eq!(state.current_streak, 0);
        assert_eq!(state.longest_streak, 1);
    }

    #[test]
    fn future_anchor_counts_by_distance() {
        let mut state = UserState::default();
        state.last_journal_date = Some(date(2026, 8, 22));
        state.current_streak = 4;
        record_journal_day(&mut state, date(2026, 8, 21));
        assert_eq!(state.current_streak, 5);
    }
}
