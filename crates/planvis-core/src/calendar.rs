//! Calendar utilities
//!
//! Pure date helpers used by the layout engine: month boundaries, month iteration,
//! inclusive day counts and the past/current/future classification of a date range
//! relative to a reference "today".

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// First day of the month containing `date`
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// The day after `date` (saturates at the last representable date)
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Number of calendar months from the month of `start` to the month of `end`, inclusive.
///
/// Returns 0 when `end` falls in an earlier month than `start`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let start_index = start.year() * 12 + start.month0() as i32;
    let end_index = end.year() * 12 + end.month0() as i32;
    (end_index - start_index + 1).max(0) as u32
}

/// Inclusive number of days in `[start, end]`
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> i64 {
    i64::from(end.num_days_from_ce()) - i64::from(start.num_days_from_ce()) + 1
}

/// Three-letter English month abbreviation ("Jan", "Feb", ...)
pub fn month_abbreviation(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

/// Iterate over the first day of `count` consecutive months starting at the month of `start`
pub fn iterate_months(start: NaiveDate, count: u32) -> MonthIter {
    MonthIter {
        next: Some(first_day_of_month(start)),
        remaining: count,
    }
}

/// Iterator returned by [`iterate_months`]
#[derive(Clone, Debug)]
pub struct MonthIter {
    next: Option<NaiveDate>,
    remaining: u32,
}

impl Iterator for MonthIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = last_day_of_month(current).succ_opt();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (0, Some(n))
    }
}

// ============================================================================
// Temporal State
// ============================================================================

/// `start <= today <= end`
pub fn is_current(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> bool {
    start <= today && today <= end
}

/// Both ends strictly before today
pub fn is_past(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> bool {
    start < today && end < today
}

/// Both ends strictly after today
pub fn is_future(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> bool {
    start > today && end > today
}

/// Position of a date range relative to today
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemporalState {
    /// Ended before today
    Past,
    /// Straddles today (inclusive at both ends)
    Current,
    /// Starts after today
    Future,
}

impl TemporalState {
    /// Classify `[start, end]` against `today`.
    ///
    /// Current takes precedence, so a range starting today is `Current`.
    /// Returns `None` only for an inverted range (`end < start`) that falls into none
    /// of the three states.
    pub fn classify(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Option<Self> {
        if is_current(start, end, today) {
            Some(TemporalState::Current)
        } else if is_past(start, end, today) {
            Some(TemporalState::Past)
        } else if is_future(start, end, today) {
            Some(TemporalState::Future)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalState::Past => "past",
            TemporalState::Current => "current",
            TemporalState::Future => "future",
        }
    }
}

impl std::fmt::Display for TemporalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
