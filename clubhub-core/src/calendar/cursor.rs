//! The calendar's month pointer.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::cycle::CycleState;
use crate::error::ClubHubError;

const MONTHS_PER_YEAR: usize = 12;

/// Which month the calendar shows. Months cycle over 0..=11 and carry
/// into an unbounded year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    months: CycleState,
    year: i32,
}

impl CalendarCursor {
    /// `month` is 0-based. Values outside 0..=11 roll the year.
    pub fn new(year: i32, month: i32) -> Self {
        let carry = month.div_euclid(MONTHS_PER_YEAR as i32);
        let month = month.rem_euclid(MONTHS_PER_YEAR as i32) as usize;
        CalendarCursor {
            months: CycleState::starting_at(MONTHS_PER_YEAR, month),
            year: year.saturating_add(carry),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        CalendarCursor::new(date.year(), date.month0() as i32)
    }

    pub fn today() -> Self {
        CalendarCursor::from_date(Local::now().date_naive())
    }

    /// 0-based month (0 = January).
    pub fn month(&self) -> u32 {
        self.months.current().unwrap_or(0) as u32
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn next_month(&mut self) {
        self.months.next();
        if self.months.at_start() {
            self.year += 1;
        }
    }

    pub fn previous_month(&mut self) {
        self.months.previous();
        if self.months.at_end() {
            self.year -= 1;
        }
    }

    /// Move by a signed number of months.
    /// The year saturates at the ends of the `i32` range.
    pub fn shift(&mut self, months: i32) {
        let per_year = MONTHS_PER_YEAR as i64;
        let total = i64::from(self.month()) + i64::from(months);
        let year = i64::from(self.year) + total.div_euclid(per_year);

        self.year = year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        self.months = CycleState::starting_at(MONTHS_PER_YEAR, total.rem_euclid(per_year) as usize);
    }

    /// Day 1 of the month. `None` only for years chrono cannot represent.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month() + 1, 1)
    }

    pub fn days_in_month(&self) -> Option<u32> {
        let first = self.first_day()?;
        let mut following = *self;
        following.next_month();
        let next_first = following.first_day()?;
        Some((next_first - first).num_days() as u32)
    }

    /// Weekday column of day 1 (0 = Sunday .. 6 = Saturday).
    pub fn first_weekday(&self) -> Option<u32> {
        self.first_day().map(|d| d.weekday().num_days_from_sunday())
    }

    /// Header label, e.g. "June 2024".
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(day) => day.format("%B %Y").to_string(),
            None => format!("{:04}-{:02}", self.year, self.month() + 1),
        }
    }
}

impl FromStr for CalendarCursor {
    type Err = ClubHubError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClubHubError::InvalidMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: i32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(CalendarCursor::new(year, month - 1))
    }
}

impl fmt::Display for CalendarCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month() + 1)
    }
}
