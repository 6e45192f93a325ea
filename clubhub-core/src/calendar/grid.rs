//! Month grid construction.
//!
//! The grid is rebuilt from scratch on every render. There is no
//! incremental update path.

use chrono::{Datelike, Duration};

use crate::calendar::CalendarCursor;
use crate::event::ClubEvent;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One day of the displayed month.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    pub day_of_month: u32,
    /// 0 = Sunday .. 6 = Saturday
    pub weekday_column: u32,
    pub iso_date: String,
    /// Events on this date, in source order.
    pub events: Vec<&'a ClubEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridCell<'a> {
    /// Leading cell belonging to the previous month.
    Blank,
    Day(CalendarDay<'a>),
}

impl<'a> GridCell<'a> {
    pub fn day(&self) -> Option<&CalendarDay<'a>> {
        match self {
            GridCell::Day(day) => Some(day),
            GridCell::Blank => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid<'a> {
    pub label: String,
    pub first_weekday: u32,
    pub days_in_month: u32,
    pub cells: Vec<GridCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// Rows of up to seven cells. The last row is not padded.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell<'a>]> {
        self.cells.chunks(WEEKDAY_HEADERS.len())
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay<'a>> {
        self.cells.iter().filter_map(GridCell::day)
    }

    pub fn day(&self, day_of_month: u32) -> Option<&CalendarDay<'a>> {
        self.days().find(|d| d.day_of_month == day_of_month)
    }

    pub fn event_count(&self) -> usize {
        self.days().map(|d| d.events.len()).sum()
    }
}

/// Lay out the cursor's month.
///
/// Emits `first_weekday` blank cells, then one cell per day with the
/// events whose date matches exactly. No trailing blanks are added to
/// complete the last week.
pub fn build_grid<'a>(cursor: &CalendarCursor, events: &'a [ClubEvent]) -> MonthGrid<'a> {
    let label = cursor.label();

    let (Some(first), Some(days_in_month)) = (cursor.first_day(), cursor.days_in_month()) else {
        return MonthGrid {
            label,
            first_weekday: 0,
            days_in_month: 0,
            cells: Vec::new(),
        };
    };

    let first_weekday = first.weekday().num_days_from_sunday();
    let mut cells = Vec::with_capacity((first_weekday + days_in_month) as usize);
    cells.extend((0..first_weekday).map(|_| GridCell::Blank));

    for offset in 0..days_in_month {
        let date = first + Duration::days(offset as i64);
        let iso_date = date.format("%Y-%m-%d").to_string();
        let day_events = events.iter().filter(|e| e.date == iso_date).collect();

        cells.push(GridCell::Day(CalendarDay {
            day_of_month: offset + 1,
            weekday_column: date.weekday().num_days_from_sunday(),
            iso_date,
            events: day_events,
        }));
    }

    MonthGrid {
        label,
        first_weekday,
        days_in_month,
        cells,
    }
}

/// The events calendar widget: a cursor plus the events it displays.
#[derive(Debug, Clone)]
pub struct EventsCalendar {
    cursor: CalendarCursor,
    events: Vec<ClubEvent>,
}

impl EventsCalendar {
    pub fn new(cursor: CalendarCursor, events: Vec<ClubEvent>) -> Self {
        EventsCalendar { cursor, events }
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn events(&self) -> &[ClubEvent] {
        &self.events
    }

    pub fn grid(&self) -> MonthGrid<'_> {
        build_grid(&self.cursor, &self.events)
    }

    pub fn previous_month(&mut self) -> MonthGrid<'_> {
        self.cursor.previous_month();
        tracing::debug!(month = %self.cursor, "calendar moved back");
        self.grid()
    }

    pub fn next_month(&mut self) -> MonthGrid<'_> {
        self.cursor.next_month();
        tracing::debug!(month = %self.cursor, "calendar moved forward");
        self.grid()
    }
}
