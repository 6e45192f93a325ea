//! Event list filtering.
//!
//! Every rule compares against one captured `now`. Event dates are read as
//! midnight at the start of the day.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};

use crate::calendar::CalendarCursor;
use crate::error::ClubHubError;
use crate::event::{Category, ClubEvent};

const WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    All,
    /// date >= now
    Upcoming,
    /// now <= date <= now + 7 days
    ThisWeek,
    /// now <= date <= last day of now's month
    Month,
    /// date < now
    Past,
    Category(Category),
}

impl EventFilter {
    /// Whether `event` stays visible under this filter.
    ///
    /// Events with a malformed date only pass `All` and category filters.
    pub fn is_visible(&self, event: &ClubEvent, now: NaiveDateTime) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Category(category) => &event.category == category,
            time_based => match event.starts_at() {
                Some(date) => time_based.admits(date, now),
                None => false,
            },
        }
    }

    fn admits(&self, date: NaiveDateTime, now: NaiveDateTime) -> bool {
        match self {
            EventFilter::Upcoming => date >= now,
            EventFilter::ThisWeek => now <= date && date <= now + Duration::days(WEEK_DAYS),
            EventFilter::Month => match end_of_month(now) {
                Some(end) => now <= date && date <= end,
                None => false,
            },
            EventFilter::Past => date < now,
            EventFilter::All | EventFilter::Category(_) => true,
        }
    }

    /// Apply the filter to a whole event list.
    pub fn apply<'a>(&self, events: &'a [ClubEvent], now: NaiveDateTime) -> FilterOutcome<'a> {
        let mut visible = Vec::new();
        let mut sections: Vec<MonthSection> = Vec::new();

        for event in events {
            let shown = self.is_visible(event, now);
            if shown {
                visible.push(event);
            }

            let Some(key) = event.month_key() else {
                continue;
            };
            match sections.iter_mut().find(|s| s.month == key) {
                Some(section) => section.visible |= shown,
                None => sections.push(MonthSection {
                    month: key,
                    visible: shown,
                }),
            }
        }

        tracing::debug!(
            filter = %self,
            visible = visible.len(),
            total = events.len(),
            "filtered events"
        );

        FilterOutcome {
            filter: self.clone(),
            visible,
            total: events.len(),
            month_sections: sections,
        }
    }
}

/// Midnight at the start of the last day of `now`'s month.
fn end_of_month(now: NaiveDateTime) -> Option<NaiveDateTime> {
    let cursor = CalendarCursor::from_date(now.date());
    let first = cursor.first_day()?;
    let last = first + Duration::days(cursor.days_in_month()? as i64 - 1);
    last.and_hms_opt(0, 0, 0)
}

impl FromStr for EventFilter {
    type Err = ClubHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(EventFilter::All),
            "upcoming" => Ok(EventFilter::Upcoming),
            "this-week" => Ok(EventFilter::ThisWeek),
            "month" => Ok(EventFilter::Month),
            "past" => Ok(EventFilter::Past),
            other => {
                if let Some(tag) = other.strip_prefix("category:") {
                    return Ok(EventFilter::Category(Category::from(tag)));
                }
                match Category::from(other) {
                    Category::Other(_) => Err(ClubHubError::UnknownFilter(other.to_string())),
                    known => Ok(EventFilter::Category(known)),
                }
            }
        }
    }
}

impl fmt::Display for EventFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventFilter::All => write!(f, "all"),
            EventFilter::Upcoming => write!(f, "upcoming"),
            EventFilter::ThisWeek => write!(f, "this-week"),
            EventFilter::Month => write!(f, "month"),
            EventFilter::Past => write!(f, "past"),
            EventFilter::Category(category) => write!(f, "{}", category),
        }
    }
}

/// Whether a month section of the event list still has a visible event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSection {
    /// `YYYY-MM`
    pub month: String,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    pub filter: EventFilter,
    pub visible: Vec<&'a ClubEvent>,
    pub total: usize,
    /// In order of first appearance.
    pub month_sections: Vec<MonthSection>,
}

impl FilterOutcome<'_> {
    pub fn hidden(&self) -> usize {
        self.total - self.visible.len()
    }

    /// The "no events found" text, shown only when nothing matched.
    pub fn empty_message(&self) -> Option<String> {
        if !self.visible.is_empty() {
            return None;
        }
        let qualifier = match &self.filter {
            EventFilter::All => String::new(),
            other => format!("{} ", other),
        };
        Some(format!(
            "There are no {}events scheduled at the moment.",
            qualifier
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(date: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn event(date: &str) -> ClubEvent {
        ClubEvent::new(date, date, "", Category::Social)
    }

    #[test]
    fn test_this_week_upper_bound_is_inclusive() {
        let now = at("2024-06-01");
        assert!(EventFilter::ThisWeek.is_visible(&event("2024-06-08"), now));
        assert!(!EventFilter::ThisWeek.is_visible(&event("2024-06-09"), now));
    }

    #[test]
    fn test_event_at_now_is_not_past() {
        let now = at("2024-06-01");
        let today = event("2024-06-01");
        assert!(!EventFilter::Past.is_visible(&today, now));
        assert!(EventFilter::Upcoming.is_visible(&today, now));
        assert!(EventFilter::ThisWeek.is_visible(&today, now));
        assert!(EventFilter::Month.is_visible(&today, now));
    }

    #[test]
    fn test_month_includes_last_day() {
        let now = at("2024-02-10");
        assert!(EventFilter::Month.is_visible(&event("2024-02-29"), now));
        assert!(!EventFilter::Month.is_visible(&event("2024-03-01"), now));
        assert!(!EventFilter::Month.is_visible(&event("2024-02-09"), now));
    }

    #[test]
    fn test_later_in_the_day_makes_today_past() {
        let now = at("2024-06-01") + Duration::hours(10);
        assert!(EventFilter::Past.is_visible(&event("2024-06-01"), now));
    }

    #[test]
    fn test_malformed_dates_only_show_under_all() {
        let now = at("2024-06-01");
        let broken = event("06/08/2024");
        assert!(EventFilter::All.is_visible(&broken, now));
        assert!(!EventFilter::Upcoming.is_visible(&broken, now));
        assert!(!EventFilter::Past.is_visible(&broken, now));
    }

    #[test]
    fn test_category_filter() {
        let now = at("2024-06-01");
        let hack = ClubEvent::new("2024-06-02", "Hack", "", Category::Tech);
        let filter: EventFilter = "tech".parse().unwrap();
        assert!(filter.is_visible(&hack, now));
        assert!(!filter.is_visible(&event("2024-06-02"), now));
    }

    #[test]
    fn test_parse_filter_keys() {
        assert_eq!("this-week".parse::<EventFilter>().unwrap(), EventFilter::ThisWeek);
        assert_eq!(
            "category:film".parse::<EventFilter>().unwrap(),
            EventFilter::Category(Category::Other("film".to_string()))
        );
        assert!("tomorrow".parse::<EventFilter>().is_err());
    }

    #[test]
    fn test_apply_reports_sections_and_message() {
        let events = vec![event("2024-05-20"), event("2024-06-03"), event("2024-07-01")];
        let outcome = EventFilter::Past.apply(&events, at("2024-06-01"));

        assert_eq!(outcome.visible.len(), 1);
        assert_eq!(outcome.hidden(), 2);
        assert_eq!(
            outcome.month_sections,
            vec![
                MonthSection { month: "2024-05".to_string(), visible: true },
                MonthSection { month: "2024-06".to_string(), visible: false },
                MonthSection { month: "2024-07".to_string(), visible: false },
            ]
        );
        assert!(outcome.empty_message().is_none());

        let outcome = EventFilter::Category(Category::Sports).apply(&events, at("2024-06-01"));
        assert_eq!(
            outcome.empty_message().as_deref(),
            Some("There are no sports events scheduled at the moment.")
        );
    }
}
