//! Club event records.
//!
//! Events are supplied by whatever renders the page. The core only reads
//! them and never writes them back.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An event listing as shown on an event card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubEvent {
    /// ISO `YYYY-MM-DD`, kept verbatim. Not validated on load.
    pub date: String,
    pub title: String,
    /// Free-text display time, e.g. "6:00 PM - 8:00 PM".
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub category: Category,
}

impl ClubEvent {
    pub fn new(date: &str, title: &str, time: &str, category: Category) -> Self {
        ClubEvent {
            date: date.to_string(),
            title: title.to_string(),
            time: time.to_string(),
            category,
        }
    }

    /// The event's calendar date, if the date string is well formed.
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// The event's date read as midnight at the start of that day.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.day().and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// `YYYY-MM` of the event, used to group events into month sections.
    pub fn month_key(&self) -> Option<String> {
        self.day().map(|d| d.format("%Y-%m").to_string())
    }
}

/// Category tag on an event card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Social,
    Academic,
    Sports,
    Arts,
    Tech,
    #[default]
    General,
    /// Any other tag, kept as written.
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Social => "social",
            Category::Academic => "academic",
            Category::Sports => "sports",
            Category::Arts => "arts",
            Category::Tech => "tech",
            Category::General => "general",
            Category::Other(tag) => tag,
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "social" => Category::Social,
            "academic" => Category::Academic,
            "sports" => Category::Sports,
            "arts" => Category::Arts,
            "tech" => Category::Tech,
            "general" | "" => Category::General,
            _ => Category::Other(tag),
        }
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Category::from(tag.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
