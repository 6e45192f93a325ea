//! TUI rendering traits for clubhub types.
//!
//! Extension traits that add colored terminal rendering to clubhub-core
//! types using owo_colors.

use clubhub_core::ClubEvent;
use clubhub_core::calendar::{GridCell, MonthGrid, WEEKDAY_HEADERS};
use clubhub_core::countdown::Countdown;
use clubhub_core::filter::FilterOutcome;
use clubhub_core::lightbox::Lightbox;
use clubhub_core::registration::Confirmation;
use clubhub_core::slideshow::Slide;
use clubhub_core::validate::FormReport;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ClubEvent {
    fn render(&self) -> String {
        let mut line = format!("{} {}", self.date.dimmed(), self.title.bold());
        if !self.time.is_empty() {
            line.push_str(&format!(" {}", self.time.dimmed()));
        }
        format!("{} {}", line, format!("[{}]", self.category).cyan())
    }
}

/// Width of one day column, including the separating space.
const CELL_WIDTH: usize = 4;

impl Render for MonthGrid<'_> {
    fn render(&self) -> String {
        let width = CELL_WIDTH * WEEKDAY_HEADERS.len();
        let mut lines = vec![format!("{:^width$}", self.label).bold().to_string()];

        lines.push(
            WEEKDAY_HEADERS
                .iter()
                .map(|h| format!("{:>3} ", h))
                .collect::<String>()
                .dimmed()
                .to_string(),
        );

        for week in self.weeks() {
            let row: String = week
                .iter()
                .map(|cell| match cell {
                    GridCell::Blank => " ".repeat(CELL_WIDTH),
                    GridCell::Day(day) if !day.events.is_empty() => {
                        format!("{:>3} ", day.day_of_month).green().bold().to_string()
                    }
                    GridCell::Day(day) => format!("{:>3} ", day.day_of_month),
                })
                .collect();
            lines.push(row.trim_end().to_string());
        }

        let with_events: Vec<_> = self.days().filter(|d| !d.events.is_empty()).collect();
        if !with_events.is_empty() {
            lines.push(String::new());
        }
        for day in with_events {
            for event in &day.events {
                lines.push(format!("   {}", event.render()));
            }
        }

        lines.join("\n")
    }
}

impl Render for FilterOutcome<'_> {
    fn render(&self) -> String {
        if let Some(message) = self.empty_message() {
            return format!("   {}", message.dimmed());
        }

        let mut lines = Vec::new();

        for section in self.month_sections.iter().filter(|s| s.visible) {
            lines.push(format!("📅 {}", section.month.bold()));
            for event in &self.visible {
                if event.month_key().as_deref() == Some(section.month.as_str()) {
                    lines.push(format!("   {}", event.render()));
                }
            }
            lines.push(String::new());
        }

        let undated: Vec<_> = self.visible.iter().filter(|e| e.day().is_none()).collect();
        if !undated.is_empty() {
            lines.push(format!("📅 {}", "Undated".bold()));
            lines.extend(undated.iter().map(|e| format!("   {}", e.render())));
            lines.push(String::new());
        }

        lines.push(
            format!(
                "   {} shown, {} hidden ({})",
                self.visible.len(),
                self.hidden(),
                self.filter
            )
            .dimmed()
            .to_string(),
        );

        lines.join("\n")
    }
}

impl Render for FormReport {
    fn render(&self) -> String {
        let Some(summary) = self.summary() else {
            return format!("{} {}", "✓".green(), "All fields are valid".green());
        };

        let mut lines: Vec<String> = self
            .errors
            .iter()
            .map(|(field, error)| format!("   {} {}: {}", "✗".red(), field.bold(), error.red()))
            .collect();
        lines.push(summary.yellow().to_string());
        lines.join("\n")
    }
}

impl Render for Countdown {
    fn render(&self) -> String {
        match self {
            Countdown::Live => self.to_string().green().bold().to_string(),
            Countdown::Hours(_) => self.to_string().yellow().to_string(),
            Countdown::Days(_) => self.to_string(),
        }
    }
}

impl Render for Confirmation {
    fn render(&self) -> String {
        let mut lines = vec![format!("{} {}", "✓".green(), self.heading.green().bold())];
        lines.extend(self.lines.iter().map(|l| format!("   {}", l)));
        lines.join("\n")
    }
}

impl Render for Slide {
    fn render(&self) -> String {
        let mut line = format!("{} {}", self.title.bold(), self.image.dimmed());
        if let Some(caption) = &self.caption {
            line.push_str(&format!("\n   {}", caption));
        }
        line
    }
}

impl Render for Lightbox {
    fn render(&self) -> String {
        match (self.current(), self.position()) {
            (Some(image), Some((position, len))) => {
                let mut line = format!("🖼  {} {}", image.caption.bold(), image.src.dimmed());
                if self.has_navigation() {
                    line.push_str(&format!(" {}", format!("{} / {}", position, len).cyan()));
                }
                line
            }
            _ => "   Lightbox closed".dimmed().to_string(),
        }
    }
}

/// Slide dots, active one filled.
pub fn render_dots(dots: &[bool]) -> String {
    dots.iter()
        .map(|&active| if active { "●".green().to_string() } else { "○".dimmed().to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}
