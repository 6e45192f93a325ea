use anyhow::Result;
use clubhub_core::EventCatalog;
use clubhub_core::calendar::{CalendarCursor, EventsCalendar};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(catalog: EventCatalog, month: Option<&str>, shift: i32) -> Result<()> {
    let mut cursor = match month {
        Some(m) => m.parse::<CalendarCursor>()?,
        None => CalendarCursor::today(),
    };
    cursor.shift(shift);

    let calendar = EventsCalendar::new(cursor, catalog.events);
    let grid = calendar.grid();

    println!("{}", grid.render());
    if grid.event_count() == 0 {
        println!();
        println!("   {}", "No events this month".dimmed());
    }

    Ok(())
}
