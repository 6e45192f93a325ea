//! Calendar widget: month pointer and grid builder.

mod cursor;
mod grid;

pub use cursor::CalendarCursor;
pub use grid::{CalendarDay, EventsCalendar, GridCell, MonthGrid, WEEKDAY_HEADERS, build_grid};
