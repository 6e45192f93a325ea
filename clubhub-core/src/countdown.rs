//! Countdowns to upcoming events.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::sync::watch;

use crate::event::ClubEvent;
use crate::timer::RepeatingTimer;

pub const DEFAULT_COUNTDOWN_REFRESH: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Days(i64),
    /// Less than a full day left.
    Hours(i64),
    Live,
}

impl Countdown {
    pub fn between(target: NaiveDateTime, now: NaiveDateTime) -> Self {
        let remaining = target - now;
        if remaining <= chrono::Duration::zero() {
            return Countdown::Live;
        }
        match remaining.num_days() {
            0 => Countdown::Hours(remaining.num_hours()),
            days => Countdown::Days(days),
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Days(days) => write!(f, "{} days", days),
            Countdown::Hours(hours) => write!(f, "{} hours", hours),
            Countdown::Live => write!(f, "Event Live!"),
        }
    }
}

pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub fn local_clock() -> Clock {
    Arc::new(|| Local::now().naive_local())
}

/// Countdowns for a set of events, recomputed on a refresh timer.
/// Events with a malformed date are skipped.
pub struct CountdownBoard {
    board: Arc<watch::Sender<Vec<(String, Countdown)>>>,
    refresh: RepeatingTimer,
}

impl CountdownBoard {
    pub fn new(events: &[ClubEvent], refresh: Duration, clock: Clock) -> Self {
        let targets: Arc<Vec<(String, NaiveDateTime)>> = Arc::new(
            events
                .iter()
                .filter_map(|e| Some((e.title.clone(), e.starts_at()?)))
                .collect(),
        );

        let (board, _) = watch::channel(compute(&targets, clock()));
        let board = Arc::new(board);

        let tick_board = Arc::clone(&board);
        let refresh = RepeatingTimer::new("countdown", refresh, move || {
            tick_board.send_replace(compute(&targets, clock()));
        });

        CountdownBoard { board, refresh }
    }

    pub fn current(&self) -> Vec<(String, Countdown)> {
        self.board.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<(String, Countdown)>> {
        self.board.subscribe()
    }

    pub fn start(&mut self) {
        self.refresh.start();
    }

    pub fn stop(&mut self) {
        self.refresh.stop();
    }
}

fn compute(targets: &[(String, NaiveDateTime)], now: NaiveDateTime) -> Vec<(String, Countdown)> {
    targets
        .iter()
        .map(|(title, at)| (title.clone(), Countdown::between(*at, now)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Category;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_days_when_a_day_or_more_remains() {
        assert_eq!(Countdown::between(at(2024, 6, 8, 0), at(2024, 6, 1, 12)), Countdown::Days(6));
    }

    #[test]
    fn test_hours_on_the_last_day() {
        let countdown = Countdown::between(at(2024, 6, 8, 0), at(2024, 6, 7, 15));
        assert_eq!(countdown, Countdown::Hours(9));
        assert_eq!(countdown.to_string(), "9 hours");
    }

    #[test]
    fn test_live_once_started() {
        assert_eq!(Countdown::between(at(2024, 6, 8, 0), at(2024, 6, 8, 0)), Countdown::Live);
        assert_eq!(Countdown::Live.to_string(), "Event Live!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_board_refreshes_on_timer() {
        let now = Arc::new(Mutex::new(at(2024, 6, 6, 0)));
        let clock_now = Arc::clone(&now);
        let clock: Clock = Arc::new(move || *clock_now.lock().unwrap());

        let events = vec![
            ClubEvent::new("2024-06-08", "Hackathon", "", Category::Tech),
            ClubEvent::new("someday", "Broken", "", Category::General),
        ];
        let mut board = CountdownBoard::new(&events, Duration::from_secs(3600), clock);
        assert_eq!(board.current(), vec![("Hackathon".to_string(), Countdown::Days(2))]);

        board.start();
        *now.lock().unwrap() = at(2024, 6, 7, 20);
        tokio::time::sleep(Duration::from_secs(3601)).await;
        assert_eq!(board.current(), vec![("Hackathon".to_string(), Countdown::Hours(4))]);
    }
}
