use std::sync::Arc;

use anyhow::Result;
use clubhub_core::countdown::{Clock, Countdown, CountdownBoard, local_clock};
use clubhub_core::filter::EventFilter;
use clubhub_core::site_config::SiteConfig;
use clubhub_core::{ClubEvent, EventCatalog};
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::parse_now;

pub async fn run(
    catalog: &EventCatalog,
    config: &SiteConfig,
    now: Option<&str>,
    watch: bool,
) -> Result<()> {
    let clock: Clock = match now {
        Some(_) => {
            let fixed = parse_now(now)?;
            Arc::new(move || fixed)
        }
        None => local_clock(),
    };

    let outcome = EventFilter::Upcoming.apply(&catalog.events, clock());
    if let Some(message) = outcome.empty_message() {
        println!("   {}", message.dimmed());
        return Ok(());
    }
    let upcoming: Vec<ClubEvent> = outcome.visible.into_iter().cloned().collect();

    let mut board = CountdownBoard::new(&upcoming, config.countdown_refresh, clock);
    print_board(&board.current());

    if !watch {
        return Ok(());
    }

    let mut updates = board.subscribe();
    board.start();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                changed?;
                println!();
                print_board(&updates.borrow_and_update());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    board.stop();
    Ok(())
}

fn print_board(board: &[(String, Countdown)]) {
    for (title, countdown) in board {
        println!("   {} {}", title.bold(), countdown.render());
    }
}
