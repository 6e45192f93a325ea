use anyhow::Result;
use clubhub_core::EventCatalog;
use clubhub_core::site_config::SiteConfig;
use clubhub_core::slideshow::Slideshow;
use owo_colors::OwoColorize;

use crate::render::{Render, render_dots};

pub async fn run(
    catalog: EventCatalog,
    config: &SiteConfig,
    ticks: usize,
    interval: Option<&str>,
) -> Result<()> {
    let mut slideshow_config = config.slideshow_config();
    if let Some(interval) = interval {
        slideshow_config.autoplay_interval = humantime::parse_duration(interval)?;
    }

    let mut show = Slideshow::new(catalog.slides, slideshow_config);
    if show.is_empty() {
        println!("   {}", "No slides in catalog".dimmed());
        return Ok(());
    }

    let mut active = show.subscribe();
    print_slide(&show);
    show.start();

    for _ in 0..ticks {
        tokio::select! {
            changed = active.changed() => {
                changed?;
                print_slide(&show);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    show.stop();
    Ok(())
}

fn print_slide(show: &Slideshow) {
    if let Some(slide) = show.current() {
        println!("{}  {}", render_dots(&show.dots()), slide.render());
    }
}
