mod commands;
mod logging;
mod render;
mod utils;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use clubhub_core::EventCatalog;
use clubhub_core::site_config::SiteConfig;

#[derive(Parser)]
#[command(name = "clubhub")]
#[command(about = "Browse club events, galleries and forms from your clubhub catalog")]
struct Cli {
    /// Event catalog to read (defaults to catalog_path in the config file)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid with the events on each day
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Step back this many months
        #[arg(long, conflicts_with = "next", value_parser = clap::value_parser!(i32).range(0..))]
        prev: Option<i32>,

        /// Step forward this many months
        #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
        next: Option<i32>,
    },
    /// List events with a filter applied
    Events {
        /// all, upcoming, this-week, month, past, or a category (e.g. "tech")
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Treat this date as today (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        now: Option<String>,

        /// Print matching events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a form from field=value pairs
    Validate {
        /// contact, join, event, quick-registration or club-registration
        #[arg(short, long)]
        form: String,

        /// Field values, e.g. email=ada@uni.edu
        fields: Vec<String>,

        /// Prompt for each field instead of reading field=value pairs
        #[arg(short, long)]
        interactive: bool,

        /// Treat this date as today for future-date fields (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Open an event's photo gallery and replay navigation keys
    Gallery {
        /// Event title (exact match)
        title: String,

        /// Keys to replay: left, right, esc (or ArrowLeft, ArrowRight, Escape)
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,
    },
    /// Run the auto-advancing slideshow
    Slideshow {
        /// Stop after this many automatic advances
        #[arg(short, long, default_value_t = 3)]
        ticks: usize,

        /// Override the autoplay interval (e.g. "2s")
        #[arg(long)]
        interval: Option<String>,
    },
    /// Show countdowns to upcoming events
    Countdown {
        /// Treat this moment as now (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        now: Option<String>,

        /// Keep running and refresh on the configured interval
        #[arg(short, long)]
        watch: bool,
    },
    /// Register for an event
    Register {
        /// Event title (exact match)
        #[arg(short, long)]
        event: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        student_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = SiteConfig::load()?;
    let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog_path());

    match cli.command {
        Commands::Calendar { month, prev, next } => {
            let catalog = require_catalog(&catalog_path)?;
            commands::calendar::run(catalog, month.as_deref(), month_shift(prev, next))
        }
        Commands::Events { filter, now, json } => {
            let catalog = require_catalog(&catalog_path)?;
            commands::events::run(&catalog, &filter, now.as_deref(), json)
        }
        Commands::Validate {
            form,
            fields,
            interactive,
            today,
        } => commands::validate::run(&config, &form, &fields, interactive, today.as_deref()),
        Commands::Gallery { title, keys } => {
            let catalog = require_catalog(&catalog_path)?;
            commands::gallery::run(catalog, &config, &title, &keys)
        }
        Commands::Slideshow { ticks, interval } => {
            let catalog = require_catalog(&catalog_path)?;
            commands::slideshow::run(catalog, &config, ticks, interval.as_deref()).await
        }
        Commands::Countdown { now, watch } => {
            let catalog = require_catalog(&catalog_path)?;
            commands::countdown::run(&catalog, &config, now.as_deref(), watch).await
        }
        Commands::Register {
            event,
            name,
            email,
            student_id,
        } => {
            let catalog = require_catalog(&catalog_path)?;
            commands::register::run(&catalog, &config, &event, name, email, student_id).await
        }
    }
}

/// Both flags are parsed as non-negative `i32`, so negating is safe.
fn month_shift(prev: Option<i32>, next: Option<i32>) -> i32 {
    match (prev, next) {
        (Some(n), _) => -n,
        (_, Some(n)) => n,
        _ => 0,
    }
}

fn require_catalog(path: &Path) -> Result<EventCatalog> {
    if !path.exists() {
        anyhow::bail!(
            "No catalog found at {}.\n\n\
            Create one with your club events:\n\n  \
            [[event]]\n  \
            date = \"2024-06-08\"\n  \
            title = \"Spring Hackathon\"\n  \
            category = \"tech\"\n\n\
            or point to an existing file with --catalog <path>",
            path.display()
        );
    }

    Ok(EventCatalog::load(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar_shift(args: &[&str]) -> Result<i32, clap::Error> {
        let cli = Cli::try_parse_from(["clubhub", "calendar"].iter().chain(args))?;
        match cli.command {
            Commands::Calendar { prev, next, .. } => Ok(month_shift(prev, next)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_month_shift_flags() {
        assert_eq!(calendar_shift(&["--next", "3"]).unwrap(), 3);
        assert_eq!(calendar_shift(&["--prev", "2"]).unwrap(), -2);
        assert_eq!(calendar_shift(&[]).unwrap(), 0);
        assert_eq!(calendar_shift(&["--prev", "2147483647"]).unwrap(), -i32::MAX);
    }

    #[test]
    fn test_month_shift_rejects_out_of_range_values() {
        assert!(calendar_shift(&["--next", "3000000000"]).is_err());
        assert!(calendar_shift(&["--prev", "2147483648"]).is_err());
        assert!(calendar_shift(&["--next", "-1"]).is_err());
        assert!(calendar_shift(&["--prev", "1", "--next", "1"]).is_err());
    }
}
