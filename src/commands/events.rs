use anyhow::Result;
use clubhub_core::EventCatalog;
use clubhub_core::filter::EventFilter;

use crate::render::Render;
use crate::utils::parse_now;

pub fn run(catalog: &EventCatalog, filter: &str, now: Option<&str>, json: bool) -> Result<()> {
    let filter: EventFilter = filter.parse()?;
    let now = parse_now(now)?;
    let outcome = filter.apply(&catalog.events, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.visible)?);
    } else {
        println!("{}", outcome.render());
    }

    Ok(())
}
