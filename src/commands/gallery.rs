use anyhow::Result;
use clubhub_core::EventCatalog;
use clubhub_core::lightbox::{Lightbox, LightboxKey};
use clubhub_core::site_config::SiteConfig;

use crate::render::Render;

pub fn run(catalog: EventCatalog, config: &SiteConfig, title: &str, keys: &[String]) -> Result<()> {
    if catalog.find_event(title).is_none() {
        tracing::warn!(title, "no event with this title in the catalog");
    }

    let mut lightbox = Lightbox::new(catalog.gallery, config.placeholder_image.clone());
    lightbox.open(title);
    println!("{}", lightbox.render());

    for key in keys {
        let key: LightboxKey = key.parse().map_err(anyhow::Error::msg)?;
        lightbox.handle_key(key);
        println!("{}", lightbox.render());

        if !lightbox.is_open() {
            break;
        }
    }

    Ok(())
}
