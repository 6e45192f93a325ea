//! Event catalog file.
//!
//! ```toml
//! [[event]]
//! date = "2024-02-14"
//! title = "Valentine's Day Improv Show"
//! time = "7:00 PM - 9:00 PM"
//! category = "arts"
//!
//! [[slide]]
//! title = "Welcome Week"
//! image = "images/welcome.jpg"
//!
//! [gallery]
//! "Valentine's Day Improv Show" = ["images/valentines_improv_1.jpg"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClubHubError, ClubHubResult};
use crate::event::ClubEvent;
use crate::lightbox::GalleryCatalog;
use crate::slideshow::Slide;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCatalog {
    #[serde(default, rename = "event")]
    pub events: Vec<ClubEvent>,

    #[serde(default, rename = "slide")]
    pub slides: Vec<Slide>,

    #[serde(default)]
    pub gallery: GalleryCatalog,
}

impl EventCatalog {
    pub fn load(path: &Path) -> ClubHubResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClubHubError::Catalog(format!("Could not read {}: {e}", path.display()))
        })?;

        let catalog = Self::parse(&contents)?;
        tracing::debug!(
            path = %path.display(),
            events = catalog.events.len(),
            slides = catalog.slides.len(),
            galleries = catalog.gallery.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn parse(contents: &str) -> ClubHubResult<Self> {
        toml::from_str(contents).map_err(|e| ClubHubError::Catalog(e.to_string()))
    }

    pub fn find_event(&self, title: &str) -> Option<&ClubEvent> {
        self.events.iter().find(|e| e.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Category;

    const SAMPLE: &str = r#"
[[event]]
date = "2024-02-14"
title = "Valentine's Day Improv Show"
time = "7:00 PM - 9:00 PM"
category = "arts"

[[event]]
date = "2024-06-08"
title = "Spring Hackathon"

[[slide]]
title = "Welcome Week"
image = "images/welcome.jpg"
caption = "Meet every club in one afternoon"

[gallery]
"Valentine's Day Improv Show" = [
    "images/valentines_improv_1.jpg",
    "images/valentines_improv_2.jpg",
]
"#;

    #[test]
    fn test_parse_sample_catalog() {
        let catalog = EventCatalog::parse(SAMPLE).unwrap();

        assert_eq!(catalog.events.len(), 2);
        assert_eq!(catalog.events[0].category, Category::Arts);
        assert_eq!(catalog.events[1].category, Category::General);
        assert_eq!(catalog.events[1].time, "");

        assert_eq!(catalog.slides.len(), 1);
        assert_eq!(
            catalog.slides[0].caption.as_deref(),
            Some("Meet every club in one afternoon")
        );

        assert_eq!(
            catalog.gallery.get("Valentine's Day Improv Show").map(|i| i.len()),
            Some(2)
        );
        assert!(catalog.find_event("Spring Hackathon").is_some());
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = EventCatalog::parse("").unwrap();
        assert!(catalog.events.is_empty());
        assert!(catalog.gallery.is_empty());
    }

    #[test]
    fn test_malformed_date_is_kept_verbatim() {
        let catalog = EventCatalog::parse("[[event]]\ndate = \"soon\"\ntitle = \"TBD\"\n").unwrap();
        assert_eq!(catalog.events[0].date, "soon");
        assert!(catalog.events[0].day().is_none());
    }

    #[test]
    fn test_load_missing_file_is_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EventCatalog::load(&dir.path().join("catalog.toml"));
        assert!(matches!(result, Err(ClubHubError::Catalog(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let catalog = EventCatalog::load(&path).unwrap();
        assert_eq!(catalog.events[0].title, "Valentine's Day Improv Show");
    }

    #[test]
    fn test_bad_toml_is_catalog_error() {
        assert!(matches!(
            EventCatalog::parse("[[event]]\ntitle = 3\n"),
            Err(ClubHubError::Catalog(_))
        ));
    }
}
