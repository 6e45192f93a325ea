//! Full-screen gallery viewer for past events.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::carousel::Carousel;

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "images/placeholder_gallery.jpg";

/// Event title to ordered image locations. Lookups are exact-title only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GalleryCatalog {
    sets: HashMap<String, Vec<String>>,
}

impl GalleryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: impl Into<String>, images: Vec<String>) {
        self.sets.insert(title.into(), images);
    }

    pub fn get(&self, title: &str) -> Option<&[String]> {
        self.sets.get(title).map(Vec::as_slice)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Images for `title`, or a single placeholder when the title is
    /// unknown or has no images.
    pub fn images_for(&self, title: &str, placeholder: &str) -> Vec<String> {
        match self.get(title) {
            Some(images) if !images.is_empty() => images.to_vec(),
            _ => vec![placeholder.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightboxImage {
    pub src: String,
    pub caption: String,
}

/// Keys the lightbox responds to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

impl std::str::FromStr for LightboxKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Escape" | "esc" | "q" => Ok(LightboxKey::Escape),
            "ArrowLeft" | "left" | "h" => Ok(LightboxKey::ArrowLeft),
            "ArrowRight" | "right" | "l" => Ok(LightboxKey::ArrowRight),
            other => Err(format!("Unknown key '{}'", other)),
        }
    }
}

/// The lightbox overlay. Closed until a gallery is opened.
#[derive(Debug, Clone)]
pub struct Lightbox {
    catalog: GalleryCatalog,
    placeholder: String,
    open: Option<Carousel<LightboxImage>>,
}

impl Lightbox {
    pub fn new(catalog: GalleryCatalog, placeholder: impl Into<String>) -> Self {
        Lightbox {
            catalog,
            placeholder: placeholder.into(),
            open: None,
        }
    }

    /// Open the gallery for an event title, starting at its first image.
    pub fn open(&mut self, title: &str) -> Option<&LightboxImage> {
        tracing::debug!(title, "opening gallery");
        let images = self
            .catalog
            .images_for(title, &self.placeholder)
            .into_iter()
            .map(|src| LightboxImage {
                src,
                caption: title.to_string(),
            })
            .collect();
        self.open = Some(Carousel::bind(images));
        self.current()
    }

    /// Open over an explicit image list at `index` (wrapped into range).
    /// An empty list leaves the lightbox closed.
    pub fn open_at(&mut self, images: Vec<LightboxImage>, index: usize) -> Option<&LightboxImage> {
        self.close();
        if images.is_empty() {
            return None;
        }
        self.open = Some(Carousel::bind_at(images, index));
        self.current()
    }

    pub fn close(&mut self) {
        if self.open.take().is_some() {
            tracing::debug!("lightbox closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Prev/next controls are only offered for multi-image galleries.
    pub fn has_navigation(&self) -> bool {
        self.open.as_ref().is_some_and(|c| c.len() > 1)
    }

    pub fn current(&self) -> Option<&LightboxImage> {
        self.open.as_ref().and_then(|c| c.current())
    }

    /// 1-based position and gallery size, e.g. for a "2 / 3" label.
    pub fn position(&self) -> Option<(usize, usize)> {
        let carousel = self.open.as_ref()?;
        Some((carousel.state().position()?, carousel.len()))
    }

    pub fn next(&mut self) -> Option<&LightboxImage> {
        self.open.as_mut().and_then(|c| c.next())
    }

    pub fn previous(&mut self) -> Option<&LightboxImage> {
        self.open.as_mut().and_then(|c| c.previous())
    }

    /// Keyboard handling. Keys are ignored while the lightbox is closed.
    pub fn handle_key(&mut self, key: LightboxKey) {
        if !self.is_open() {
            return;
        }
        match key {
            LightboxKey::Escape => self.close(),
            LightboxKey::ArrowLeft => {
                self.previous();
            }
            LightboxKey::ArrowRight => {
                self.next();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> GalleryCatalog {
        let mut catalog = GalleryCatalog::new();
        catalog.insert(
            "Winter Coding Workshop",
            vec![
                "images/winter_workshop_1.jpg".to_string(),
                "images/winter_workshop_2.jpg".to_string(),
                "images/winter_workshop_3.jpg".to_string(),
            ],
        );
        catalog
    }

    #[test]
    fn test_open_known_gallery_starts_at_first_image() {
        let mut lightbox = Lightbox::new(catalog(), DEFAULT_PLACEHOLDER_IMAGE);
        let image = lightbox.open("Winter Coding Workshop").unwrap();
        assert_eq!(image.src, "images/winter_workshop_1.jpg");
        assert_eq!(image.caption, "Winter Coding Workshop");
        assert!(lightbox.has_navigation());
        assert_eq!(lightbox.position(), Some((1, 3)));
    }

    #[test]
    fn test_unknown_title_falls_back_to_placeholder() {
        let mut lightbox = Lightbox::new(catalog(), DEFAULT_PLACEHOLDER_IMAGE);
        let image = lightbox.open("winter coding workshop").unwrap();
        assert_eq!(image.src, DEFAULT_PLACEHOLDER_IMAGE);
        assert!(!lightbox.has_navigation());
    }

    #[test]
    fn test_arrow_keys_wrap() {
        let mut lightbox = Lightbox::new(catalog(), DEFAULT_PLACEHOLDER_IMAGE);
        lightbox.open("Winter Coding Workshop");

        lightbox.handle_key(LightboxKey::ArrowLeft);
        assert_eq!(lightbox.current().unwrap().src, "images/winter_workshop_3.jpg");

        lightbox.handle_key(LightboxKey::ArrowRight);
        lightbox.handle_key(LightboxKey::ArrowRight);
        assert_eq!(lightbox.current().unwrap().src, "images/winter_workshop_2.jpg");
    }

    #[test]
    fn test_escape_closes_and_keys_are_ignored_when_closed() {
        let mut lightbox = Lightbox::new(catalog(), DEFAULT_PLACEHOLDER_IMAGE);
        lightbox.open("Winter Coding Workshop");
        lightbox.handle_key(LightboxKey::Escape);
        assert!(!lightbox.is_open());

        lightbox.handle_key(LightboxKey::ArrowRight);
        assert!(lightbox.current().is_none());
    }

    #[test]
    fn test_reopen_resets_to_first_image() {
        let mut lightbox = Lightbox::new(catalog(), DEFAULT_PLACEHOLDER_IMAGE);
        lightbox.open("Winter Coding Workshop");
        lightbox.next();
        lightbox.close();

        let image = lightbox.open("Winter Coding Workshop").unwrap();
        assert_eq!(image.src, "images/winter_workshop_1.jpg");
    }

    #[test]
    fn test_open_at_index() {
        let images = vec![
            LightboxImage {
                src: "a.jpg".to_string(),
                caption: "A".to_string(),
            },
            LightboxImage {
                src: "b.jpg".to_string(),
                caption: "B".to_string(),
            },
        ];
        let mut lightbox = Lightbox::new(GalleryCatalog::new(), DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(lightbox.open_at(images, 1).unwrap().caption, "B");
        assert!(lightbox.open_at(Vec::new(), 0).is_none());
    }

    #[test]
    fn test_open_at_empty_closes_previous_gallery() {
        let mut lightbox = Lightbox::new(catalog(), DEFAULT_PLACEHOLDER_IMAGE);
        lightbox.open("Winter Coding Workshop");
        assert!(lightbox.is_open());

        assert!(lightbox.open_at(Vec::new(), 0).is_none());
        assert!(!lightbox.is_open());
        assert!(lightbox.current().is_none());
        assert_eq!(lightbox.position(), None);
    }
}
