//! Auto-advancing slideshow with dot navigation.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::carousel::Carousel;
use crate::timer::RepeatingTimer;

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SlideshowConfig {
    pub autoplay_interval: Duration,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        SlideshowConfig {
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
        }
    }
}

type SharedCarousel = Arc<Mutex<Carousel<Slide>>>;

/// A slideshow bound to a fixed set of slides.
///
/// The active index is published on a watch channel after every change,
/// whether it came from a button, a dot or the autoplay timer.
pub struct Slideshow {
    carousel: SharedCarousel,
    active: Arc<watch::Sender<Option<usize>>>,
    autoplay: RepeatingTimer,
    autoplay_enabled: bool,
}

impl Slideshow {
    pub fn new(slides: Vec<Slide>, config: SlideshowConfig) -> Self {
        let carousel = Carousel::bind(slides);
        let (active, _) = watch::channel(carousel.current_index());
        let carousel = Arc::new(Mutex::new(carousel));
        let active = Arc::new(active);

        let tick_carousel = Arc::clone(&carousel);
        let tick_active = Arc::clone(&active);
        let autoplay = RepeatingTimer::new("slideshow", config.autoplay_interval, move || {
            navigate(&tick_carousel, &tick_active, |c| {
                c.next();
            });
        });

        Slideshow {
            carousel,
            active,
            autoplay,
            autoplay_enabled: false,
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.carousel).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.carousel).is_empty()
    }

    /// Start auto-advancing. A slideshow without slides never starts.
    pub fn start(&mut self) {
        if self.is_empty() {
            return;
        }
        self.autoplay_enabled = true;
        self.autoplay.start();
    }

    pub fn stop(&mut self) {
        self.autoplay_enabled = false;
        self.autoplay.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.autoplay.is_running()
    }

    pub fn pointer_enter(&mut self) {
        if self.autoplay_enabled {
            self.autoplay.suspend();
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.autoplay_enabled {
            self.autoplay.resume();
        }
    }

    pub fn next(&self) -> Option<usize> {
        navigate(&self.carousel, &self.active, |c| {
            c.next();
        })
    }

    pub fn previous(&self) -> Option<usize> {
        navigate(&self.carousel, &self.active, |c| {
            c.previous();
        })
    }

    /// Dot click, 1-based. Out-of-range positions wrap instead of failing.
    pub fn goto(&self, position: i64) -> Option<usize> {
        tracing::debug!(position, "jumping to slide");
        navigate(&self.carousel, &self.active, |c| {
            c.goto(position);
        })
    }

    pub fn current_index(&self) -> Option<usize> {
        lock(&self.carousel).current_index()
    }

    pub fn current(&self) -> Option<Slide> {
        lock(&self.carousel).current().cloned()
    }

    /// Active flag per dot, in slide order.
    pub fn dots(&self) -> Vec<bool> {
        lock(&self.carousel).marked().map(|(_, active)| active).collect()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<usize>> {
        self.active.subscribe()
    }
}

fn lock(carousel: &SharedCarousel) -> std::sync::MutexGuard<'_, Carousel<Slide>> {
    carousel.lock().unwrap_or_else(PoisonError::into_inner)
}

fn navigate(
    carousel: &SharedCarousel,
    active: &watch::Sender<Option<usize>>,
    step: impl FnOnce(&mut Carousel<Slide>),
) -> Option<usize> {
    let index = {
        let mut carousel = lock(carousel);
        step(&mut carousel);
        carousel.current_index()
    };
    if let Some(i) = index {
        tracing::debug!(slide = i + 1, "slide changed");
    }
    active.send_replace(index);
    index
}
