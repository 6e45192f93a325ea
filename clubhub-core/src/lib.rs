//! Core logic for the clubhub site.
//!
//! This crate holds the interactive behavior behind the pages, independent of
//! any rendering layer:
//! - `cycle`/`carousel` for wrap-around selection, shared by the slideshow,
//!   the gallery lightbox and the calendar month pointer
//! - `calendar` and `filter` for the events page
//! - `validate`, `session` and `registration` for forms
//! - `timer`/`deferred` for the tokio tasks behind autoplay and success messages

pub mod calendar;
pub mod carousel;
pub mod catalog;
pub mod countdown;
pub mod cycle;
pub mod deferred;
pub mod error;
pub mod event;
pub mod filter;
pub mod lightbox;
pub mod registration;
pub mod session;
pub mod site_config;
pub mod slideshow;
pub mod timer;
pub mod validate;

pub use catalog::EventCatalog;
pub use cycle::CycleState;
pub use error::{ClubHubError, ClubHubResult};
pub use event::{Category, ClubEvent};
