pub mod calendar;
pub mod countdown;
pub mod events;
pub mod gallery;
pub mod register;
pub mod slideshow;
pub mod validate;
