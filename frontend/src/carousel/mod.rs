//! Auto-advancing, draggable, looping carousel.
//!
//! Pure state: nothing in here touches the DOM or owns a timer, so every
//! transition is testable on the host. `components::carousel` drives it
//! in the browser.

pub mod config;
pub mod state;
pub mod track;

#[cfg(test)]
mod harness;

pub use config::{CarouselConfig, CarouselPreset};
pub use state::{Carousel, Direction, TimerCommand};
