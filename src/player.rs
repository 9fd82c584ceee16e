//! Playback controller: the current catalog, the track pointer, the
//! transport state machine and the media handle it drives.

mod clock;
mod controller;
mod media;

pub use clock::{format_clock, format_clock_opt};
pub use controller::*;
pub use media::*;

#[cfg(test)]
mod tests;
