//! The media handle trait and the transport states driven through it.

use std::time::Duration;

/// Transport state of the playback controller.
///
/// `Paused` and `Playing` both imply a loaded track. `Idle` means no
/// track has been handed to the media handle since the last folder
/// switch (or ever); play/pause and seek are inert there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Paused,
    Playing,
}

/// The single playback object the controller drives.
///
/// The production implementation streams the source URL into a rodio
/// sink on a worker thread; tests substitute a recording fake. Calls
/// never fail synchronously: a source that cannot be fetched or decoded
/// surfaces later as a handle that stopped with no known duration.
pub trait MediaHandle {
    /// Stage `url` as the current source, replacing any previous one and
    /// resetting the clock. Playback starts as soon as the source is
    /// ready when `autoplay` is set, otherwise it waits paused.
    fn set_source(&mut self, url: &str, autoplay: bool);
    /// Resume the staged source.
    fn play(&mut self);
    /// Pause without releasing the staged source.
    fn pause(&mut self);
    /// Jump to an absolute position in the staged source.
    fn seek_to(&mut self, position: Duration);
    /// Set the output gain, `0.0..=1.0`. Survives source switches.
    fn set_volume(&mut self, gain: f32);
    /// Whether audio is advancing right now.
    fn is_playing(&self) -> bool;
    /// Elapsed time of the staged source.
    fn position(&self) -> Duration;
    /// Total length, once known. Sources whose length could not be read
    /// stay `None` and are not seekable.
    fn duration(&self) -> Option<Duration>;
}
