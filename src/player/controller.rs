//! The playback controller proper.

use std::time::Duration;

use log::debug;

use crate::shelf::Catalog;

use super::clock::{format_clock, format_clock_opt};
use super::media::{MediaHandle, PlaybackState};

/// Gain restored by unmuting. Deliberately a fixed quiet default rather
/// than the pre-mute level.
pub const UNMUTE_GAIN: f32 = 0.10;

/// Transport clock snapshot, derived fresh from the media handle on
/// every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub elapsed: String,
    pub total: String,
    /// Seek-bar position, `0.0..=1.0`. Stays `0.0` while the duration
    /// is unknown.
    pub fraction: f64,
}

/// Read-only view of the controller for rendering.
pub struct PlayerView<'a> {
    pub state: PlaybackState,
    /// Folder name of the active catalog, decoded.
    pub folder: Option<&'a str>,
    pub tracks: &'a [String],
    pub current: Option<usize>,
    pub progress: Progress,
    pub volume_percent: u8,
    pub muted: bool,
}

/// One per process: owns the active catalog, the track pointer and the
/// media handle. Folder switches go through `begin_select` /
/// `finish_select` so replies from abandoned switches can be told apart
/// from the live one.
pub struct Player<M: MediaHandle> {
    media: M,
    catalog: Option<Catalog>,
    index: Option<usize>,
    state: PlaybackState,
    gain: f32,
    muted: bool,
    selection: u64,
}

impl<M: MediaHandle> Player<M> {
    pub fn new(media: M) -> Self {
        Self {
            media,
            catalog: None,
            index: None,
            state: PlaybackState::Idle,
            gain: 1.0,
            muted: false,
            selection: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn current_track(&self) -> Option<&str> {
        self.catalog.as_ref()?.track(self.index?)
    }

    pub fn volume_percent(&self) -> u8 {
        (self.gain * 100.0).round() as u8
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// The underlying media handle. Runtime code uses this for concerns
    /// outside the transport contract (shutdown, track length for MPRIS).
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Start a folder switch: bump and return the token the eventual
    /// `finish_select` must present.
    pub fn begin_select(&mut self) -> u64 {
        self.selection += 1;
        self.selection
    }

    /// Install a loaded catalog. Returns `false` and changes nothing
    /// when `token` is not the most recent one handed out, which means
    /// the reply belongs to an abandoned switch.
    ///
    /// On success the old catalog is dropped wholesale, the pointer
    /// moves to track 0 (or nothing for an empty catalog), the media
    /// handle is silenced and the transport returns to `Idle`.
    pub fn finish_select(&mut self, token: u64, catalog: Catalog) -> bool {
        if token != self.selection {
            debug!(
                "player: discarding stale catalog for '{}' (token {token}, current {})",
                catalog.folder, self.selection
            );
            return false;
        }
        self.index = if catalog.is_empty() { None } else { Some(0) };
        self.catalog = Some(catalog);
        self.media.pause();
        self.state = PlaybackState::Idle;
        true
    }

    /// Point the media handle at the track at `index`. Out-of-range
    /// indices (any index, while the catalog is empty or absent) are a
    /// no-op. The clock display restarts from zero either way the load
    /// goes, because the handle resets on a new source.
    pub fn load(&mut self, index: usize, autoplay: bool) {
        let Some(catalog) = self.catalog.as_ref() else {
            return;
        };
        let Some(url) = catalog.track_url(index) else {
            return;
        };
        self.index = Some(index);
        self.media.set_source(&url, autoplay);
        self.state = if autoplay {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        };
    }

    /// Flip between playing and paused. Inert from `Idle`.
    pub fn toggle_play_pause(&mut self) {
        match self.state {
            PlaybackState::Idle => {}
            PlaybackState::Paused => {
                self.media.play();
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Playing => {
                self.media.pause();
                self.state = PlaybackState::Paused;
            }
        }
    }

    /// Advance to the next track and start it. At the end of the catalog
    /// nothing at all changes, the play/pause state included.
    pub fn next(&mut self) {
        let Some(index) = self.index else {
            return;
        };
        let len = self.catalog.as_ref().map_or(0, Catalog::len);
        if index + 1 >= len {
            return;
        }
        self.media.pause();
        self.load(index + 1, true);
    }

    /// Step back to the previous track and start it. Inert on track 0.
    pub fn previous(&mut self) {
        let Some(index) = self.index else {
            return;
        };
        if index == 0 {
            return;
        }
        self.media.pause();
        self.load(index - 1, true);
    }

    /// Seek to a fraction of the track. Clamped into `0..=1`; quietly
    /// does nothing while no track is loaded or the duration is still
    /// unknown.
    pub fn seek(&mut self, fraction: f64) {
        if self.state == PlaybackState::Idle || fraction.is_nan() {
            return;
        }
        let Some(duration) = self.media.duration() else {
            return;
        };
        let fraction = fraction.clamp(0.0, 1.0);
        self.media.seek_to(duration.mul_f64(fraction));
    }

    /// Set the output volume from a UI percentage, clamped to 100.
    /// Leaves the mute flag alone in both directions.
    pub fn set_volume(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.gain = f32::from(percent) / 100.0;
        self.media.set_volume(self.gain);
    }

    /// Toggle mute. Unmuting restores the fixed 10% gain, not whatever
    /// level was active before muting.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.gain = UNMUTE_GAIN;
            self.media.set_volume(self.gain);
            self.muted = false;
        } else {
            self.gain = 0.0;
            self.media.set_volume(0.0);
            self.muted = true;
        }
    }

    /// Reconcile with the media handle: a handle that stopped on its own
    /// (the track ran out, or the source failed) moves `Playing` to
    /// `Paused`. Nothing auto-advances.
    pub fn sync_from_media(&mut self) {
        if self.state == PlaybackState::Playing && !self.media.is_playing() {
            self.state = PlaybackState::Paused;
        }
    }

    /// Transport clock for rendering. Derived from the handle on every
    /// call, nothing is cached between ticks.
    pub fn progress(&self) -> Progress {
        if self.state == PlaybackState::Idle {
            return Progress {
                elapsed: format_clock(0.0),
                total: format_clock(0.0),
                fraction: 0.0,
            };
        }
        let position = self.media.position();
        let duration = self.media.duration();
        let fraction = match duration {
            Some(total) if total > Duration::ZERO => {
                (position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        };
        Progress {
            elapsed: format_clock(position.as_secs_f64()),
            total: format_clock_opt(duration),
            fraction,
        }
    }

    pub fn view(&self) -> PlayerView<'_> {
        PlayerView {
            state: self.state,
            folder: self.catalog.as_ref().map(|catalog| catalog.folder.as_str()),
            tracks: self
                .catalog
                .as_ref()
                .map_or(&[], |catalog| catalog.tracks.as_slice()),
            current: self.index,
            progress: self.progress(),
            volume_percent: self.volume_percent(),
            muted: self.muted,
        }
    }
}
