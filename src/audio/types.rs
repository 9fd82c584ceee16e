//! Audio-related small types and handles.
//!
//! Commands flow one way into the worker thread; state flows back
//! through a shared snapshot. Readers derive the live position from the
//! snapshot's clock fields instead of waiting for the thread to tick.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub enum AudioCmd {
    /// Fetch `url` and stage it as the current track, replacing whatever
    /// is staged. Starts audibly as soon as the bytes are in when
    /// `autoplay` is set, otherwise waits paused at zero.
    Load { url: String, autoplay: bool },
    /// Resume the staged track.
    Play,
    /// Pause, keeping the staged track.
    Pause,
    /// Jump to an absolute offset in the staged track.
    Seek(Duration),
    /// Set sink gain, `0.0..=1.0`. Survives track switches.
    SetVolume(f32),
    /// Tear the thread down.
    Quit,
}

/// What the worker publishes about the staged track.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSnapshot {
    /// Whether the sink is audibly advancing (or a load with autoplay is
    /// in flight).
    pub playing: bool,
    /// Elapsed time accumulated up to the last pause, seek or load.
    pub base_elapsed: Duration,
    /// While audio is running: the instant the sink (re)started, from
    /// which the live position extrapolates. `None` freezes the clock at
    /// `base_elapsed`.
    pub resumed_at: Option<Instant>,
    /// Total track length, once it could be read from the fetched bytes.
    pub duration: Option<Duration>,
    /// Set when the last load failed to fetch or decode.
    pub failed: bool,
}

impl PlaybackSnapshot {
    /// Live position at `now`, clamped into the track when the length is
    /// known.
    pub fn position_at(&self, now: Instant) -> Duration {
        let running = match self.resumed_at {
            Some(since) if self.playing => now.saturating_duration_since(since),
            _ => Duration::ZERO,
        };
        let position = self.base_elapsed + running;
        match self.duration {
            Some(total) => position.min(total),
            None => position,
        }
    }

    /// Start the clock. Idempotent: calling it while playing keeps the
    /// original start instant.
    pub fn mark_playing(&mut self, now: Instant) {
        if !self.playing {
            self.playing = true;
            self.resumed_at = Some(now);
        }
    }

    /// Freeze the clock, folding the running time into `base_elapsed`.
    /// Idempotent for the same reason as `mark_playing`.
    pub fn mark_paused(&mut self, now: Instant) {
        if let Some(since) = self.resumed_at.take() {
            self.base_elapsed += now.saturating_duration_since(since);
        }
        self.playing = false;
    }

    /// Move the clock to an absolute position, keeping the play flag.
    pub fn mark_seeked(&mut self, position: Duration, now: Instant) {
        self.base_elapsed = position;
        if self.playing {
            self.resumed_at = Some(now);
        }
    }

    /// Reset for a fresh load. `autoplay` pre-sets the play flag so the
    /// transport reads correctly while the fetch is still in flight; the
    /// clock only starts once audio actually runs.
    pub fn mark_loading(&mut self, autoplay: bool) {
        *self = Self {
            playing: autoplay,
            ..Self::default()
        };
    }

    /// Record a failed load: nothing staged, clock dead.
    pub fn mark_failed(&mut self) {
        *self = Self {
            failed: true,
            ..Self::default()
        };
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackSnapshot>>;
