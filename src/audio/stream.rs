use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::player::MediaHandle;
use crate::shelf::HttpFetcher;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackSnapshot};

/// Media handle over the audio worker thread.
///
/// Commands are fire-and-forget; state comes back through the shared
/// snapshot. The command-side also pre-marks the snapshot so the
/// transport reads correctly in the frames before the worker catches
/// up (a load can spend seconds fetching). Both sides use the same
/// idempotent `mark_*` transitions, so the double write is safe in
/// either order.
pub struct StreamPlayer {
    tx: Sender<AudioCmd>,
    snapshot: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl StreamPlayer {
    pub fn new(fetcher: HttpFetcher) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let snapshot: PlaybackHandle = Arc::new(Mutex::new(PlaybackSnapshot::default()));

        let audio_handle = spawn_audio_thread(fetcher, rx, snapshot.clone());

        Self {
            tx,
            snapshot,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    /// Whether the last load failed. The controller does not act on
    /// this; the status line does.
    pub fn load_failed(&self) -> bool {
        self.read(|snap| snap.failed, false)
    }

    fn send(&self, cmd: AudioCmd) {
        let _ = self.tx.send(cmd);
    }

    fn read<T>(&self, f: impl FnOnce(&PlaybackSnapshot) -> T, fallback: T) -> T {
        self.snapshot.lock().map(|snap| f(&snap)).unwrap_or(fallback)
    }

    /// Stop the worker and wait for it to wind down.
    pub fn quit(&self) {
        self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl MediaHandle for StreamPlayer {
    fn set_source(&mut self, url: &str, autoplay: bool) {
        if let Ok(mut snap) = self.snapshot.lock() {
            snap.mark_loading(autoplay);
        }
        self.send(AudioCmd::Load {
            url: url.to_string(),
            autoplay,
        });
    }

    fn play(&mut self) {
        if let Ok(mut snap) = self.snapshot.lock() {
            snap.mark_playing(Instant::now());
        }
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        if let Ok(mut snap) = self.snapshot.lock() {
            snap.mark_paused(Instant::now());
        }
        self.send(AudioCmd::Pause);
    }

    fn seek_to(&mut self, position: Duration) {
        if let Ok(mut snap) = self.snapshot.lock() {
            snap.mark_seeked(position, Instant::now());
        }
        self.send(AudioCmd::Seek(position));
    }

    fn set_volume(&mut self, gain: f32) {
        self.send(AudioCmd::SetVolume(gain));
    }

    fn is_playing(&self) -> bool {
        self.read(|snap| snap.playing, false)
    }

    fn position(&self) -> Duration {
        self.read(|snap| snap.position_at(Instant::now()), Duration::ZERO)
    }

    fn duration(&self) -> Option<Duration> {
        self.read(|snap| snap.duration, None)
    }
}
