use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use lofty::prelude::AudioFile;
use lofty::probe::Probe;
use log::{error, warn};
use rodio::{OutputStreamBuilder, Sink};

use crate::shelf::HttpFetcher;

use super::sink::sink_from_bytes;
use super::types::{AudioCmd, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    fetcher: HttpFetcher,
    rx: Receiver<AudioCmd>,
    snapshot: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(err) => {
                // Keep consuming commands so the transport stays a
                // harmless no-op on machines without audio. The command
                // side pre-marks the snapshot, so wipe it back after
                // every command it will never see acted on.
                error!("audio: no output device: {err}");
                while let Ok(cmd) = rx.recv() {
                    if let Ok(mut snap) = snapshot.lock() {
                        *snap = Default::default();
                    }
                    if matches!(cmd, AudioCmd::Quit) {
                        break;
                    }
                }
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        // Fetched bytes of the staged track, kept for seek rebuilds.
        let mut bytes: Option<Arc<[u8]>> = None;
        let mut volume: f32 = 1.0;

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { url, autoplay } => {
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                        bytes = None;
                        if let Ok(mut snap) = snapshot.lock() {
                            snap.mark_loading(autoplay);
                        }

                        let fetched: Arc<[u8]> = match fetcher.get_bytes(&url) {
                            Ok(data) => Arc::from(data),
                            Err(err) => {
                                error!("audio: fetch failed for '{url}': {err}");
                                if let Ok(mut snap) = snapshot.lock() {
                                    snap.mark_failed();
                                }
                                continue;
                            }
                        };
                        let duration = probe_duration(&fetched);

                        match sink_from_bytes(&stream, &fetched, Duration::ZERO) {
                            Ok(new_sink) => {
                                new_sink.set_volume(volume);
                                if autoplay {
                                    new_sink.play();
                                }
                                bytes = Some(fetched);
                                sink = Some(new_sink);
                                if let Ok(mut snap) = snapshot.lock() {
                                    snap.playing = autoplay;
                                    snap.base_elapsed = Duration::ZERO;
                                    snap.resumed_at = autoplay.then(Instant::now);
                                    snap.duration = duration;
                                    snap.failed = false;
                                }
                            }
                            Err(err) => {
                                error!("audio: cannot decode '{url}': {err}");
                                if let Ok(mut snap) = snapshot.lock() {
                                    snap.mark_failed();
                                }
                            }
                        }
                    }

                    AudioCmd::Play => {
                        if let Some(ref s) = sink {
                            s.play();
                            if let Ok(mut snap) = snapshot.lock() {
                                snap.mark_playing(Instant::now());
                            }
                        } else if let Ok(mut snap) = snapshot.lock() {
                            // Nothing staged: undo the command side's
                            // optimistic flag so the clock stays dead.
                            snap.mark_paused(Instant::now());
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(ref s) = sink {
                            s.pause();
                            if let Ok(mut snap) = snapshot.lock() {
                                snap.mark_paused(Instant::now());
                            }
                        }
                    }

                    AudioCmd::Seek(position) => {
                        let Some(data) = bytes.as_ref() else {
                            continue;
                        };
                        let was_playing = snapshot.lock().map(|snap| snap.playing).unwrap_or(false);
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                        match sink_from_bytes(&stream, data, position) {
                            Ok(new_sink) => {
                                new_sink.set_volume(volume);
                                if was_playing {
                                    new_sink.play();
                                }
                                sink = Some(new_sink);
                                if let Ok(mut snap) = snapshot.lock() {
                                    snap.mark_seeked(position, Instant::now());
                                }
                            }
                            Err(err) => {
                                warn!("audio: seek rebuild failed: {err}");
                                bytes = None;
                                if let Ok(mut snap) = snapshot.lock() {
                                    snap.mark_failed();
                                }
                            }
                        }
                    }

                    AudioCmd::SetVolume(gain) => {
                        volume = gain.clamp(0.0, 1.0);
                        if let Some(ref s) = sink {
                            s.set_volume(volume);
                        }
                    }

                    AudioCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        if let Ok(mut snap) = snapshot.lock() {
                            snap.mark_paused(Instant::now());
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic check: the staged track ran out. Freeze the
                    // clock at the end; nothing auto-advances.
                    let ended = sink.as_ref().is_some_and(|s| s.empty());
                    if ended {
                        if let Ok(mut snap) = snapshot.lock() {
                            if snap.playing {
                                snap.playing = false;
                                snap.resumed_at = None;
                                if let Some(total) = snap.duration {
                                    snap.base_elapsed = total;
                                }
                            }
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Read the total length out of the fetched bytes. `None`, not an
/// error: a track without a readable length just is not seekable.
fn probe_duration(bytes: &Arc<[u8]>) -> Option<Duration> {
    let tagged = Probe::new(std::io::Cursor::new(bytes.clone()))
        .guess_file_type()
        .ok()?
        .read()
        .ok()?;
    Some(tagged.properties().duration())
}
