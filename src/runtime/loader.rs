use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::shelf::{Album, Catalog, ShelfSource};

/// Work orders for the shelf loader thread.
pub enum LoaderJob {
    Albums,
    Catalog {
        folder: String,
        token: u64,
        autoplay: bool,
    },
}

/// Finished jobs. Catalog replies carry the selection token they were
/// requested under so late answers can be recognized and dropped.
pub enum LoaderEvent {
    Albums(Vec<Album>),
    Catalog {
        token: u64,
        catalog: Catalog,
        autoplay: bool,
    },
}

/// Handle to the background thread that does all shelf HTTP. Requests
/// are fire-and-forget; replies are polled from the event loop.
pub struct LoaderHandle {
    jobs: Sender<LoaderJob>,
    events: Receiver<LoaderEvent>,
}

impl LoaderHandle {
    /// Spawn the worker. It owns the shelf source and exits when the
    /// handle is dropped.
    pub fn spawn(source: Box<dyn ShelfSource + Send>) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<LoaderJob>();
        let (event_tx, event_rx) = mpsc::channel::<LoaderEvent>();

        thread::spawn(move || {
            while let Ok(job) = job_rx.recv() {
                let event = match job {
                    LoaderJob::Albums => LoaderEvent::Albums(source.albums()),
                    LoaderJob::Catalog {
                        folder,
                        token,
                        autoplay,
                    } => LoaderEvent::Catalog {
                        token,
                        catalog: source.catalog(&folder),
                        autoplay,
                    },
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self {
            jobs: job_tx,
            events: event_rx,
        }
    }

    pub fn request_albums(&self) {
        let _ = self.jobs.send(LoaderJob::Albums);
    }

    pub fn request_catalog(&self, folder: &str, token: u64, autoplay: bool) {
        let _ = self.jobs.send(LoaderJob::Catalog {
            folder: folder.to_string(),
            token,
            autoplay,
        });
    }

    /// Non-blocking poll for the next finished job.
    pub fn try_event(&self) -> Option<LoaderEvent> {
        self.events.try_recv().ok()
    }
}
