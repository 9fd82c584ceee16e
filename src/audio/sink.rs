//! Building `rodio` sinks from fetched track bytes.
//!
//! The whole track is held in memory, so seeking can rebuild the sink
//! from the same buffer without refetching.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink, Source};

/// Create a paused `Sink` over `bytes` that starts playback at
/// `start_at`.
pub(super) fn sink_from_bytes(
    handle: &OutputStream,
    bytes: &Arc<[u8]>,
    start_at: Duration,
) -> Result<Sink, DecoderError> {
    let source = Decoder::new(Cursor::new(bytes.clone()))?
        // `skip_duration` is the seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
