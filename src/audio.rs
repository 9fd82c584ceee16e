//! Streaming audio backend: an HTTP-fed rodio sink on a worker thread.
//!
//! The worker owns the output stream and the staged track's bytes.
//! Everything else talks to it through `StreamPlayer`, which implements
//! the player's media handle over a command channel plus a shared
//! clock snapshot.

mod sink;
mod stream;
mod thread;
mod types;

pub use stream::StreamPlayer;
pub use types::{AudioCmd, PlaybackHandle, PlaybackSnapshot};

#[cfg(test)]
mod tests;
