//! JSON manifest shapes for the manifest strategy and the listing
//! strategy's per-folder metadata probe.

use serde::Deserialize;

/// Per-folder `info.json` as the manifest strategy reads it: the song
/// list is required, display metadata optional.
#[derive(Debug, Deserialize)]
pub(super) struct SongsManifest {
    pub songs: Vec<String>,
}

/// Per-folder `info.json` as the listing strategy reads it: only the
/// display metadata matters, tracks come from the folder's own listing.
#[derive(Debug, Deserialize)]
pub(super) struct AlbumInfo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One entry of the top-level `albums.json`.
#[derive(Debug, Deserialize)]
pub(super) struct AlbumEntry {
    pub folder: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}
