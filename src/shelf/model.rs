//! Shelf data types shared by both loading strategies.

/// One album folder on the shelf, as advertised by its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// Folder name under the shelf root, in decoded (display) form.
    pub folder: String,
    pub title: String,
    pub description: String,
}

impl Album {
    /// URL of the cover image conventionally kept inside the folder.
    pub fn cover_url(&self, shelf_url: &str) -> String {
        format!(
            "{}/{}/cover.jpg",
            shelf_url.trim_end_matches('/'),
            urlencoding::encode(&self.folder)
        )
    }
}

/// Ordered track list for one folder. Installed wholesale on every
/// folder switch, never mutated in place; an empty catalog doubles as
/// the load-failure signal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    /// Folder name in decoded (display) form.
    pub folder: String,
    /// Absolute URL prefix of the folder, without trailing slash.
    pub folder_url: String,
    /// Track file names, decoded and trimmed, in shelf order.
    pub tracks: Vec<String>,
}

impl Catalog {
    pub fn new(folder: impl Into<String>, folder_url: impl Into<String>, tracks: Vec<String>) -> Self {
        Self {
            folder: folder.into(),
            folder_url: folder_url.into(),
            tracks,
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track(&self, index: usize) -> Option<&str> {
        self.tracks.get(index).map(String::as_str)
    }

    /// Fetch URL for the track at `index`. Names are stored decoded, so
    /// the path segment is re-encoded here.
    pub fn track_url(&self, index: usize) -> Option<String> {
        self.tracks
            .get(index)
            .map(|name| format!("{}/{}", self.folder_url, urlencoding::encode(name)))
    }
}

/// Normalize a raw track or folder name: percent-decode, trim
/// whitespace, drop empties. Returns the display form; URL builders
/// re-encode it when a request path is formed.
pub(super) fn clean_name(raw: &str) -> Option<String> {
    let decoded = match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    };
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
