//! Shelf sources: the two loading strategies behind one trait.
//!
//! Sources never surface errors to callers. A failed album index or
//! catalog load degrades to an empty result, logged here, and the UI
//! simply shows an empty shelf or an empty track list.

use log::{error, warn};
use thiserror::Error;

use crate::config::{ShelfSettings, ShelfStrategy};

use super::fetch::{FetchError, Fetcher, HttpFetcher};
use super::listing;
use super::manifest::{AlbumEntry, AlbumInfo, SongsManifest};
use super::model::{Album, Catalog, clean_name};

/// Loader-internal failure. Public methods absorb these into empty
/// results; the enum keeps the failure modes distinguishable in logs
/// and tests.
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("malformed manifest at {url}: {reason}")]
    MalformedManifest { url: String, reason: String },
}

/// A source of albums and track catalogs. One folder's catalog is live
/// at a time; both methods block and are called off the input thread.
pub trait ShelfSource {
    /// Root URL of the shelf, for status lines and art links.
    fn shelf_url(&self) -> &str;
    /// Resolve the album index. Degrades to empty on failure.
    fn albums(&self) -> Vec<Album>;
    /// Resolve one folder's catalog. Degrades to empty on failure.
    fn catalog(&self, folder: &str) -> Catalog;
}

/// Build the configured source over a shared HTTP agent.
pub fn open_shelf(agent: ureq::Agent, settings: &ShelfSettings) -> Box<dyn ShelfSource + Send> {
    let fetcher = HttpFetcher::new(agent);
    match settings.strategy {
        ShelfStrategy::Listing => Box::new(ListingShelf::new(fetcher, settings)),
        ShelfStrategy::Manifest => Box::new(ManifestShelf::new(fetcher, settings)),
    }
}

/// Strategy that scrapes directory-listing pages. Album metadata comes
/// from per-folder `info.json` probes; a folder whose probe fails is
/// skipped, the rest of the shelf survives.
pub struct ListingShelf<F = HttpFetcher> {
    fetcher: F,
    shelf_url: String,
    extensions: Vec<String>,
}

impl<F: Fetcher> ListingShelf<F> {
    pub fn new(fetcher: F, settings: &ShelfSettings) -> Self {
        Self {
            fetcher,
            shelf_url: shelf_root_url(&settings.base_url, &settings.root),
            extensions: settings.extensions.clone(),
        }
    }

    fn album_info(&self, folder: &str) -> Result<AlbumInfo, ShelfError> {
        let url = format!("{}/{}/info.json", self.shelf_url, urlencoding::encode(folder));
        let text = self.fetcher.get_text(&url)?;
        serde_json::from_str(&text).map_err(|err| ShelfError::MalformedManifest {
            url,
            reason: err.to_string(),
        })
    }
}

impl<F: Fetcher> ShelfSource for ListingShelf<F> {
    fn shelf_url(&self) -> &str {
        &self.shelf_url
    }

    fn albums(&self) -> Vec<Album> {
        let url = format!("{}/", self.shelf_url);
        let html = match self.fetcher.get_text(&url) {
            Ok(html) => html,
            Err(err) => {
                error!("shelf: album listing fetch failed ({url}): {err}");
                return Vec::new();
            }
        };
        let mut albums = Vec::new();
        for folder in listing::folder_names(&html) {
            match self.album_info(&folder) {
                Ok(info) => albums.push(Album {
                    folder,
                    title: info.title,
                    description: info.description,
                }),
                Err(err) => warn!("shelf: skipping folder '{folder}': {err}"),
            }
        }
        albums
    }

    fn catalog(&self, folder: &str) -> Catalog {
        let folder_url = folder_url(&self.shelf_url, folder);
        let page_url = format!("{folder_url}/");
        let tracks = match self.fetcher.get_text(&page_url) {
            Ok(html) => listing::track_names(&html, &self.extensions),
            Err(err) => {
                error!("shelf: folder listing fetch failed ({page_url}): {err}");
                Vec::new()
            }
        };
        Catalog::new(folder, folder_url, tracks)
    }
}

/// Strategy that reads JSON manifests. One request serves the whole
/// index, but a malformed `albums.json` empties it wholesale.
pub struct ManifestShelf<F = HttpFetcher> {
    fetcher: F,
    shelf_url: String,
}

impl<F: Fetcher> ManifestShelf<F> {
    pub fn new(fetcher: F, settings: &ShelfSettings) -> Self {
        Self {
            fetcher,
            shelf_url: shelf_root_url(&settings.base_url, &settings.root),
        }
    }

    fn try_albums(&self) -> Result<Vec<Album>, ShelfError> {
        let url = format!("{}/albums.json", self.shelf_url);
        let text = self.fetcher.get_text(&url)?;
        let entries: Vec<AlbumEntry> =
            serde_json::from_str(&text).map_err(|err| ShelfError::MalformedManifest {
                url,
                reason: err.to_string(),
            })?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let folder = clean_name(&entry.folder)?;
                Some(Album {
                    folder,
                    title: entry.title,
                    description: entry.description,
                })
            })
            .collect())
    }

    fn try_songs(&self, folder_url: &str) -> Result<Vec<String>, ShelfError> {
        let url = format!("{folder_url}/info.json");
        let text = self.fetcher.get_text(&url)?;
        let manifest: SongsManifest =
            serde_json::from_str(&text).map_err(|err| ShelfError::MalformedManifest {
                url,
                reason: err.to_string(),
            })?;
        Ok(manifest
            .songs
            .iter()
            .filter_map(|raw| clean_name(raw))
            .collect())
    }
}

impl<F: Fetcher> ShelfSource for ManifestShelf<F> {
    fn shelf_url(&self) -> &str {
        &self.shelf_url
    }

    fn albums(&self) -> Vec<Album> {
        match self.try_albums() {
            Ok(albums) => albums,
            Err(err) => {
                error!("shelf: album manifest load failed: {err}");
                Vec::new()
            }
        }
    }

    fn catalog(&self, folder: &str) -> Catalog {
        let folder_url = folder_url(&self.shelf_url, folder);
        let tracks = match self.try_songs(&folder_url) {
            Ok(tracks) => tracks,
            Err(err) => {
                error!("shelf: catalog load failed for '{folder}': {err}");
                Vec::new()
            }
        };
        Catalog::new(folder, folder_url, tracks)
    }
}

/// Join base URL and shelf root into the index URL, without a trailing
/// slash. The root is taken verbatim; folder names get re-encoded
/// because they are stored in decoded form.
fn shelf_root_url(base_url: &str, root: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let root = root.trim_matches('/');
    if root.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{root}")
    }
}

fn folder_url(shelf_url: &str, folder: &str) -> String {
    format!("{shelf_url}/{}", urlencoding::encode(folder))
}
