use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/segno/config.toml` or `~/.config/segno/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SEGNO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub shelf: ShelfSettings,
    pub http: HttpSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shelf: ShelfSettings::default(),
            http: HttpSettings::default(),
            playback: PlaybackSettings::default(),
            controls: ControlsSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShelfSettings {
    /// Base URL of the server hosting the shelf. The first positional
    /// CLI argument overrides this.
    pub base_url: String,
    /// Path segment under the base URL holding the album folders.
    pub root: String,
    /// How albums and catalogs are resolved, see `ShelfStrategy`.
    pub strategy: ShelfStrategy,
    /// Album folder to open at startup. When unset, the first album on
    /// the shelf is opened once the index arrives.
    pub startup_album: Option<String>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    /// Only consulted by the listing strategy; manifests name their
    /// songs explicitly.
    pub extensions: Vec<String>,
}

impl Default for ShelfSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            root: "songs".to_string(),
            strategy: ShelfStrategy::Listing,
            startup_album: None,
            extensions: vec!["mp3".into()],
        }
    }
}

/// Shelf loading strategy. The two are never blended: each pick keeps
/// its own failure granularity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShelfStrategy {
    /// Scrape directory-listing pages and probe each folder's
    /// `info.json` for title/description. One bad album is skipped with
    /// a warning and the rest of the shelf survives. Costs one request
    /// per folder.
    #[serde(alias = "scrape", alias = "dir_listing", alias = "dir-listing")]
    Listing,
    /// Read `albums.json` for the index and per-folder `info.json` song
    /// lists for catalogs. One request for the whole index, but a
    /// malformed `albums.json` empties it wholesale.
    #[serde(alias = "json", alias = "manifests")]
    Manifest,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Connection timeout for shelf and track fetches (seconds).
    pub connect_timeout_secs: u64,
    /// Read timeout for shelf and track fetches (seconds).
    pub read_timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            read_timeout_secs: 15,
            user_agent: format!("segno/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume applied at startup, `0..=100`.
    pub start_volume_percent: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            start_volume_percent: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Seek-bar percentage moved per `H` / `L` press.
    pub seek_step_percent: u8,
    /// Volume percentage moved per `-` / `+` press.
    pub volume_step_percent: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_percent: 5,
            volume_step_percent: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top "segno" header box.
    pub header_text: String,
    /// Whether the album shelf panel starts visible.
    pub shelf_open: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ segno · from the sign ~ ".to_string(),
            shelf_open: true,
        }
    }
}
