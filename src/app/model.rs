//! Application model types: `App` and pane focus.
//!
//! `App` holds what the panels show: the album shelf, the two cursors
//! and panel visibility. Transport state lives in the player
//! controller, not here.

use crate::shelf::Album;

/// Which pane keyboard navigation targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Pane {
    Shelf,
    #[default]
    Tracks,
}

/// The main application model.
pub struct App {
    pub albums: Vec<Album>,
    /// Cursor in the shelf pane.
    pub album_cursor: usize,
    /// Cursor in the tracks pane.
    pub track_cursor: usize,
    /// Length of the active catalog, mirrored here for cursor math.
    pub track_count: usize,
    pub focus: Pane,
    pub shelf_open: bool,
    /// Folder whose catalog is currently being fetched, for the status
    /// line. Cleared when the reply it was raised for lands.
    pub loading: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            albums: Vec::new(),
            album_cursor: 0,
            track_cursor: 0,
            track_count: 0,
            focus: Pane::Tracks,
            shelf_open: true,
            loading: None,
        }
    }

    /// Install a freshly loaded album index, keeping the cursor in range.
    pub fn set_albums(&mut self, albums: Vec<Album>) {
        self.albums = albums;
        if self.album_cursor >= self.albums.len() {
            self.album_cursor = 0;
        }
    }

    /// Record the length of a newly installed catalog and rewind the
    /// track cursor, which pointed into the old one.
    pub fn set_track_count(&mut self, count: usize) {
        self.track_count = count;
        self.track_cursor = 0;
    }

    /// Album under the shelf cursor.
    pub fn selected_album(&self) -> Option<&Album> {
        self.albums.get(self.album_cursor)
    }

    /// Album entry matching the given folder name, if it is on the shelf.
    pub fn album_for_folder(&self, folder: &str) -> Option<&Album> {
        self.albums.iter().find(|album| album.folder == folder)
    }

    /// Move the cursor of the focused pane down, wrapping at the end.
    pub fn cursor_down(&mut self) {
        match self.focus {
            Pane::Shelf => {
                if !self.albums.is_empty() {
                    self.album_cursor = (self.album_cursor + 1) % self.albums.len();
                }
            }
            Pane::Tracks => {
                if self.track_count > 0 {
                    self.track_cursor = (self.track_cursor + 1) % self.track_count;
                }
            }
        }
    }

    /// Move the cursor of the focused pane up, wrapping at the top.
    pub fn cursor_up(&mut self) {
        match self.focus {
            Pane::Shelf => {
                if !self.albums.is_empty() {
                    self.album_cursor = self
                        .album_cursor
                        .checked_sub(1)
                        .unwrap_or(self.albums.len() - 1);
                }
            }
            Pane::Tracks => {
                if self.track_count > 0 {
                    self.track_cursor = self
                        .track_cursor
                        .checked_sub(1)
                        .unwrap_or(self.track_count - 1);
                }
            }
        }
    }

    /// Jump the focused cursor to the first entry.
    pub fn cursor_top(&mut self) {
        match self.focus {
            Pane::Shelf => self.album_cursor = 0,
            Pane::Tracks => self.track_cursor = 0,
        }
    }

    /// Jump the focused cursor to the last entry.
    pub fn cursor_bottom(&mut self) {
        match self.focus {
            Pane::Shelf => {
                if !self.albums.is_empty() {
                    self.album_cursor = self.albums.len() - 1;
                }
            }
            Pane::Tracks => {
                if self.track_count > 0 {
                    self.track_cursor = self.track_count - 1;
                }
            }
        }
    }

    /// Flip focus between the shelf and the tracks pane. Focus cannot
    /// land on a hidden shelf.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Shelf => Pane::Tracks,
            Pane::Tracks if self.shelf_open => Pane::Shelf,
            Pane::Tracks => Pane::Tracks,
        };
    }

    /// Show or hide the shelf panel. Hiding it pulls focus back to the
    /// tracks pane.
    pub fn toggle_shelf(&mut self) {
        self.shelf_open = !self.shelf_open;
        if !self.shelf_open {
            self.focus = Pane::Tracks;
        }
    }

    /// Hide the shelf panel if it is showing.
    pub fn close_shelf(&mut self) {
        if self.shelf_open {
            self.toggle_shelf();
        }
    }

    /// Mark a folder switch as in flight.
    pub fn mark_loading(&mut self, folder: &str) {
        self.loading = Some(folder.to_string());
    }

    /// Clear the in-flight marker once a catalog reply lands.
    pub fn clear_loading(&mut self) {
        self.loading = None;
    }

    pub fn has_albums(&self) -> bool {
        !self.albums.is_empty()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
