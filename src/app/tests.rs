use super::*;
use crate::shelf::Album;

fn album(folder: &str) -> Album {
    Album {
        folder: folder.into(),
        title: folder.to_uppercase(),
        description: String::new(),
    }
}

fn app_with_albums(folders: &[&str]) -> App {
    let mut app = App::new();
    app.set_albums(folders.iter().map(|f| album(f)).collect());
    app
}

#[test]
fn cursor_wraps_in_the_tracks_pane() {
    let mut app = App::new();
    app.set_track_count(3);

    app.cursor_down();
    app.cursor_down();
    assert_eq!(app.track_cursor, 2);
    app.cursor_down();
    assert_eq!(app.track_cursor, 0);

    app.cursor_up();
    assert_eq!(app.track_cursor, 2);
}

#[test]
fn cursor_wraps_in_the_shelf_pane() {
    let mut app = app_with_albums(&["a", "b"]);
    app.focus = Pane::Shelf;

    app.cursor_up();
    assert_eq!(app.album_cursor, 1);
    app.cursor_down();
    assert_eq!(app.album_cursor, 0);
}

#[test]
fn cursor_moves_are_inert_on_empty_panes() {
    let mut app = App::new();
    app.cursor_down();
    app.cursor_up();
    app.cursor_bottom();
    assert_eq!(app.track_cursor, 0);

    app.focus = Pane::Shelf;
    app.cursor_down();
    app.cursor_up();
    assert_eq!(app.album_cursor, 0);
}

#[test]
fn cursor_top_and_bottom_jump() {
    let mut app = App::new();
    app.set_track_count(5);
    app.cursor_bottom();
    assert_eq!(app.track_cursor, 4);
    app.cursor_top();
    assert_eq!(app.track_cursor, 0);
}

#[test]
fn new_catalog_rewinds_the_track_cursor() {
    let mut app = App::new();
    app.set_track_count(5);
    app.track_cursor = 4;

    app.set_track_count(2);
    assert_eq!(app.track_cursor, 0);
    assert_eq!(app.track_count, 2);
}

#[test]
fn set_albums_keeps_the_cursor_in_range() {
    let mut app = app_with_albums(&["a", "b", "c"]);
    app.album_cursor = 2;

    app.set_albums(vec![album("only")]);
    assert_eq!(app.album_cursor, 0);
    assert_eq!(app.selected_album().map(|a| a.folder.as_str()), Some("only"));
}

#[test]
fn album_for_folder_finds_by_folder_name() {
    let app = app_with_albums(&["love-mood", "focus"]);
    assert_eq!(
        app.album_for_folder("focus").map(|a| a.title.as_str()),
        Some("FOCUS")
    );
    assert!(app.album_for_folder("missing").is_none());
}

#[test]
fn focus_cannot_land_on_a_hidden_shelf() {
    let mut app = App::new();
    assert_eq!(app.focus, Pane::Tracks);

    app.toggle_focus();
    assert_eq!(app.focus, Pane::Shelf);

    app.toggle_focus();
    app.toggle_shelf();
    assert!(!app.shelf_open);
    app.toggle_focus();
    assert_eq!(app.focus, Pane::Tracks);
}

#[test]
fn hiding_the_shelf_pulls_focus_back() {
    let mut app = App::new();
    app.toggle_focus();
    assert_eq!(app.focus, Pane::Shelf);

    app.toggle_shelf();
    assert_eq!(app.focus, Pane::Tracks);

    app.close_shelf();
    assert!(!app.shelf_open);
    app.toggle_shelf();
    assert!(app.shelf_open);
}

#[test]
fn loading_marker_round_trips() {
    let mut app = App::new();
    assert!(app.loading.is_none());
    app.mark_loading("love-mood");
    assert_eq!(app.loading.as_deref(), Some("love-mood"));
    app.clear_loading();
    assert!(app.loading.is_none());
}
