use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Pane};
use crate::audio::StreamPlayer;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlaybackState, Player};
use crate::runtime::loader::{LoaderEvent, LoaderHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::shelf::Album;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
    /// Set until the first album list arrives and one album is opened.
    startup_pending: bool,
    /// Last-known loaded index as emitted to MPRIS.
    last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            pending_gg: false,
            startup_pending: true,
            last_mpris_index: None,
            last_mpris_playback: PlaybackState::Idle,
        }
    }
}

/// Main terminal event loop: applies loader replies, handles input, draws
/// the UI and keeps MPRIS in sync. Returns `Ok(())` when shutdown is
/// requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<StreamPlayer>,
    loader: &LoaderHandle,
    mpris: &MprisHandle,
    shelf_url: &str,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Apply finished loader jobs before rendering.
        while let Some(event) = loader.try_event() {
            match event {
                LoaderEvent::Albums(albums) => {
                    app.set_albums(albums);
                    if state.startup_pending && app.has_albums() {
                        state.startup_pending = false;
                        let wanted = settings.shelf.startup_album.as_deref();
                        if let Some(folder) = startup_folder(&app.albums, wanted) {
                            if let Some(pos) =
                                app.albums.iter().position(|a| a.folder == folder)
                            {
                                app.album_cursor = pos;
                            }
                            select_album(app, player, loader, &folder, false);
                        }
                    }
                }
                LoaderEvent::Catalog {
                    token,
                    catalog,
                    autoplay,
                } => {
                    // A lost race leaves the loading marker up for the
                    // selection still in flight.
                    if player.finish_select(token, catalog) {
                        app.clear_loading();
                        let count = player.catalog().map_or(0, |catalog| catalog.len());
                        app.set_track_count(count);
                        if count > 0 {
                            player.load(0, autoplay);
                        }
                        push_mpris(state, mpris, app, player, shelf_url);
                    }
                }
            }
        }

        // A drained sink means the track ran out; show that as paused.
        player.sync_from_media();

        // Catch changes that came from media keys or from the track ending.
        if player.index() != state.last_mpris_index
            || player.state() != state.last_mpris_playback
        {
            push_mpris(state, mpris, app, player, shelf_url);
        }

        {
            let view = player.view();
            let load_failed = player.media().load_failed();
            terminal.draw(|f| {
                ui::draw(f, app, &view, load_failed, &settings.ui, &settings.controls)
            })?;
        }

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, loader, control_tx, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Resolve which album to open on startup: the configured one when it
/// exists on the shelf, otherwise the first.
fn startup_folder(albums: &[Album], wanted: Option<&str>) -> Option<String> {
    if let Some(wanted) = wanted {
        if let Some(album) = albums
            .iter()
            .find(|a| a.folder == wanted || a.title == wanted)
        {
            return Some(album.folder.clone());
        }
        warn!("startup album {wanted:?} is not on the shelf, opening the first one");
    }
    albums.first().map(|a| a.folder.clone())
}

/// Kick off an album switch: flag the UI, invalidate older selections and
/// hand the fetch to the loader.
fn select_album(
    app: &mut App,
    player: &mut Player<StreamPlayer>,
    loader: &LoaderHandle,
    folder: &str,
    autoplay: bool,
) {
    app.mark_loading(folder);
    let token = player.begin_select();
    loader.request_catalog(folder, token, autoplay);
}

fn push_mpris(
    state: &mut EventLoopState,
    mpris: &MprisHandle,
    app: &App,
    player: &Player<StreamPlayer>,
    shelf_url: &str,
) {
    update_mpris(mpris, app, player, shelf_url);
    state.last_mpris_index = player.index();
    state.last_mpris_playback = player.state();
}

fn handle_control_cmd(cmd: ControlCmd, app: &App, player: &mut Player<StreamPlayer>) -> bool {
    match cmd {
        ControlCmd::Quit => {
            player.media().quit();
            return true;
        }
        ControlCmd::Play => match player.state() {
            PlaybackState::Paused => player.toggle_play_pause(),
            PlaybackState::Idle => {
                if app.track_count > 0 {
                    player.load(app.track_cursor, true);
                }
            }
            PlaybackState::Playing => {}
        },
        ControlCmd::Pause => {
            if player.state() == PlaybackState::Playing {
                player.toggle_play_pause();
            }
        }
        ControlCmd::PlayPause => match player.state() {
            PlaybackState::Idle => {
                if app.track_count > 0 {
                    player.load(app.track_cursor, true);
                }
            }
            PlaybackState::Playing | PlaybackState::Paused => player.toggle_play_pause(),
        },
        ControlCmd::Next => player.next(),
        ControlCmd::Prev => player.previous(),
    }

    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<StreamPlayer>,
    loader: &LoaderHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            player.media().quit();
            return true;
        }
        KeyCode::Tab => {
            state.pending_gg = false;
            app.toggle_focus();
        }
        KeyCode::Char('a') => {
            state.pending_gg = false;
            app.toggle_shelf();
        }
        KeyCode::Esc => {
            state.pending_gg = false;
            app.close_shelf();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.cursor_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.cursor_up();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.cursor_bottom();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            match app.focus {
                Pane::Shelf => {
                    let folder = app.selected_album().map(|album| album.folder.clone());
                    if let Some(folder) = folder {
                        select_album(app, player, loader, &folder, true);
                    }
                }
                Pane::Tracks => {
                    if app.track_count > 0 {
                        player.load(app.track_cursor, true);
                    }
                }
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            let step = f64::from(settings.controls.seek_step_percent) / 100.0;
            let at = player.progress().fraction;
            player.seek(at + step);
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            let step = f64::from(settings.controls.seek_step_percent) / 100.0;
            let at = player.progress().fraction;
            player.seek(at - step);
        }
        KeyCode::Char('-') => {
            state.pending_gg = false;
            let step = settings.controls.volume_step_percent;
            player.set_volume(player.volume_percent().saturating_sub(step));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            let step = settings.controls.volume_step_percent;
            player.set_volume(player.volume_percent().saturating_add(step));
        }
        KeyCode::Char('m') => {
            state.pending_gg = false;
            player.toggle_mute();
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            loader.request_albums();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}
