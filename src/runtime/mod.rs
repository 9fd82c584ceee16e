use std::env;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::StreamPlayer;
use crate::mpris::ControlCmd;
use crate::player::Player;
use crate::shelf::{HttpFetcher, build_agent, open_shelf};

mod event_loop;
mod loader;
mod mpris_sync;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();

    // A shelf URL on the command line beats the configured one.
    if let Some(url) = env::args().nth(1) {
        settings.shelf.base_url = url;
    }

    let agent = build_agent(&settings.http);
    let source = open_shelf(agent.clone(), &settings.shelf);
    let shelf_url = source.shelf_url().to_string();
    info!("opening shelf at {shelf_url}");
    let loader = loader::LoaderHandle::spawn(source);
    loader.request_albums();

    let mut player = Player::new(StreamPlayer::new(HttpFetcher::new(agent)));
    player.set_volume(settings.playback.start_volume_percent);

    let mut app = App::new();
    app.shelf_open = settings.ui.shelf_open;

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::new();
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut player,
        &loader,
        &mpris,
        &shelf_url,
        &control_tx,
        &control_rx,
        &mut state,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
