//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Pane};
use crate::config::{ControlsSettings, UiSettings};
use crate::player::{PlaybackState, PlayerView};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("tab".to_string(), "switch pane".to_string());
    map.insert("a".to_string(), "toggle shelf".to_string());
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "open album / play song".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L and -/+ are filled dynamically from config.
    map.insert("m".to_string(), "mute".to_string());
    map.insert("r".to_string(), "reload shelf".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the configured steps.
fn controls_text(controls: &ControlsSettings) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "tab", "a", "j/k", "gg/G", "enter", "space/p", "h/l", "H/L", "-/+", "m", "r", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{}%", controls.seek_step_percent))
            } else if *k == "-/+" {
                Some(format!("[-/+] volume -/+{}%", controls.volume_step_percent))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Clip a list to a window around the cursor so the selection stays
/// centered when possible. Returns `(start, end, cursor_in_window)`.
fn visible_window(total: usize, height: usize, cursor: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, cursor);
    }
    let half = height / 2;
    let mut start = cursor.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, cursor - start)
}

fn pane_highlight(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    }
}

/// Render the album list. Descriptions ride along dimmed so the titles
/// stay scannable.
fn draw_shelf(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let total = app.albums.len();
    let (start, end, cursor_in_window) = visible_window(total, area.height as usize, app.album_cursor);

    let items: Vec<ListItem> = app.albums[start..end]
        .iter()
        .map(|album| {
            let mut spans = vec![Span::raw(album.title.as_str())];
            if !album.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", album.description),
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" shelf "))
        .highlight_style(pane_highlight(focused))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(cursor_in_window));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the track list for the open album. The loaded track carries a
/// marker independent of where the cursor sits.
fn draw_tracks(frame: &mut Frame, area: Rect, app: &App, view: &PlayerView, focused: bool) {
    let total = view.tracks.len();
    let (start, end, cursor_in_window) = visible_window(total, area.height as usize, app.track_cursor);

    let items: Vec<ListItem> = view.tracks[start..end]
        .iter()
        .enumerate()
        .map(|(offset, name)| {
            let marker = if Some(start + offset) == view.current {
                "▶ "
            } else {
                "  "
            };
            ListItem::new(format!("{marker}{name}"))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(pane_highlight(focused))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(cursor_in_window));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    view: &PlayerView,
    load_failed: bool,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" segno ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        let state_text = match view.state {
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Idle => "Stopped",
        };
        parts.push(state_text.to_string());

        if let Some(folder) = view.folder {
            let title = app
                .album_for_folder(folder)
                .map(|album| album.title.as_str())
                .unwrap_or(folder);
            parts.push(format!("Album: {}", title));
        }

        if let Some(name) = view.current.and_then(|i| view.tracks.get(i)) {
            parts.push(format!(
                "Song: {} [{} / {}]",
                name, view.progress.elapsed, view.progress.total
            ));
        }

        if view.muted {
            parts.push("Vol: MUTED".to_string());
        } else {
            parts.push(format!("Vol: {}%", view.volume_percent));
        }

        if load_failed && view.state != PlaybackState::Idle {
            parts.push("Load failed".to_string());
        }

        if let Some(folder) = &app.loading {
            parts.push(format!("Loading {}...", folder));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .slow_blink()
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main panes
    if app.shelf_open {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[2]);
        draw_shelf(frame, panes[0], app, app.focus == Pane::Shelf);
        draw_tracks(frame, panes[1], app, view, app.focus == Pane::Tracks);
    } else {
        draw_tracks(frame, chunks[2], app, view, app.focus == Pane::Tracks);
    }

    // Seek bar. Idle renders an empty bar with zeroed clocks.
    let seek = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" seek "))
        .gauge_style(Style::default().add_modifier(Modifier::REVERSED))
        .ratio(view.progress.fraction.clamp(0.0, 1.0))
        .label(format!(
            "{} / {}",
            view.progress.elapsed, view.progress.total
        ));
    frame.render_widget(seek, chunks[3]);

    let footer_text = controls_text(controls_settings);
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}
