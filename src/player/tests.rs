use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::*;
use crate::shelf::Catalog;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetSource { url: String, autoplay: bool },
    Play,
    Pause,
    SeekTo(Duration),
    SetVolume(f32),
}

/// Records every call and mimics the handle's clock bookkeeping. Clones
/// share state, so tests keep one handle for inspection while the
/// player owns the other.
#[derive(Clone, Default)]
struct FakeMedia {
    calls: Rc<RefCell<Vec<Call>>>,
    playing: Rc<RefCell<bool>>,
    position: Rc<RefCell<Duration>>,
    duration: Rc<RefCell<Option<Duration>>>,
    gain: Rc<RefCell<f32>>,
}

impl FakeMedia {
    fn with_duration(seconds: u64) -> Self {
        let media = Self::default();
        *media.duration.borrow_mut() = Some(Duration::from_secs(seconds));
        media
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn gain(&self) -> f32 {
        *self.gain.borrow()
    }

    fn set_playing(&self, playing: bool) {
        *self.playing.borrow_mut() = playing;
    }

    fn set_position(&self, seconds: u64) {
        *self.position.borrow_mut() = Duration::from_secs(seconds);
    }

    fn last_seek(&self) -> Option<Duration> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            Call::SeekTo(position) => Some(*position),
            _ => None,
        })
    }
}

impl MediaHandle for FakeMedia {
    fn set_source(&mut self, url: &str, autoplay: bool) {
        self.calls.borrow_mut().push(Call::SetSource {
            url: url.to_string(),
            autoplay,
        });
        *self.playing.borrow_mut() = autoplay;
        *self.position.borrow_mut() = Duration::ZERO;
    }

    fn play(&mut self) {
        self.calls.borrow_mut().push(Call::Play);
        *self.playing.borrow_mut() = true;
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push(Call::Pause);
        *self.playing.borrow_mut() = false;
    }

    fn seek_to(&mut self, position: Duration) {
        self.calls.borrow_mut().push(Call::SeekTo(position));
        *self.position.borrow_mut() = position;
    }

    fn set_volume(&mut self, gain: f32) {
        self.calls.borrow_mut().push(Call::SetVolume(gain));
        *self.gain.borrow_mut() = gain;
    }

    fn is_playing(&self) -> bool {
        *self.playing.borrow()
    }

    fn position(&self) -> Duration {
        *self.position.borrow()
    }

    fn duration(&self) -> Option<Duration> {
        *self.duration.borrow()
    }
}

fn catalog(tracks: &[&str]) -> Catalog {
    Catalog::new(
        "love-mood",
        "http://127.0.0.1:8000/songs/love-mood",
        tracks.iter().map(|track| track.to_string()).collect(),
    )
}

fn loaded_player(tracks: &[&str]) -> (Player<FakeMedia>, FakeMedia) {
    let media = FakeMedia::with_duration(200);
    let mut player = Player::new(media.clone());
    let token = player.begin_select();
    assert!(player.finish_select(token, catalog(tracks)));
    media.clear();
    (player, media)
}

#[test]
fn fresh_catalog_points_at_first_track_idle() {
    let (player, _media) = loaded_player(&["one.mp3", "two.mp3"]);
    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(player.index(), Some(0));
    assert_eq!(player.current_track(), Some("one.mp3"));
}

#[test]
fn empty_catalog_strands_the_transport() {
    let (mut player, media) = loaded_player(&[]);
    assert_eq!(player.index(), None);
    assert_eq!(player.current_track(), None);

    player.load(0, true);
    player.toggle_play_pause();
    player.next();
    player.previous();

    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(media.calls().is_empty());
}

#[test]
fn load_sets_source_state_and_resets_clock() {
    let (mut player, media) = loaded_player(&["my song.mp3", "two.mp3"]);

    player.load(0, false);
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(
        media.calls(),
        vec![Call::SetSource {
            url: "http://127.0.0.1:8000/songs/love-mood/my%20song.mp3".into(),
            autoplay: false,
        }]
    );

    media.set_position(50);
    player.load(1, true);
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.index(), Some(1));
    assert_eq!(player.progress().elapsed, "00:00");
}

#[test]
fn load_out_of_range_is_a_noop() {
    let (mut player, media) = loaded_player(&["one.mp3"]);
    player.load(1, true);
    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(player.index(), Some(0));
    assert!(media.calls().is_empty());
}

#[test]
fn toggle_play_pause_only_works_loaded() {
    let (mut player, media) = loaded_player(&["one.mp3"]);

    // Idle: inert.
    player.toggle_play_pause();
    assert!(media.calls().is_empty());

    player.load(0, false);
    player.toggle_play_pause();
    assert_eq!(player.state(), PlaybackState::Playing);
    player.toggle_play_pause();
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(
        media.calls()[1..],
        [Call::Play, Call::Pause]
    );
}

#[test]
fn next_advances_and_autoplays() {
    let (mut player, media) = loaded_player(&["one.mp3", "two.mp3"]);
    player.load(0, false);
    media.clear();

    player.next();
    assert_eq!(player.index(), Some(1));
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(
        media.calls(),
        vec![
            Call::Pause,
            Call::SetSource {
                url: "http://127.0.0.1:8000/songs/love-mood/two.mp3".into(),
                autoplay: true,
            },
        ]
    );
}

#[test]
fn next_at_the_end_changes_nothing() {
    let (mut player, media) = loaded_player(&["one.mp3", "two.mp3"]);
    player.load(1, false);
    media.clear();

    player.next();
    assert_eq!(player.index(), Some(1));
    assert_eq!(player.state(), PlaybackState::Paused);
    assert!(media.calls().is_empty());
}

#[test]
fn previous_steps_back_and_stops_at_zero() {
    let (mut player, media) = loaded_player(&["one.mp3", "two.mp3"]);
    player.load(1, true);
    media.clear();

    player.previous();
    assert_eq!(player.index(), Some(0));
    assert_eq!(player.state(), PlaybackState::Playing);

    media.clear();
    player.previous();
    assert_eq!(player.index(), Some(0));
    assert_eq!(player.state(), PlaybackState::Playing);
    assert!(media.calls().is_empty());
}

#[test]
fn seek_maps_fraction_onto_duration() {
    let (mut player, media) = loaded_player(&["one.mp3"]);
    player.load(0, false);

    player.seek(0.25);
    assert_eq!(media.last_seek(), Some(Duration::from_secs(50)));

    player.seek(1.5);
    assert_eq!(media.last_seek(), Some(Duration::from_secs(200)));

    player.seek(-1.0);
    assert_eq!(media.last_seek(), Some(Duration::ZERO));
}

#[test]
fn seek_without_duration_is_a_noop() {
    let media = FakeMedia::default();
    let mut player = Player::new(media.clone());
    let token = player.begin_select();
    assert!(player.finish_select(token, catalog(&["one.mp3"])));
    player.load(0, true);
    media.clear();

    player.seek(0.5);
    assert!(media.calls().is_empty());
}

#[test]
fn seek_while_idle_is_a_noop() {
    let (mut player, media) = loaded_player(&["one.mp3"]);
    player.seek(0.5);
    assert!(media.calls().is_empty());
}

#[test]
fn unmute_restores_fixed_ten_percent() {
    let (mut player, media) = loaded_player(&["one.mp3"]);

    player.set_volume(0);
    player.toggle_mute();
    assert!(player.is_muted());
    player.toggle_mute();
    assert!(!player.is_muted());
    assert_eq!(player.volume_percent(), 10);
    assert_eq!(media.gain(), UNMUTE_GAIN);
}

#[test]
fn set_volume_clamps_and_keeps_mute_flag() {
    let (mut player, media) = loaded_player(&["one.mp3"]);

    player.set_volume(150);
    assert_eq!(player.volume_percent(), 100);

    player.toggle_mute();
    player.set_volume(50);
    assert!(player.is_muted());
    assert_eq!(media.gain(), 0.5);

    // The stored level does not survive the unmute; 10% does.
    player.toggle_mute();
    assert_eq!(player.volume_percent(), 10);
}

#[test]
fn stale_selection_reply_is_discarded() {
    let media = FakeMedia::with_duration(200);
    let mut player = Player::new(media.clone());

    let first = player.begin_select();
    let second = player.begin_select();

    assert!(!player.finish_select(first, catalog(&["stale.mp3"])));
    assert!(player.catalog().is_none());

    assert!(player.finish_select(second, catalog(&["live.mp3"])));
    assert_eq!(player.current_track(), Some("live.mp3"));
}

#[test]
fn late_stale_reply_cannot_clobber_the_winner() {
    let media = FakeMedia::with_duration(200);
    let mut player = Player::new(media.clone());

    let first = player.begin_select();
    let second = player.begin_select();

    assert!(player.finish_select(second, catalog(&["live.mp3"])));
    player.load(0, true);

    assert!(!player.finish_select(first, catalog(&["stale.mp3"])));
    assert_eq!(player.current_track(), Some("live.mp3"));
    assert_eq!(player.state(), PlaybackState::Playing);
}

#[test]
fn ended_track_downgrades_to_paused_without_advancing() {
    let (mut player, media) = loaded_player(&["one.mp3", "two.mp3"]);
    player.load(0, true);
    assert_eq!(player.state(), PlaybackState::Playing);

    media.set_playing(false);
    player.sync_from_media();
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.index(), Some(0));

    player.sync_from_media();
    assert_eq!(player.state(), PlaybackState::Paused);
}

#[test]
fn progress_derives_from_the_handle() {
    let (mut player, media) = loaded_player(&["one.mp3"]);

    // Idle renders zeros regardless of the handle.
    media.set_position(50);
    let idle = player.progress();
    assert_eq!(idle.elapsed, "00:00");
    assert_eq!(idle.fraction, 0.0);

    player.load(0, true);
    media.set_position(50);
    let progress = player.progress();
    assert_eq!(progress.elapsed, "00:50");
    assert_eq!(progress.total, "03:20");
    assert_eq!(progress.fraction, 0.25);
}

#[test]
fn startup_flow_loads_first_track_paused() {
    let (mut player, _media) = loaded_player(&["one.mp3", "two.mp3"]);
    player.load(0, false);

    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.current_track(), Some("one.mp3"));
    assert_eq!(player.progress().elapsed, "00:00");

    let view = player.view();
    assert_eq!(view.tracks.len(), 2);
    assert_eq!(view.current, Some(0));
    assert_eq!(view.folder, Some("love-mood"));
}
