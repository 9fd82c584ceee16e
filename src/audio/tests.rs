use std::time::{Duration, Instant};

use super::types::PlaybackSnapshot;

#[test]
fn position_is_frozen_until_the_clock_starts() {
    let mut snap = PlaybackSnapshot::default();
    snap.mark_loading(true);

    // Playing flag is up while the fetch is in flight, but with no
    // resume instant the position must stay at zero.
    let now = Instant::now();
    assert!(snap.playing);
    assert_eq!(snap.position_at(now), Duration::ZERO);
}

#[test]
fn position_extrapolates_while_playing() {
    let start = Instant::now();
    let snap = PlaybackSnapshot {
        playing: true,
        base_elapsed: Duration::from_secs(10),
        resumed_at: Some(start),
        duration: Some(Duration::from_secs(100)),
        failed: false,
    };
    assert_eq!(
        snap.position_at(start + Duration::from_secs(5)),
        Duration::from_secs(15)
    );
}

#[test]
fn position_clamps_at_known_duration() {
    let start = Instant::now();
    let snap = PlaybackSnapshot {
        playing: true,
        base_elapsed: Duration::from_secs(90),
        resumed_at: Some(start),
        duration: Some(Duration::from_secs(100)),
        failed: false,
    };
    assert_eq!(
        snap.position_at(start + Duration::from_secs(60)),
        Duration::from_secs(100)
    );
}

#[test]
fn pause_folds_running_time_and_is_idempotent() {
    let start = Instant::now();
    let mut snap = PlaybackSnapshot {
        playing: true,
        base_elapsed: Duration::from_secs(10),
        resumed_at: Some(start),
        duration: None,
        failed: false,
    };

    snap.mark_paused(start + Duration::from_secs(5));
    assert!(!snap.playing);
    assert_eq!(snap.base_elapsed, Duration::from_secs(15));

    // Command side and worker both mark; the second call must not fold
    // the running time twice.
    snap.mark_paused(start + Duration::from_secs(9));
    assert_eq!(snap.base_elapsed, Duration::from_secs(15));
}

#[test]
fn resume_keeps_the_original_start_instant() {
    let start = Instant::now();
    let mut snap = PlaybackSnapshot::default();

    snap.mark_playing(start);
    snap.mark_playing(start + Duration::from_secs(3));

    assert_eq!(snap.resumed_at, Some(start));
    assert_eq!(
        snap.position_at(start + Duration::from_secs(4)),
        Duration::from_secs(4)
    );
}

#[test]
fn seek_moves_the_clock_and_keeps_the_play_flag() {
    let start = Instant::now();
    let mut snap = PlaybackSnapshot {
        playing: true,
        base_elapsed: Duration::from_secs(10),
        resumed_at: Some(start),
        duration: Some(Duration::from_secs(100)),
        failed: false,
    };

    let now = start + Duration::from_secs(2);
    snap.mark_seeked(Duration::from_secs(40), now);
    assert!(snap.playing);
    assert_eq!(snap.position_at(now), Duration::from_secs(40));

    snap.mark_paused(now);
    snap.mark_seeked(Duration::from_secs(70), now);
    assert!(!snap.playing);
    assert_eq!(snap.resumed_at, None);
    assert_eq!(snap.position_at(now + Duration::from_secs(9)), Duration::from_secs(70));
}

#[test]
fn failed_load_leaves_a_dead_clock() {
    let mut snap = PlaybackSnapshot {
        playing: true,
        base_elapsed: Duration::from_secs(33),
        resumed_at: Some(Instant::now()),
        duration: Some(Duration::from_secs(100)),
        failed: false,
    };

    snap.mark_failed();
    assert!(snap.failed);
    assert!(!snap.playing);
    assert_eq!(snap.duration, None);
    assert_eq!(snap.position_at(Instant::now()), Duration::ZERO);
}
