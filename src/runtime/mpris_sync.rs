use crate::app::App;
use crate::mpris::{MprisHandle, NowPlaying};
use crate::player::{MediaHandle, Player};

/// Push the loaded track and transport state out to the MPRIS service.
pub fn update_mpris<M: MediaHandle>(
    mpris: &MprisHandle,
    app: &App,
    player: &Player<M>,
    shelf_url: &str,
) {
    let now_playing = match (player.catalog(), player.index()) {
        (Some(catalog), Some(index)) => {
            let album = app.album_for_folder(&catalog.folder);
            NowPlaying {
                index: Some(index),
                title: catalog.track(index).map(str::to_string),
                album: album
                    .map(|a| a.title.clone())
                    .or_else(|| Some(catalog.folder.clone())),
                art_url: album.map(|a| a.cover_url(shelf_url)),
                length: player.media().duration(),
            }
        }
        _ => NowPlaying::default(),
    };

    mpris.set_now_playing(now_playing);
    mpris.set_playback(player.state());
}
