use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    qqmusic::QqMusic,
    server::start_api_server,
    success,
    types::{SongList, SongTableRow},
    warning,
};

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub async fn resolve(client: &QqMusic, link: &str, detailed: bool, json: bool) {
    let pb = spinner("Fetching playlist...");
    let result = client.discover(link, detailed).await;
    pb.finish_and_clear();

    let list = match result {
        Ok(list) => list,
        Err(e) => error!("Cannot resolve playlist. Err: {}", e),
    };

    if json {
        match serde_json::to_string_pretty(&list) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize playlist. Err: {}", e),
        }
        return;
    }

    print_song_list(&list);
}

fn print_song_list(list: &SongList) {
    let rows: Vec<SongTableRow> = list
        .songs
        .iter()
        .enumerate()
        .map(|(i, song)| SongTableRow {
            index: i + 1,
            song: song.clone(),
        })
        .collect();

    println!("{}", Table::new(rows));

    success!(
        "{}: {} of {} songs",
        list.name,
        list.songs.len(),
        list.songs_count
    );

    if list.songs.len() != list.songs_count as usize {
        warning!(
            "Provider declared {} songs but returned {}, the list may be truncated",
            list.songs_count,
            list.songs.len()
        );
    }
}

pub async fn playlist_id(client: &QqMusic, link: &str) {
    match client.resolve_id(link).await {
        Ok(tid) => println!("{}", tid),
        Err(e) => error!("Cannot resolve playlist id. Err: {}", e),
    }
}

pub async fn serve(client: QqMusic, addr: String) {
    info!("Serving playlist API on {}", addr);
    if let Err(e) = start_api_server(&addr, Arc::new(client)).await {
        error!("Server stopped. Err: {}", e);
    }
}
