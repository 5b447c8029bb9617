use std::io;

use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use log::warn;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::{AppStateRef, internal_error_with_log};

const PLAYLIST_CONTENT_TYPE: &str = "application/x-mpegurl";

pub async fn get_playlist(State(state): State<AppStateRef>) -> Result<Response, StatusCode> {
    let path = &state.config.output_path;
    let file = match File::open(path).await {
        Ok(v) => v,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Playlist {} not found", path.display());
            return Ok((StatusCode::NOT_FOUND, "File not found").into_response());
        }
        Err(e) => return Err(internal_error_with_log!("Open playlist")(e)),
    };

    let length = file
        .metadata()
        .await
        .map_err(internal_error_with_log!("Read playlist metadata"))?
        .len();
    let file_name = path
        .file_name()
        .and_then(|x| x.to_str())
        .unwrap_or("playlist.m3u");

    Ok((
        [
            (header::CONTENT_TYPE, PLAYLIST_CONTENT_TYPE.to_string()),
            (header::CONTENT_LENGTH, length.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}
