use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{AppStateRef, internal_error_with_log, not_found_with_log, pipeline::refresh};

pub async fn get_refresh(State(state): State<AppStateRef>) -> Result<Response, StatusCode> {
    match refresh(&state).await {
        Ok(_) => Ok((
            [(header::CONTENT_TYPE, "text/plain")],
            "Refreshed the file!",
        )
            .into_response()),
        Err(e) if e.is_link_not_found() => Err(not_found_with_log!("Refresh")(e)),
        Err(e) => Err(internal_error_with_log!("Refresh")(e)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode};
    use tempfile::tempdir;

    use crate::{AppState, Config, LogsConfig, routes::get_refresh};

    #[tokio::test]
    async fn test_refresh_without_link() {
        let root = tempdir().unwrap();
        let state = Arc::new(
            AppState::new(Config {
                output_path: root.path().join("output.m3u"),
                logs: LogsConfig {
                    directory: Some(root.path().to_path_buf()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .unwrap(),
        );

        let status = get_refresh(State(state)).await.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
