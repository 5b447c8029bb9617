use axum::{Router, routing::get};

use crate::AppStateRef;

mod playlist;
mod refresh;
pub use playlist::*;
pub use refresh::*;

pub fn get_routes(app_state: &AppStateRef) -> Router {
    Router::new()
        .route("/refresh", get(refresh::get_refresh))
        .route("/", get(playlist::get_playlist))
        .route("/{*path}", get(playlist::get_playlist))
        .with_state(app_state.clone())
}
