use std::io;

use playlist_declutter::DeclutterError;
use thiserror::Error;
use tokio::task::JoinError;

use crate::pipeline::DownloadError;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("No m3u link found in {0}")]
    LinkNotFound(String),

    #[error("Failed to scan logs: {0}")]
    LogScan(#[source] io::Error),

    #[error("Invalid link pattern: {0}")]
    LinkPattern(#[from] regex::Error),

    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("Declutter failed: {0}")]
    Declutter(#[from] DeclutterError),

    #[error("Background task failed: {0}")]
    Join(#[from] JoinError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RefreshError {
    pub fn is_link_not_found(&self) -> bool {
        matches!(self, Self::LinkNotFound(_))
    }
}

// From lcsm-server project
#[macro_export]
macro_rules! something_with_error_log {
    ($status_code:expr) => {
        |e| {
            use log::error;

            error!("{}", e);
            $status_code
        }
    };

    ($position:expr, $status_code:expr) => {
        |e| {
            use log::error;

            error!("{}: {}", $position, e);
            $status_code
        }
    };
}

#[macro_export]
macro_rules! internal_error_with_log {
    () => {{
        use axum::http::StatusCode;
        $crate::something_with_error_log!(StatusCode::INTERNAL_SERVER_ERROR)
    }};

    ($msg:expr) => {{
        use axum::http::StatusCode;
        $crate::something_with_error_log!($msg, StatusCode::INTERNAL_SERVER_ERROR)
    }};
}

#[macro_export]
macro_rules! not_found_with_log {
    () => {{
        use axum::http::StatusCode;
        $crate::something_with_error_log!(StatusCode::NOT_FOUND)
    }};

    ($msg:expr) => {{
        use axum::http::StatusCode;
        $crate::something_with_error_log!($msg, StatusCode::NOT_FOUND)
    }};
}

pub use internal_error_with_log;
pub use not_found_with_log;
pub use something_with_error_log;
