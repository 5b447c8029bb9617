use std::path::PathBuf;

use log::info;
use playlist_declutter::DeclutterStats;
use tokio::task::spawn_blocking;

use crate::{AppStateRef, RefreshError};

mod automation;
mod download;
mod logs;
mod retention;
pub use automation::*;
pub use download::*;
pub use logs::*;
pub use retention::*;

#[derive(Debug)]
pub struct RefreshReport {
    pub link: String,
    pub downloaded: PathBuf,
    pub output: PathBuf,
    pub stats: DeclutterStats,
}

/// Run the whole chain: automation, link lookup, download, cleanup, declutter.
///
/// Concurrent calls are serialized, the output file is replaced atomically so it
/// can be served while a refresh is running.
pub async fn refresh(state: &AppStateRef) -> Result<RefreshReport, RefreshError> {
    let _guard = state.refresh_lock.lock().await;

    if let Some(automation) = &state.config.automation {
        run_automation(automation).await;
    }

    let extractor = state.link_extractor.clone();
    let link = spawn_blocking(move || extractor.extract()).await??;
    info!("Got the m3u link: {}", link);

    let downloaded = state.downloader.download(&link).await?;

    let retention = state.download_retention.clone();
    let removed = spawn_blocking(move || retention.prune()).await?;
    if removed > 0 {
        info!("Removed {} old downloads", removed);
    }

    let declutter = state.declutter.clone();
    let input = downloaded.clone();
    let output = state.config.output_path.clone();
    let stats = spawn_blocking(move || declutter.process_file(input, output)).await??;
    info!(
        "Decluttered {}: {} kept, {} filtered, {} rewritten, {} dangling, {} locators left as-is",
        downloaded.display(),
        stats.kept,
        stats.blacklisted,
        stats.rewritten,
        stats.dangling,
        stats.not_rewritten
    );

    Ok(RefreshReport {
        link,
        downloaded,
        output: state.config.output_path.clone(),
        stats,
    })
}
