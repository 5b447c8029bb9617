use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use axum::Router;
use clap::{Args, Parser, Subcommand};
use iptv_refresh::{AppState, AppStateRef, Config, load_config, pipeline, routes};
use log::{info, warn};
use playlist_declutter::PathRewrite;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path of the YAML configuration file
    #[arg(long, env = "IPTV_CONFIG_PATH", default_value = "config.yml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh once (unless disabled in the config), then serve the playlist
    Run,
    /// Serve the current playlist without refreshing first
    Serve,
    /// Refresh the playlist once and exit
    Refresh,
    /// Declutter a local playlist file
    Declutter {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        rewrite: RewriteArgs,
    },
}

#[derive(Args)]
struct RewriteArgs {
    /// Replacement for the first path segment after `/live/`
    #[arg(requires = "second")]
    first: Option<String>,
    /// Replacement for the second path segment after `/live/`
    #[arg(requires = "first")]
    second: Option<String>,
}

impl RewriteArgs {
    fn into_rewrite(self) -> Option<PathRewrite> {
        match (self.first, self.second) {
            (Some(first), Some(second)) => Some(PathRewrite::new(first, second)),
            _ => None,
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    if path.exists() {
        return load_config(path);
    }

    warn!("Config {} not found, using defaults", path.display());
    Ok(Config::default())
}

async fn build_app(app_state: &AppStateRef) -> Result<Router> {
    let root = Router::new().merge(routes::get_routes(app_state));

    Ok(root)
}

async fn refresh_once(app_state: &AppStateRef) -> Result<()> {
    let report = pipeline::refresh(app_state).await?;
    info!(
        "Playlist from {} written to {}",
        report.link,
        report.output.display()
    );
    Ok(())
}

async fn serve(app_state: AppStateRef) -> Result<()> {
    let tcp_listener = TcpListener::bind(&app_state.config.listen_addr).await?;
    info!(
        "Serving {} on http://{}",
        app_state.config.output_path.display(),
        tcp_listener.local_addr()?
    );

    axum::serve(tcp_listener, build_app(&app_state).await?)
        .with_graceful_shutdown(async {
            _ = tokio::signal::ctrl_c().await;
            info!("Shutting down server...");
        })
        .await?;

    Ok(())
}

fn declutter_file(config: &Config, input: &Path, output: &Path, rewrite: RewriteArgs) -> Result<()> {
    let mut declutter = config.declutter.build();
    if let Some(rewrite) = rewrite.into_rewrite() {
        declutter = declutter.with_rewrite(Some(rewrite));
    }

    let stats = declutter.process_file(input, output)?;
    info!(
        "Wrote {}: {} kept, {} filtered, {} rewritten",
        output.display(),
        stats.kept,
        stats.blacklisted,
        stats.rewritten
    );
    Ok(())
}

async fn app_entry(cli: Cli) -> Result<()> {
    let config = read_config(&cli.config)?;

    let command = match cli.command.unwrap_or(Command::Run) {
        Command::Declutter {
            input,
            output,
            rewrite,
        } => return declutter_file(&config, &input, &output, rewrite),
        command => command,
    };

    let app_state = Arc::new(AppState::new(config)?);
    match command {
        Command::Refresh => refresh_once(&app_state).await,
        Command::Serve => serve(app_state).await,
        _ => {
            if app_state.config.refresh_on_startup {
                if let Err(e) = refresh_once(&app_state).await {
                    warn!("Startup refresh failed, serving the previous playlist: {}", e);
                }
            }
            serve(app_state).await
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = app_entry(Cli::parse()).await {
        panic!("Fatal error: {}", e);
    }
}
