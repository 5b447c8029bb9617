use std::{sync::Arc, time::Duration};

use anyhow::Result;
use log::info;
use playlist_declutter::Declutter;
use reqwest::{Client, Proxy};
use tokio::sync::Mutex;

use crate::{
    Config,
    pipeline::{Downloader, LinkExtractor, Retention},
};

pub type AppStateRef = Arc<AppState>;
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: Client,
    pub declutter: Arc<Declutter>,
    pub link_extractor: Arc<LinkExtractor>,
    pub downloader: Downloader,
    pub download_retention: Arc<Retention>,
    /// Held for the whole refresh, only one may run at a time
    pub refresh_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs.unwrap_or(30))); // 30s

        if let Some(user_agent) = &config.http.user_agent {
            builder = builder.user_agent(user_agent)
        }

        if let Some(proxy) = &config.http.proxy {
            info!("With proxy: {}", proxy);
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        Self::with_http_client(config, builder.build()?)
    }

    pub fn with_http_client(config: Config, http_client: Client) -> Result<Self> {
        let link_extractor = LinkExtractor::from_config(&config.logs)?;
        let download_retention = Retention::new(
            &config.download.directory,
            &config.download.pattern,
            config.download.keep,
        )?;
        let downloader = Downloader::new(
            http_client.clone(),
            &config.download.directory,
            config.download.overwrite,
        );

        let declutter = config.declutter.build();
        info!(
            "Blacklisting {} group patterns",
            declutter.blacklist().patterns().len()
        );

        Ok(Self {
            declutter: Arc::new(declutter),
            config: Arc::new(config),
            http_client,
            link_extractor: Arc::new(link_extractor),
            downloader,
            download_retention: Arc::new(download_retention),
            refresh_lock: Mutex::new(()),
        })
    }
}
