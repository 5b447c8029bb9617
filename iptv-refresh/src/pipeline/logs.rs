use std::fs;

use log::{debug, info};
use regex::Regex;

use crate::{LogsConfig, RefreshError, pipeline::Retention};

/// Finds the playlist link printed by the browser automation
pub struct LinkExtractor {
    retention: Retention,
    link_regex: Regex,
}

impl LinkExtractor {
    pub fn new(retention: Retention, link_pattern: impl AsRef<str>) -> Result<Self, RefreshError> {
        Ok(Self {
            retention,
            link_regex: Regex::new(link_pattern.as_ref())?,
        })
    }

    pub fn from_config(config: &LogsConfig) -> Result<Self, RefreshError> {
        let retention = Retention::new(config.directory()?, &config.pattern, config.keep.max(1))?;
        Self::new(retention, &config.link_pattern)
    }

    /// First capture group of the link pattern, or the whole match
    pub fn find_link(&self, content: &str) -> Option<String> {
        self.link_regex
            .captures(content)
            .and_then(|x| x.get(1).or_else(|| x.get(0)))
            .map(|x| x.as_str().to_owned())
    }

    /// Read the newest log, then prune the older ones
    pub fn extract(&self) -> Result<String, RefreshError> {
        let not_found = || RefreshError::LinkNotFound(self.retention.directory().display().to_string());

        let files = self.retention.newest_first().map_err(RefreshError::LogScan)?;
        let latest = files.first().ok_or_else(not_found)?;
        debug!("Reading logs from {}", latest.display());

        let content = fs::read(latest).map_err(RefreshError::LogScan)?;
        let link = self.find_link(&String::from_utf8_lossy(&content));

        let removed = self.retention.prune();
        if removed > 0 {
            info!("Removed {} old log files", removed);
        }

        link.ok_or_else(not_found)
    }
}
