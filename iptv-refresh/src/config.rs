use std::{fs::File, path::Path, path::PathBuf};

use anyhow::{Result, bail};
use playlist_declutter::{DEFAULT_BLACKLIST, Declutter, GroupBlacklist, PathRewrite};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_true")]
    pub refresh_on_startup: bool,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub automation: Option<AutomationConfig>,
    #[serde(default)]
    pub declutter: DeclutterConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsConfig {
    /// Defaults to `~/Downloads`
    pub directory: Option<PathBuf>,
    #[serde(default = "default_logs_pattern")]
    pub pattern: String,
    #[serde(default = "default_keep")]
    pub keep: usize,
    #[serde(default = "default_link_pattern")]
    pub link_pattern: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadConfig {
    #[serde(default = "default_download_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_download_pattern")]
    pub pattern: String,
    #[serde(default = "default_keep")]
    pub keep: usize,
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    pub user_agent: Option<String>,
    pub proxy: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclutterConfig {
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,
    pub rewrite: Option<RewriteConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteConfig {
    pub first: String,
    pub second: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8123".into()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("outputs").join("output.m3u")
}

fn default_true() -> bool {
    true
}

fn default_keep() -> usize {
    1
}

fn default_logs_pattern() -> String {
    "iptvlogs*.txt".into()
}

fn default_link_pattern() -> String {
    r"\[echo\] m3uLink = (http[^\s]+)".into()
}

fn default_download_directory() -> PathBuf {
    PathBuf::from("my_downloads")
}

fn default_download_pattern() -> String {
    "tv_channels_*.m3u".into()
}

fn default_blacklist() -> Vec<String> {
    DEFAULT_BLACKLIST.iter().map(|x| x.to_string()).collect()
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            directory: None,
            pattern: default_logs_pattern(),
            keep: default_keep(),
            link_pattern: default_link_pattern(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: default_download_directory(),
            pattern: default_download_pattern(),
            keep: default_keep(),
            overwrite: false,
        }
    }
}

impl Default for DeclutterConfig {
    fn default() -> Self {
        Self {
            blacklist: default_blacklist(),
            rewrite: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            output_path: default_output_path(),
            refresh_on_startup: true,
            logs: LogsConfig::default(),
            download: DownloadConfig::default(),
            http: HttpConfig::default(),
            automation: None,
            declutter: DeclutterConfig::default(),
        }
    }
}

impl LogsConfig {
    pub fn directory(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(directory) => Ok(directory.clone()),
            None => match dirs::home_dir() {
                Some(home) => Ok(home.join("Downloads")),
                None => bail!("Home directory not found, set logs.directory"),
            },
        }
    }
}

impl DeclutterConfig {
    pub fn build(&self) -> Declutter {
        Declutter::new(GroupBlacklist::new(&self.blacklist)).with_rewrite(
            self.rewrite
                .as_ref()
                .map(|x| PathRewrite::new(x.first.as_str(), x.second.as_str())),
        )
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let file = File::open(path.as_ref())?;
    let config: Config = serde_yaml::from_reader(file)?;
    Ok(config)
}
