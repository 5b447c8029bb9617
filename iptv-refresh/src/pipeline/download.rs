use std::{
    io,
    path::{Path, PathBuf},
};

use futures::StreamExt;
use log::{debug, info};
use reqwest::{Client, Response, header};
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use url::Url;

const FALLBACK_FILE_NAME: &str = "downloaded_file";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    RequestError(#[from] reqwest::Error),

    #[error("Server respond with status code {0}")]
    RequestNotSuccess(u16),

    #[error("File I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Keep only the last path component so a header cannot escape the download directory
fn sanitize_file_name(name: &str) -> Option<String> {
    Path::new(name.trim())
        .file_name()
        .and_then(|x| x.to_str())
        .filter(|x| !x.is_empty())
        .map(|x| x.to_owned())
}

/// Name from `Content-Disposition`, then from the URL path, then a fixed fallback
pub fn resolve_file_name(origin: &str, content_disposition: Option<&str>) -> String {
    let from_header = content_disposition
        .and_then(|x| x.split_once("filename="))
        .map(|(_, x)| x.split(';').next().unwrap_or(x))
        .map(|x| x.trim_matches(|c| c == '"' || c == '\'' || c == ' '))
        .and_then(sanitize_file_name);

    from_header
        .or_else(|| {
            Url::parse(origin)
                .ok()
                .and_then(|x| x.path_segments()?.last().map(|x| x.to_owned()))
                .and_then(|x| sanitize_file_name(&x))
        })
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_owned())
}

pub struct Downloader {
    http_client: Client,
    directory: PathBuf,
    overwrite: bool,
}

impl Downloader {
    pub fn new(http_client: Client, directory: impl Into<PathBuf>, overwrite: bool) -> Self {
        Downloader {
            http_client,
            directory: directory.into(),
            overwrite,
        }
    }

    /// Download `origin` into the download directory and return the saved path
    pub async fn download(&self, origin: impl AsRef<str>) -> Result<PathBuf, DownloadError> {
        let origin = origin.as_ref();
        fs::create_dir_all(&self.directory).await?;

        let response = self.http_client.get(origin).send().await?;
        if !response.status().is_success() {
            return Err(DownloadError::RequestNotSuccess(response.status().as_u16()));
        }

        let file_name = resolve_file_name(
            origin,
            response
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .and_then(|x| x.to_str().ok()),
        );
        let save_path = self.directory.join(&file_name);

        if !self.overwrite && fs::try_exists(&save_path).await? {
            info!(
                "File {} already exists, skipping download",
                save_path.display()
            );
            return Ok(save_path);
        }

        let part_path = self.directory.join(format!("{}.part", file_name));
        match Self::write_body(response, &part_path).await {
            Ok(size) => {
                fs::rename(&part_path, &save_path).await?;
                info!("Downloaded {} bytes to {}", size, save_path.display());
                Ok(save_path)
            }
            Err(e) => {
                _ = fs::remove_file(&part_path).await;
                Err(e)
            }
        }
    }

    async fn write_body(response: Response, path: &Path) -> Result<u64, DownloadError> {
        let total_size = response.content_length();
        let mut file = fs::File::create(path).await?;
        let mut stream = response.bytes_stream();

        let mut downloaded_size = 0u64;
        let mut reported_percent = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded_size += chunk.len() as u64;

            if let Some(total_size) = total_size.filter(|x| *x > 0) {
                let percent = downloaded_size * 100 / total_size;
                if percent >= reported_percent + 10 {
                    debug!(
                        "Downloading {}: {}% ({:.2}KB / {:.2}KB)",
                        path.display(),
                        percent,
                        downloaded_size as f64 / 1024.0,
                        total_size as f64 / 1024.0
                    );
                    reported_percent = percent;
                }
            }
        }

        file.flush().await?;
        file.sync_all().await?;
        Ok(downloaded_size)
    }
}
