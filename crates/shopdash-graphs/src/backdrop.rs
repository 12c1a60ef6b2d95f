//! Map backdrop sources.
//!
//! A backdrop is optional decoration: any failure to fetch or decode it is
//! logged and the map is drawn without one.

use async_trait::async_trait;
use image::DynamicImage;
use shopdash_common::{Result, ShopDashError};
use shopdash_config::BackdropConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Somewhere a backdrop image can be read from.
#[async_trait]
pub trait BackdropSource: Send + Sync {
    /// Human readable location, for logs.
    fn describe(&self) -> String;

    /// Raw encoded image bytes.
    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// Backdrop stored on disk.
#[derive(Debug, Clone)]
pub struct FileBackdrop {
    path: PathBuf,
}

impl FileBackdrop {
    /// Read from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BackdropSource for FileBackdrop {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

/// Backdrop downloaded over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackdrop {
    client: reqwest::Client,
    url: String,
}

impl HttpBackdrop {
    /// Download from `url`, giving up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        reqwest::Url::parse(&url).map_err(|e| {
            ShopDashError::network_with_source(format!("invalid backdrop URL '{url}'"), e)
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shopdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl BackdropSource for HttpBackdrop {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(ShopDashError::network(format!("{} returned an empty body", self.url)));
        }
        Ok(body.to_vec())
    }
}

/// Source selected by configuration; a local path wins over a URL.
pub fn backdrop_source(config: &BackdropConfig) -> Result<Option<Box<dyn BackdropSource>>> {
    if let Some(path) = config.path.as_deref().filter(|p| !p.is_empty()) {
        return Ok(Some(Box::new(FileBackdrop::new(path))));
    }
    match config.url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => {
            let timeout = Duration::from_secs(config.timeout_seconds);
            Ok(Some(Box::new(HttpBackdrop::new(url, timeout)?)))
        }
        None => Ok(None),
    }
}

/// Backdrop configured in `config`, `None` when there is none or it cannot
/// be loaded.
pub async fn resolve_backdrop(config: &BackdropConfig) -> Option<DynamicImage> {
    match backdrop_source(config) {
        Ok(Some(source)) => load_backdrop(source.as_ref()).await,
        Ok(None) => None,
        Err(err) => {
            warn!(error = %err, "Map backdrop source unusable, drawing map without it");
            None
        }
    }
}

/// Fetch and decode a backdrop, `None` on any failure.
#[instrument(skip_all, fields(source = %source.describe()))]
pub async fn load_backdrop(source: &dyn BackdropSource) -> Option<DynamicImage> {
    let decoded = source.fetch().await.and_then(|bytes| {
        image::load_from_memory(&bytes)
            .map_err(|e| ShopDashError::graph_with_source("backdrop is not a decodable image", e))
    });
    match decoded {
        Ok(image) => {
            info!(
                width = image.width(),
                height = image.height(),
                "Loaded map backdrop"
            );
            Some(image)
        }
        Err(err) => {
            warn!(error = %err, "Map backdrop unavailable, drawing map without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::encode_png;
    use shopdash_common::test_utils::write_temp_file;

    #[tokio::test]
    async fn test_file_backdrop_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        std::fs::write(&path, encode_png(vec![10; 2 * 3 * 3], 2, 3).unwrap()).unwrap();

        let image = load_backdrop(&FileBackdrop::new(&path)).await.unwrap();
        assert_eq!((image.width(), image.height()), (2, 3));
    }

    #[tokio::test]
    async fn test_missing_file_yields_none() {
        let source = FileBackdrop::new("/definitely/not/here.png");
        assert!(load_backdrop(&source).await.is_none());
    }

    #[tokio::test]
    async fn test_undecodable_bytes_yield_none() {
        let file = write_temp_file(".png", "not an image");
        assert!(load_backdrop(&FileBackdrop::new(file.path())).await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_url_yields_none() {
        let source = HttpBackdrop::new("http://127.0.0.1:9/map.jpg", Duration::from_secs(2)).unwrap();
        assert_eq!(source.describe(), "http://127.0.0.1:9/map.jpg");
        assert!(load_backdrop(&source).await.is_none());
    }

    #[test]
    fn test_invalid_url_is_a_network_error() {
        let err = HttpBackdrop::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ShopDashError::Network { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[tokio::test]
    async fn test_resolve_backdrop_degrades_to_none() {
        let broken = BackdropConfig {
            url: Some("not a url".into()),
            ..BackdropConfig::default()
        };
        assert!(resolve_backdrop(&broken).await.is_none());
        assert!(resolve_backdrop(&BackdropConfig::default()).await.is_none());
    }

    #[test]
    fn test_source_selection() {
        let none = BackdropConfig::default();
        assert!(backdrop_source(&none).unwrap().is_none());

        let both = BackdropConfig {
            url: Some("https://example.com/map.jpg".into()),
            path: Some("assets/map.jpg".into()),
            timeout_seconds: 5,
        };
        let source = backdrop_source(&both).unwrap().unwrap();
        assert_eq!(source.describe(), "assets/map.jpg");

        let url_only = BackdropConfig {
            path: Some(String::new()),
            ..both
        };
        let source = backdrop_source(&url_only).unwrap().unwrap();
        assert_eq!(source.describe(), "https://example.com/map.jpg");
    }
}
