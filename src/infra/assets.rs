//! External asset host integration.
//!
//! Blog images live on a third-party image host, not in our database; we
//! only store the hosted URL. The contract is narrow: upload bytes and get
//! a URL back, or delete an asset by its public id.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Asset host trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload an image, returning the hosted URL
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> AppResult<String>;

    /// Delete an asset by its public id (`<folder>/<filename-stem>`)
    async fn delete(&self, public_id: &str) -> AppResult<()>;
}

/// HTTP client for the asset host API
pub struct HttpAssetStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

impl HttpAssetStore {
    /// Create a new asset host client from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.asset_host_url.clone(),
            api_key: config.asset_host_key.clone(),
            api_secret: config.asset_host_secret().to_string(),
            folder: config.asset_folder.clone(),
        }
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> AppResult<String> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(filename.to_string()))
            .text("folder", self.folder.clone());

        let response = self
            .client
            .post(format!("{}/image/upload", self.base_url))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        body.get("secure_url")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| AppError::internal("Asset host response missing secure_url"))
    }

    async fn delete(&self, public_id: &str) -> AppResult<()> {
        tracing::info!(public_id = %public_id, "Deleting asset from image host");

        self.client
            .post(format!("{}/image/destroy", self.base_url))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .form(&[("public_id", public_id)])
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// Derive an asset's public id from its hosted URL.
///
/// Hosted URLs end in `<folder>/<id>.<ext>`; the public id is the folder
/// plus the filename stem.
pub fn public_id_from_url(folder: &str, url: &str) -> Option<String> {
    let filename = url.rsplit('/').next()?;
    let stem = filename.split('.').next()?;

    if stem.is_empty() {
        return None;
    }

    Some(format!("{}/{}", folder, stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_from_hosted_url() {
        let url = "https://res.assethost.example/demo/image/upload/v1766161446/blog-images/chbkp4fx7qzr2xrwvcbk.png";
        assert_eq!(
            public_id_from_url("blog-images", url),
            Some("blog-images/chbkp4fx7qzr2xrwvcbk".to_string())
        );
    }

    #[test]
    fn test_public_id_without_extension() {
        assert_eq!(
            public_id_from_url("blog-images", "https://host/abc123"),
            Some("blog-images/abc123".to_string())
        );
    }

    #[test]
    fn test_public_id_rejects_trailing_slash() {
        assert_eq!(public_id_from_url("blog-images", "https://host/dir/"), None);
    }
}
