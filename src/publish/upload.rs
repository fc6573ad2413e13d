//! Single-shot authenticated PUT of an archive.

use std::path::Path;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};

use crate::error::PublishError;

/// Successful upload response.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub status: u16,
    pub body: String,
}

/// Uploads files to one endpoint with basic auth.
pub struct Uploader {
    client: reqwest::Client,
    url: String,
    username: String,
    password: SecretString,
    content_type: String,
}

impl Uploader {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            username: username.into(),
            password,
            content_type: content_type.into(),
        }
    }

    /// PUT the file at `path` as the request body, streamed from disk.
    ///
    /// Any non-2xx status is returned as `PublishError::Rejected` with the
    /// response body. There is no retry.
    pub async fn upload(&self, path: &Path) -> Result<UploadReceipt, PublishError> {
        let file = tokio::fs::File::open(path).await?;
        let len = file.metadata().await?.len();

        tracing::info!(url = %self.url, bytes = len, "Uploading archive");

        let resp = self
            .client
            .put(&self.url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(CONTENT_TYPE, &self.content_type)
            .header(CONTENT_LENGTH, len)
            .body(reqwest::Body::from(file))
            .send()
            .await?;

        let status = resp.status();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    status = status.as_u16(),
                    "Failed to read upload response body: {}",
                    e
                );
                String::new()
            }
        };

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Upload rejected");
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(UploadReceipt {
            status: status.as_u16(),
            body,
        })
    }
}
