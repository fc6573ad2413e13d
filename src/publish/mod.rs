//! Publish — zip the source directory and upload it in one PUT.
//!
//! 1. Compress the tree into the configured archive path.
//! 2. PUT the archive with basic auth.
//! 3. On 2xx delete the archive; otherwise leave it for inspection.

pub mod archive;
pub mod upload;

pub use archive::{ArchiveSummary, build_archive};
pub use upload::{UploadReceipt, Uploader};

use crate::config::PublishConfig;
use crate::error::PublishError;

/// Outcome of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub archive: ArchiveSummary,
    pub receipt: UploadReceipt,
}

/// Run the full zip → upload → cleanup sequence once.
pub async fn publish(config: &PublishConfig) -> Result<PublishReport, PublishError> {
    let source = config.source_dir.clone();
    let destination = config.archive_path.clone();
    let archive = tokio::task::spawn_blocking(move || build_archive(&source, &destination))
        .await
        .map_err(|e| PublishError::Archive {
            path: config.archive_path.display().to_string(),
            reason: format!("archive task failed: {e}"),
        })??;

    let uploader = Uploader::new(
        config.url.clone(),
        config.username.clone(),
        config.password.clone(),
        config.content_type.clone(),
    );

    // The archive stays on disk when this fails.
    let receipt = uploader.upload(&archive.path).await?;

    // The upload already landed; a leftover archive is not a failure.
    match tokio::fs::remove_file(&archive.path).await {
        Ok(()) => tracing::info!(
            status = receipt.status,
            archive = %archive.path.display(),
            "Upload succeeded, archive removed"
        ),
        Err(e) => tracing::warn!(
            status = receipt.status,
            archive = %archive.path.display(),
            "Upload succeeded but the archive could not be removed: {}",
            e
        ),
    }
    Ok(PublishReport { archive, receipt })
}
