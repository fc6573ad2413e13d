use anyhow::Context;

use profile_bot::config::PublishConfig;
use profile_bot::publish::publish;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PublishConfig::from_env().context("Failed to load publish configuration")?;

    eprintln!("📦 Publishing {}", config.source_dir.display());
    eprintln!("   Archive: {}", config.archive_path.display());
    eprintln!("   Target:  {}", config.url);

    // Upload failures are reported, not turned into an exit code.
    match publish(&config).await {
        Ok(report) => tracing::info!(
            status = report.receipt.status,
            files = report.archive.files,
            bytes = report.archive.size_bytes,
            "Publish succeeded"
        ),
        Err(e) => tracing::error!(
            archive = %config.archive_path.display(),
            "Publish failed: {}",
            e
        ),
    }

    Ok(())
}
