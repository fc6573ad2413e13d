use std::sync::Arc;

use profile_bot::bot::ProfileBot;
use profile_bot::channels::CliChannel;
use profile_bot::config::BotConfig;
use profile_bot::error::Result;
use profile_bot::profile::{ProfileDialog, ProfileRouteState, profile_routes};
use profile_bot::store::{LibSqlStore, MemoryStore, SettingsStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = BotConfig::from_env()?;

    eprintln!("👤 Profile Bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Dialog: {}", config.dialog_id);

    // ── State store ─────────────────────────────────────────────────────
    let store: Arc<dyn SettingsStore> = match &config.db_path {
        Some(path) => {
            eprintln!("   Database: {}", path.display());
            Arc::new(LibSqlStore::new_local(path).await?)
        }
        None => {
            eprintln!("   Database: in-memory");
            Arc::new(MemoryStore::new())
        }
    };

    let dialog = Arc::new(
        ProfileDialog::builder()
            .dialog_id(config.dialog_id.clone())
            .store(store)
            .build()?,
    );

    // ── Status routes ───────────────────────────────────────────────────
    if let Some(port) = config.http_port {
        let app = profile_routes(ProfileRouteState {
            dialog: Arc::clone(&dialog),
        });
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        eprintln!("   Status API: http://0.0.0.0:{port}/api/dialog/<conversation>/status");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Status server stopped: {}", e);
            }
        });
    }

    eprintln!("   Send any message to start. /quit to exit.\n");

    let mut bot = ProfileBot::new(dialog, Box::new(CliChannel::new()));
    if let Some(seed) = config.initial_profile {
        bot = bot.with_seed(seed);
    }
    bot.run().await?;

    Ok(())
}
