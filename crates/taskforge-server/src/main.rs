//! TaskForge Server
//!
//! HTTP backend for multi-tenant task management: cookie-carried JWT
//! authentication with silent refresh, and role/ownership gated CRUD over
//! users and tasks.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use taskforge_core::config::{DEFAULT_ACCESS_TTL_SECS, DEFAULT_REFRESH_TTL_SECS};
use taskforge_core::tracing_init::init_tracing;

use taskforge_server::api::{AppState, router};
use taskforge_server::auth::jwt::TokenCodec;
use taskforge_server::auth::session::SessionManager;
use taskforge_server::storage::Database;

#[derive(Parser, Debug)]
#[command(name = "taskforge-server")]
#[command(version, about = "TaskForge server - task management API with cookie-session auth")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: SocketAddr,

    /// Path to SQLite database file.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// JWT secret key.
    #[arg(
        long,
        env = "TASKFORGE_JWT_SECRET",
        default_value = "dev-secret-change-me"
    )]
    jwt_secret: String,

    /// Access token TTL in seconds.
    #[arg(long, default_value_t = DEFAULT_ACCESS_TTL_SECS)]
    access_ttl: i64,

    /// Refresh token TTL in seconds.
    #[arg(long, default_value_t = DEFAULT_REFRESH_TTL_SECS)]
    refresh_ttl: i64,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing("taskforge_server=info", args.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %args.addr,
        "Starting taskforge-server"
    );

    let db = match &args.db_path {
        Some(path) => {
            info!(path = %path.display(), "Opening database");
            Database::open(path).await?
        }
        None => {
            let default_path = default_db_path()?;
            info!(path = %default_path.display(), "Opening database (default path)");
            Database::open(&default_path).await?
        }
    };

    let codec = TokenCodec::new(args.jwt_secret.as_bytes(), args.access_ttl, args.refresh_ttl);
    let state = AppState {
        db,
        sessions: Arc::new(SessionManager::new(codec)),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!(addr = %args.addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal");
    }
}

fn default_db_path() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".taskforge").join("taskforge.db"))
}
