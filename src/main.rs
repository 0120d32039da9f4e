//! Server binary: loads settings, resolves the database password, optionally reconciles the schema, serves the book API.

use bookshelf_api::{
    app, apply_migrations, connect, ensure_database_exists, with_secret_password, AppState,
    AwsSecretSource, PgBookStore, Settings, StartupError,
};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bookshelf-api", version, about = "Book CRUD API")]
struct Cli {
    /// Create the database if needed and reconcile the books table before serving.
    #[arg(long)]
    init_db: bool,

    /// Listen port (overrides BOOKSHELF_PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookshelf_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env()?;
    if let Some(port) = cli.port {
        settings.port = port;
    }

    let mut options = settings.database_options()?;
    match &settings.vault {
        Some(vault) => {
            let secrets = AwsSecretSource::connect(vault.endpoint.as_deref()).await;
            options = with_secret_password(options, &secrets, &vault.secret_name).await?;
        }
        None => tracing::info!("using DATABASE_URL as given"),
    }

    if cli.init_db {
        ensure_database_exists(&options).await?;
    }
    let pool = connect(options, settings.max_connections).await?;
    if cli.init_db {
        apply_migrations(&pool).await.map_err(StartupError::Migrate)?;
    }

    let state = AppState::new(PgBookStore::new(pool.clone()));
    let router = app(state, settings.body_limit);

    let listener = TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
