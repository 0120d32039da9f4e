//! Database connector: password resolution, database bootstrap and the connection pool.

use crate::error::StartupError;
use crate::secrets::{SecretError, SecretSource};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

/// Database that always exists and is used for the admin connection.
const ADMIN_DATABASE: &str = "postgres";

/// Replace the connection password with the current value of `secret_name`.
pub async fn with_secret_password(
    options: PgConnectOptions,
    secrets: &dyn SecretSource,
    secret_name: &str,
) -> Result<PgConnectOptions, SecretError> {
    let password = secrets.get_secret(secret_name).await?;
    tracing::info!(secret = %secret_name, "database password loaded from secret store");
    Ok(options.password(&password))
}

/// Create the target database when it does not exist yet.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), StartupError> {
    let db_name = match options.get_database() {
        Some(name) if !name.is_empty() && name != ADMIN_DATABASE => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn = options
        .clone()
        .database(ADMIN_DATABASE)
        .connect()
        .await
        .map_err(StartupError::Connect)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(StartupError::Migrate)?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(StartupError::Migrate)?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

pub async fn connect(options: PgConnectOptions, max_connections: u32) -> Result<PgPool, StartupError> {
    tracing::info!(
        host = %options.get_host(),
        port = options.get_port(),
        database = options.get_database().unwrap_or(""),
        "connecting to database"
    );
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(StartupError::Connect)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
