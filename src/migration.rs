//! Schema reconciliation for the books table. Idempotent: creates the table when missing,
//! then adds any column an older table lacks. Run once at startup on `--init-db`, never per request.

use crate::sql::books::TABLE;
use sqlx::PgPool;

/// Columns besides `id`, with their full definitions.
const COLUMNS: &[(&str, &str)] = &[
    ("book_name", "TEXT NOT NULL DEFAULT ''"),
    ("author", "TEXT NOT NULL DEFAULT ''"),
    ("price", "DOUBLE PRECISION NOT NULL DEFAULT 0"),
    ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
    ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
    ("deleted_at", "TIMESTAMPTZ"),
];

fn create_table_sql() -> String {
    let mut col_defs = vec!["id BIGSERIAL PRIMARY KEY".to_string()];
    col_defs.extend(COLUMNS.iter().map(|(name, def)| format!("{} {}", name, def)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        TABLE,
        col_defs.join(",\n    ")
    )
}

fn add_column_sql(name: &str, def: &str) -> String {
    format!("ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}", TABLE, name, def)
}

fn live_index_sql() -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS idx_{0}_live ON {0} (id) WHERE deleted_at IS NULL",
        TABLE
    )
}

pub async fn apply_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(&create_table_sql()).execute(pool).await?;
    for (name, def) in COLUMNS {
        sqlx::query(&add_column_sql(name, def)).execute(pool).await?;
    }
    sqlx::query(&live_index_sql()).execute(pool).await?;
    tracing::info!(table = TABLE, "schema reconciled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_table_has_every_column() {
        let sql = create_table_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS books"));
        assert!(sql.contains("id BIGSERIAL PRIMARY KEY"));
        for (name, def) in COLUMNS {
            assert!(sql.contains(&format!("{} {}", name, def)), "missing {}", name);
        }
    }

    #[test]
    fn add_column_is_conditional() {
        assert_eq!(
            add_column_sql("deleted_at", "TIMESTAMPTZ"),
            "ALTER TABLE books ADD COLUMN IF NOT EXISTS deleted_at TIMESTAMPTZ"
        );
    }

    #[test]
    fn live_index_skips_deleted_rows() {
        assert!(live_index_sql().ends_with("WHERE deleted_at IS NULL"));
    }
}
