//! Linear schema migrations, embedded in the binary and applied at startup.

use anyhow::{anyhow, Context};
use tracing::info;
use crate::repositories::postgres_repo::PostgresPool;

pub struct Migration {
    pub version: i32,
    pub name: &'static str,
    pub sql: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_location",
        sql: include_str!("migrations/0001_create_location.sql"),
    },
    Migration {
        version: 2,
        name: "create_holiday",
        sql: include_str!("migrations/0002_create_holiday.sql"),
    },
    Migration {
        version: 3,
        name: "create_reservation",
        sql: include_str!("migrations/0003_create_reservation.sql"),
    },
];

/// Applies every migration not yet recorded in `schema_migrations`, each in its
/// own transaction.
pub async fn run(postgres_connection: &PostgresPool) -> anyhow::Result<()> {
    let mut conn = postgres_connection
        .get()
        .await
        .map_err(|e| anyhow!("Failed to retrieve a postgres connection for migrations: {}", e))?;

    conn.batch_execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (\
            version INTEGER PRIMARY KEY, \
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()\
        )",
    )
    .await
    .context("Failed to create schema_migrations table")?;

    let applied: Vec<i32> = conn
        .query("SELECT version FROM schema_migrations", &[])
        .await
        .context("Failed to read applied migrations")?
        .iter()
        .map(|row| row.get("version"))
        .collect();

    for migration in MIGRATIONS.iter().filter(|m| !applied.contains(&m.version)) {
        info!("Applying migration {} ({})", migration.version, migration.name);

        let tx = conn.transaction().await?;
        tx.batch_execute(migration.sql)
            .await
            .with_context(|| format!("Migration {} ({}) failed", migration.version, migration.name))?;
        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES ($1)",
            &[&migration.version],
        )
        .await?;
        tx.commit().await?;
    }

    info!("Database schema is up to date");
    Ok(())
}
