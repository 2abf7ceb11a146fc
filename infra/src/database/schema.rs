//! Table definitions for the accounts and pending codes

use sqlx::MySqlPool;

use crate::InfrastructureError;

pub const CREATE_ACCOUNTS: &str = r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id CHAR(36) NOT NULL PRIMARY KEY,
        identifier VARCHAR(320) NOT NULL,
        secret_hash VARCHAR(255) NOT NULL,
        name VARCHAR(255) NOT NULL,
        mobile VARCHAR(32) NULL,
        is_verified BOOLEAN NOT NULL DEFAULT FALSE,
        role VARCHAR(32) NOT NULL,
        attributes TEXT NOT NULL,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_accounts_identifier (identifier),
        KEY idx_accounts_mobile (mobile)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub const CREATE_PENDING_VERIFICATIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS pending_verifications (
        identifier VARCHAR(320) NOT NULL,
        purpose VARCHAR(32) NOT NULL,
        code CHAR(6) NOT NULL,
        issued_at DATETIME(6) NOT NULL,
        expires_at DATETIME(6) NOT NULL,
        PRIMARY KEY (identifier, purpose),
        KEY idx_pending_verifications_expires_at (expires_at)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// Run every `CREATE TABLE IF NOT EXISTS` statement in order
pub async fn bootstrap(pool: &MySqlPool) -> Result<(), InfrastructureError> {
    for statement in [CREATE_ACCOUNTS, CREATE_PENDING_VERIFICATIONS] {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Database schema is up to date");
    Ok(())
}
