//! MySQL implementation of the VerificationStore trait.
//!
//! One row per `(identifier, purpose)`; issuing a new code overwrites the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use jt_core::domain::entities::{PendingVerification, Purpose};
use jt_core::errors::DomainError;
use jt_core::repositories::VerificationStore;

use super::query_error;

/// MySQL-backed store for pending codes
#[derive(Clone)]
pub struct MySqlVerificationStore {
    pool: MySqlPool,
}

impl MySqlVerificationStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &MySqlRow) -> Result<PendingVerification, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        let purpose: String = row.try_get("purpose").map_err(|e| column("purpose", e))?;

        Ok(PendingVerification {
            identifier: row
                .try_get("identifier")
                .map_err(|e| column("identifier", e))?,
            code: row.try_get("code").map_err(|e| column("code", e))?,
            purpose: purpose
                .parse::<Purpose>()
                .map_err(|e| DomainError::internal(format!("Unknown stored purpose: {}", e)))?,
            issued_at: row
                .try_get::<DateTime<Utc>, _>("issued_at")
                .map_err(|e| column("issued_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column("expires_at", e))?,
        })
    }
}

#[async_trait]
impl VerificationStore for MySqlVerificationStore {
    async fn put(&self, entry: PendingVerification) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO pending_verifications (identifier, purpose, code, issued_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                issued_at = VALUES(issued_at),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(&entry.identifier)
            .bind(entry.purpose.as_str())
            .bind(&entry.code)
            .bind(entry.issued_at)
            .bind(entry.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to store verification code", e))?;

        Ok(())
    }

    async fn get(
        &self,
        identifier: &str,
        purpose: Purpose,
    ) -> Result<Option<PendingVerification>, DomainError> {
        let query = r#"
            SELECT identifier, purpose, code, issued_at, expires_at
            FROM pending_verifications
            WHERE identifier = ? AND purpose = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(identifier)
            .bind(purpose.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to load verification code", e))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn delete(&self, identifier: &str, purpose: Purpose) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM pending_verifications WHERE identifier = ? AND purpose = ?",
        )
        .bind(identifier)
        .bind(purpose.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to delete verification code", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM pending_verifications WHERE expires_at < ?")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to purge expired codes", e))?;

        Ok(result.rows_affected())
    }
}
