//! MySQL implementation of the AccountRepository trait.
//!
//! Role-specific attributes are stored as a JSON document in a TEXT column;
//! the role is stored by its snake_case name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use jt_core::domain::entities::{Account, Role, RoleAttributes};
use jt_core::errors::{AuthError, DomainError};
use jt_core::repositories::AccountRepository;

use super::{is_unique_violation, query_error};

const SELECT_COLUMNS: &str = r#"
    SELECT id, identifier, secret_hash, name, mobile, is_verified,
           role, attributes, created_at, updated_at
    FROM accounts
"#;

/// MySQL-backed account repository
#[derive(Clone)]
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        let id: String = row.try_get("id").map_err(|e| column("id", e))?;
        let role: String = row.try_get("role").map_err(|e| column("role", e))?;
        let attributes: String = row
            .try_get("attributes")
            .map_err(|e| column("attributes", e))?;

        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            identifier: row
                .try_get("identifier")
                .map_err(|e| column("identifier", e))?,
            secret_hash: row
                .try_get("secret_hash")
                .map_err(|e| column("secret_hash", e))?,
            name: row.try_get("name").map_err(|e| column("name", e))?,
            mobile: row.try_get("mobile").map_err(|e| column("mobile", e))?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| column("is_verified", e))?,
            role: parse_role(&role)?,
            attributes: decode_attributes(&attributes)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }

    async fn find_one(&self, filter: &str, value: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE {} = ? LIMIT 1", SELECT_COLUMNS, filter);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Database query failed", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }
}

pub(crate) fn parse_role(raw: &str) -> Result<Role, DomainError> {
    raw.parse::<Role>()
        .map_err(|e| DomainError::internal(format!("Unknown stored role: {}", e)))
}

pub(crate) fn decode_attributes(raw: &str) -> Result<RoleAttributes, DomainError> {
    if raw.trim().is_empty() {
        return Ok(RoleAttributes::default());
    }
    serde_json::from_str(raw)
        .map_err(|e| DomainError::internal(format!("Invalid stored attributes: {}", e)))
}

pub(crate) fn encode_attributes(attributes: &RoleAttributes) -> Result<String, DomainError> {
    serde_json::to_string(attributes)
        .map_err(|e| DomainError::internal(format!("Failed to encode attributes: {}", e)))
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("identifier", identifier).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.find_one("id", &id.to_string()).await
    }

    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("mobile", mobile).await
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, identifier, secret_hash, name, mobile, is_verified,
                role, attributes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.identifier)
            .bind(&account.secret_hash)
            .bind(&account.name)
            .bind(&account.mobile)
            .bind(account.is_verified)
            .bind(account.role.as_str())
            .bind(encode_attributes(&account.attributes)?)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(account),
            Err(e) if is_unique_violation(&e) => Err(AuthError::AccountAlreadyExists.into()),
            Err(e) => Err(query_error("Failed to create account", e)),
        }
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts SET
                identifier = ?,
                secret_hash = ?,
                name = ?,
                mobile = ?,
                is_verified = ?,
                role = ?,
                attributes = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let mut updated = account;
        updated.updated_at = Utc::now();

        let result = sqlx::query(query)
            .bind(&updated.identifier)
            .bind(&updated.secret_hash)
            .bind(&updated.name)
            .bind(&updated.mobile)
            .bind(updated.is_verified)
            .bind(updated.role.as_str())
            .bind(encode_attributes(&updated.attributes)?)
            .bind(updated.updated_at)
            .bind(updated.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to update account", e))?;

        if result.rows_affected() == 0 {
            // MySQL reports 0 for unchanged rows too; confirm the row exists
            if self.find_by_id(updated.id).await?.is_none() {
                return Err(DomainError::NotFound {
                    resource: "Account".to_string(),
                });
            }
        }

        Ok(updated)
    }

    async fn exists_by_identifier(&self, identifier: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM accounts WHERE identifier = ?
            ) AS account_exists
        "#;

        let row = sqlx::query(query)
            .bind(identifier)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to check account existence", e))?;

        let exists: i64 = row
            .try_get("account_exists")
            .map_err(|e| DomainError::internal(format!("Failed to get existence result: {}", e)))?;

        Ok(exists == 1)
    }
}
