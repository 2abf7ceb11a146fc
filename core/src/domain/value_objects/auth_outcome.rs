//! Values returned by the session issuer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::entities::{Account, Role};

/// Public view of an account; never carries the secret hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: Uuid,
    pub identifier: String,
    pub name: String,
    pub mobile: Option<String>,
    pub role: Role,
    pub is_verified: bool,
    pub attributes: Map<String, Value>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            identifier: account.identifier.clone(),
            name: account.name.clone(),
            mobile: account.mobile.clone(),
            role: account.role,
            is_verified: account.is_verified,
            attributes: account.attributes.as_map().clone(),
        }
    }
}

/// Account plus a freshly issued session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthOutcome {
    pub account: AccountView,
    pub token: String,
}

impl AuthOutcome {
    pub fn new(account: &Account, token: String) -> Self {
        Self {
            account: AccountView::from(account),
            token,
        }
    }
}

/// Which submitted field matched an existing account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedField {
    Email,
    Mobile,
    Both,
}

/// Result of an account existence check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountCheck {
    pub matched: Option<MatchedField>,
}

impl AccountCheck {
    pub fn exists(&self) -> bool {
        self.matched.is_some()
    }

    pub fn message(&self) -> &'static str {
        match self.matched {
            None => "User does not exist",
            Some(MatchedField::Both) => "User already exists with this email and mobile number",
            Some(MatchedField::Email) => "User already exists with this email address",
            Some(MatchedField::Mobile) => "User already exists with this mobile number",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RoleAttributes;

    #[test]
    fn test_account_view_omits_secret() {
        let account = Account::new(
            "a@x.com".to_string(),
            "$2b$12$very-secret".to_string(),
            "Asha".to_string(),
            Role::Tourist,
            RoleAttributes::default(),
        );
        let json = serde_json::to_string(&AuthOutcome::new(&account, "t".to_string())).unwrap();
        assert!(!json.contains("very-secret"));
        assert!(json.contains("\"isVerified\":false"));
        assert!(json.contains("\"identifier\":\"a@x.com\""));
    }

    #[test]
    fn test_account_check_messages() {
        assert!(!AccountCheck { matched: None }.exists());
        assert_eq!(
            AccountCheck {
                matched: Some(MatchedField::Email)
            }
            .message(),
            "User already exists with this email address"
        );
    }
}
