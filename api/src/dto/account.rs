//! DTOs for `/accounts/*`

use serde::{Deserialize, Serialize};
use validator::Validate;

use jt_core::domain::value_objects::{AccountCheck, AccountView};

/// Body of `POST /accounts/check`; at least one field is required
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountCheckRequest {
    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 32))]
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccountCheckResponse {
    pub exists: bool,
    pub message: String,
}

impl From<AccountCheck> for AccountCheckResponse {
    fn from(check: AccountCheck) -> Self {
        Self {
            exists: check.exists(),
            message: check.message().to_string(),
        }
    }
}

/// Body of `GET /accounts/me`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CurrentAccountResponse {
    pub account: AccountView,
}
