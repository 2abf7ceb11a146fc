//! Attributes submitted alongside a verification code.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use jt_shared::utils::{is_valid_mobile, normalize_mobile};

use crate::domain::entities::{Role, RoleAttributes};
use crate::errors::ValidationError;

/// Raw attributes attached to `/otp/verify`
///
/// Signup uses all of them; password reset only reads `password`; login
/// ignores them. Role-specific fields arrive as extra top-level keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAttributes {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub mobile: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Everything needed to create an account
#[derive(Debug, Clone, PartialEq)]
pub struct SignupProfile {
    pub name: String,
    pub password: String,
    pub mobile: Option<String>,
    pub role: Role,
    pub attributes: RoleAttributes,
}

fn required(value: Option<&String>, field: &str) -> Result<String, ValidationError> {
    match value.map(|v| v.trim()) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::RequiredField {
            field: field.to_string(),
        }),
    }
}

impl AccountAttributes {
    /// Build a signup profile, requiring name, password and role
    pub fn to_signup_profile(&self) -> Result<SignupProfile, ValidationError> {
        let name = required(self.name.as_ref(), "name")?;
        let password = self
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ValidationError::RequiredField {
                field: "password".to_string(),
            })?;
        let role: Role = required(self.role.as_ref(), "role")?
            .parse()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "role".to_string(),
            })?;
        let mobile = match self.mobile.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => {
                if !is_valid_mobile(m) {
                    return Err(ValidationError::InvalidFormat {
                        field: "mobile".to_string(),
                    });
                }
                Some(normalize_mobile(m))
            }
            _ => None,
        };

        Ok(SignupProfile {
            name,
            password,
            mobile,
            role,
            attributes: RoleAttributes::for_role(role, self.extra.clone()),
        })
    }

    /// The new password for a reset
    pub fn new_password(&self) -> Result<&str, ValidationError> {
        match self.password.as_deref() {
            Some(p) if !p.is_empty() => Ok(p),
            _ => Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_role_fields() {
        let attributes: AccountAttributes = serde_json::from_value(json!({
            "name": "Ravi",
            "password": "secret-pass",
            "role": "travel_guide",
            "licenseNumber": "JH-GUIDE-2024-001",
            "bio": "Netarhat sunsets"
        }))
        .unwrap();

        let profile = attributes.to_signup_profile().unwrap();
        assert_eq!(profile.role, Role::TravelGuide);
        assert_eq!(
            profile.attributes.get("licenseNumber"),
            Some(&json!("JH-GUIDE-2024-001"))
        );
        assert_eq!(profile.attributes.get("experience"), Some(&json!(0)));
    }

    #[test]
    fn test_signup_profile_requires_fields() {
        let attributes = AccountAttributes {
            name: Some("  ".to_string()),
            password: Some("secret-pass".to_string()),
            role: Some("tourist".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            attributes.to_signup_profile(),
            Err(ValidationError::RequiredField { field }) if field == "name"
        ));

        let attributes = AccountAttributes {
            name: Some("Asha".to_string()),
            password: Some("secret-pass".to_string()),
            role: Some("pilot".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            attributes.to_signup_profile(),
            Err(ValidationError::InvalidFormat { field }) if field == "role"
        ));
    }

    #[test]
    fn test_signup_profile_normalizes_mobile() {
        let mut attributes = AccountAttributes {
            name: Some("Asha".to_string()),
            password: Some("secret-pass".to_string()),
            role: Some("tourist".to_string()),
            mobile: Some("+91 98765-43210".to_string()),
            ..Default::default()
        };
        assert_eq!(
            attributes.to_signup_profile().unwrap().mobile.as_deref(),
            Some("+919876543210")
        );

        attributes.mobile = Some("12".to_string());
        assert!(matches!(
            attributes.to_signup_profile(),
            Err(ValidationError::InvalidFormat { field }) if field == "mobile"
        ));
    }

    #[test]
    fn test_new_password() {
        let attributes = AccountAttributes::default();
        assert!(attributes.new_password().is_err());

        let attributes = AccountAttributes {
            password: Some("another-pass".to_string()),
            ..Default::default()
        };
        assert_eq!(attributes.new_password().unwrap(), "another-pass");
    }
}
