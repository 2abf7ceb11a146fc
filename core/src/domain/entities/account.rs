//! Account entity for a registered marketplace user.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Marketplace role chosen at signup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Tourist,
    TravelGuide,
    Admin,
    Government,
    TravelProvider,
    HotelProvider,
    RestaurantProvider,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tourist => "tourist",
            Role::TravelGuide => "travel_guide",
            Role::Admin => "admin",
            Role::Government => "government",
            Role::TravelProvider => "travel_provider",
            Role::HotelProvider => "hotel_provider",
            Role::RestaurantProvider => "restaurant_provider",
        }
    }

    /// Attribute keys an account with this role may carry
    pub fn allowed_attributes(&self) -> &'static [&'static str] {
        match self {
            Role::Tourist => &["preferences"],
            Role::TravelGuide => &[
                "licenseNumber",
                "experience",
                "languages",
                "specializations",
                "location",
                "bio",
            ],
            Role::Admin => &["permissions", "department"],
            Role::Government => &["department", "position", "accessLevel"],
            Role::TravelProvider => &[
                "businessName",
                "businessType",
                "licenseNumber",
                "address",
                "description",
                "services",
            ],
            Role::HotelProvider => &[
                "hotelName",
                "hotelType",
                "address",
                "description",
                "amenities",
                "priceRange",
            ],
            Role::RestaurantProvider => &[
                "restaurantName",
                "cuisineType",
                "address",
                "description",
                "specialties",
                "priceRange",
            ],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "tourist" => Ok(Role::Tourist),
            "travel_guide" => Ok(Role::TravelGuide),
            "admin" => Ok(Role::Admin),
            "government" => Ok(Role::Government),
            "travel_provider" => Ok(Role::TravelProvider),
            "hotel_provider" => Ok(Role::HotelProvider),
            "restaurant_provider" => Ok(Role::RestaurantProvider),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Role-specific profile fields, stored as a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleAttributes(Map<String, Value>);

impl RoleAttributes {
    /// Keep only the keys permitted for `role` and fill role defaults
    pub fn for_role(role: Role, mut raw: Map<String, Value>) -> Self {
        let allowed = role.allowed_attributes();
        raw.retain(|key, value| allowed.contains(&key.as_str()) && !value.is_null());

        if role == Role::TravelGuide {
            raw.entry("experience").or_insert_with(|| json!(0));
            raw.entry("languages").or_insert_with(|| json!([]));
            raw.entry("specializations").or_insert_with(|| json!([]));
        }

        Self(raw)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Registered account
///
/// `secret_hash` is a bcrypt hash and must never leave the service layer;
/// use `AccountView` for anything that is serialized outward.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,

    /// Normalized email address, unique across accounts
    pub identifier: String,

    pub secret_hash: String,

    pub name: String,

    pub mobile: Option<String>,

    pub is_verified: bool,

    pub role: Role,

    pub attributes: RoleAttributes,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new, not yet verified account
    pub fn new(
        identifier: String,
        secret_hash: String,
        name: String,
        role: Role,
        attributes: RoleAttributes,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            identifier,
            secret_hash,
            name,
            mobile: None,
            is_verified: false,
            role,
            attributes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_mobile(mut self, mobile: Option<String>) -> Self {
        self.mobile = mobile;
        self
    }

    /// Marks the account as verified; returns whether anything changed
    pub fn mark_verified(&mut self) -> bool {
        if self.is_verified {
            return false;
        }
        self.is_verified = true;
        self.updated_at = Utc::now();
        true
    }

    /// Replaces the stored secret hash
    pub fn set_secret_hash(&mut self, secret_hash: String) {
        self.secret_hash = secret_hash;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            "a@x.com".to_string(),
            "$2b$04$hash".to_string(),
            "Asha".to_string(),
            Role::Tourist,
            RoleAttributes::default(),
        )
    }

    #[test]
    fn test_new_account_is_unverified() {
        let account = account();
        assert!(!account.is_verified);
        assert!(account.mobile.is_none());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_mark_verified_transitions_once() {
        let mut account = account();
        assert!(account.mark_verified());
        assert!(account.is_verified);
        assert!(!account.mark_verified());
    }

    #[test]
    fn test_role_round_trip_names() {
        for role in [
            Role::Tourist,
            Role::TravelGuide,
            Role::Admin,
            Role::Government,
            Role::TravelProvider,
            Role::HotelProvider,
            Role::RestaurantProvider,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            assert_eq!(
                serde_json::to_string(&role).unwrap(),
                format!("\"{}\"", role.as_str())
            );
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_attributes_drop_unknown_keys() {
        let raw = json!({
            "hotelName": "Hotel Ranchi",
            "hotelType": "resort",
            "licenseNumber": "JH-1",
            "isApproved": true
        });
        let attributes = RoleAttributes::for_role(
            Role::HotelProvider,
            raw.as_object().cloned().unwrap(),
        );
        assert_eq!(attributes.get("hotelName"), Some(&json!("Hotel Ranchi")));
        assert!(attributes.get("licenseNumber").is_none());
        assert!(attributes.get("isApproved").is_none());
    }

    #[test]
    fn test_travel_guide_defaults() {
        let raw = json!({ "licenseNumber": "JH-GUIDE-1", "languages": ["Hindi"] });
        let attributes =
            RoleAttributes::for_role(Role::TravelGuide, raw.as_object().cloned().unwrap());
        assert_eq!(attributes.get("experience"), Some(&json!(0)));
        assert_eq!(attributes.get("languages"), Some(&json!(["Hindi"])));
        assert_eq!(attributes.get("specializations"), Some(&json!([])));
    }
}
