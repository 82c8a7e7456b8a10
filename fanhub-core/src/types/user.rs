//! Account types.
//!
//! Credentials never appear here; the user store keeps them next to the
//! profile and only hands out [`User`] values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Esport;

/// A registered fan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Login email (unique, case-insensitive)
    pub email: String,
    /// Optional phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Esport the dashboard opens on
    pub fav_esport: Esport,
    /// Subscribed to the newsletter
    pub newsletter: bool,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// The logged-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Who is logged in
    #[serde(flatten)]
    pub user: User,
    /// "Remember me" was ticked
    pub remember: bool,
    /// When this session started
    pub last_login: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_flattens_user() {
        let session = Session {
            user: User {
                id: Uuid::new_v4(),
                name: "Ana".into(),
                email: "ana@example.com".into(),
                phone: None,
                fav_esport: Esport::Valorant,
                newsletter: true,
                created_at: Utc::now(),
            },
            remember: true,
            last_login: Utc::now(),
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["favEsport"], "valorant");
        assert_eq!(json["remember"], true);
        assert!(json.get("phone").is_none());
        assert!(json.get("password").is_none());
    }
}
