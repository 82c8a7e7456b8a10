//! In-memory user store.

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use fanhub_core::constants::MIN_PASSWORD_LEN;
use fanhub_core::error::{FanhubError, Result};
use fanhub_core::types::{Esport, Session, User};

/// Sign-up form.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Password, at least 6 characters
    pub password: String,
    /// Must equal `password`
    pub confirm_password: String,
    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Esport the dashboard opens on
    #[serde(default)]
    pub fav_esport: Esport,
    /// Newsletter opt-in
    #[serde(default)]
    pub newsletter: bool,
    /// Terms of service accepted
    #[serde(default)]
    pub accepted_terms: bool,
}

impl RegisterRequest {
    /// Checks the form without touching the store.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FanhubError::ValidationError("name is required".into()));
        }
        if !self.email.contains('@') {
            return Err(FanhubError::ValidationError(format!(
                "invalid email: {}",
                self.email
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FanhubError::ValidationError(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.password != self.confirm_password {
            return Err(FanhubError::ValidationError(
                "passwords do not match".into(),
            ));
        }
        if !self.accepted_terms {
            return Err(FanhubError::ValidationError(
                "terms of service must be accepted".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Account {
    user: User,
    password_digest: String,
}

/// Registered users plus the one logged-in session.
///
/// Emails are indexed lowercased, so `Ana@Example.com` and
/// `ana@example.com` are the same account.
#[derive(Debug, Default)]
pub struct UserStore {
    /// Lowercased email → account
    accounts: DashMap<String, Account>,
    current: RwLock<Option<Session>>,
}

impl UserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub fn register(&self, request: RegisterRequest) -> Result<User> {
        request.validate()?;

        let key = normalize_email(&request.email);
        match self.accounts.entry(key) {
            Entry::Occupied(_) => Err(FanhubError::EmailAlreadyRegistered(request.email)),
            Entry::Vacant(slot) => {
                let user = User {
                    id: Uuid::new_v4(),
                    name: request.name.trim().to_string(),
                    email: request.email.trim().to_string(),
                    phone: request.phone.filter(|p| !p.trim().is_empty()),
                    fav_esport: request.fav_esport,
                    newsletter: request.newsletter,
                    created_at: Utc::now(),
                };
                slot.insert(Account {
                    user: user.clone(),
                    password_digest: digest(&request.password),
                });
                info!(id = %user.id, "User registered");
                Ok(user)
            }
        }
    }

    /// Logs in and makes the result the current session.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str, remember: bool) -> Result<Session> {
        let account = self
            .accounts
            .get(&normalize_email(email))
            .ok_or_else(|| FanhubError::UserNotFound(email.to_string()))?;

        if account.password_digest != digest(password) {
            debug!("Password mismatch");
            return Err(FanhubError::InvalidPassword);
        }

        let session = Session {
            user: account.user.clone(),
            remember,
            last_login: Utc::now(),
        };
        drop(account);

        *self.current.write() = Some(session.clone());
        info!(id = %session.user.id, "User logged in");
        Ok(session)
    }

    /// Ends the current session. Returns false if nobody was logged in.
    pub fn logout(&self) -> bool {
        let ended = self.current.write().take();
        if let Some(ref session) = ended {
            info!(id = %session.user.id, "User logged out");
        }
        ended.is_some()
    }

    /// The current session, if any.
    pub fn current_user(&self) -> Option<Session> {
        self.current.read().clone()
    }

    /// Like [`current_user`](Self::current_user) but fails with `NotAuthenticated`.
    pub fn require_user(&self) -> Result<Session> {
        self.current_user().ok_or(FanhubError::NotAuthenticated)
    }

    /// True while someone is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True if nobody has registered.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn digest(password: &str) -> String {
    hex::encode(Sha3_256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ana Souza".into(),
            email: email.into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            phone: None,
            fav_esport: Esport::Valorant,
            newsletter: true,
            accepted_terms: true,
        }
    }

    #[test]
    fn test_register_and_login() {
        let store = UserStore::new();
        let user = store.register(request("ana@example.com")).unwrap();
        assert_eq!(user.fav_esport, Esport::Valorant);
        assert!(!store.is_authenticated());

        let session = store.login("ana@example.com", "secret1", true).unwrap();
        assert_eq!(session.user, user);
        assert!(session.remember);
        assert_eq!(store.current_user(), Some(session));
    }

    #[test]
    fn test_email_is_case_insensitive() {
        let store = UserStore::new();
        store.register(request("Ana@Example.com")).unwrap();

        let err = store.register(request("ana@example.COM")).unwrap_err();
        assert!(matches!(err, FanhubError::EmailAlreadyRegistered(_)));
        assert_eq!(store.len(), 1);

        assert!(store.login("ANA@example.com", "secret1", false).is_ok());
    }

    #[test]
    fn test_login_errors() {
        let store = UserStore::new();
        store.register(request("ana@example.com")).unwrap();

        assert!(matches!(
            store.login("bob@example.com", "secret1", false),
            Err(FanhubError::UserNotFound(_))
        ));
        assert!(matches!(
            store.login("ana@example.com", "wrong-pass", false),
            Err(FanhubError::InvalidPassword)
        ));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_registration_rules() {
        let store = UserStore::new();

        let mut short = request("a@example.com");
        short.password = "12345".into();
        short.confirm_password = "12345".into();
        assert!(store.register(short).unwrap_err().is_validation_error());

        let mut mismatch = request("a@example.com");
        mismatch.confirm_password = "secret2".into();
        assert!(store.register(mismatch).is_err());

        let mut no_terms = request("a@example.com");
        no_terms.accepted_terms = false;
        assert!(store.register(no_terms).is_err());

        assert!(store.is_empty());
    }

    #[test]
    fn test_logout() {
        let store = UserStore::new();
        store.register(request("ana@example.com")).unwrap();
        store.login("ana@example.com", "secret1", false).unwrap();

        assert!(store.logout());
        assert!(!store.is_authenticated());
        assert!(!store.logout());
        assert!(matches!(
            store.require_user(),
            Err(FanhubError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_password_not_stored_in_clear() {
        let store = UserStore::new();
        store.register(request("ana@example.com")).unwrap();

        let account = store.accounts.get("ana@example.com").unwrap();
        assert_ne!(account.password_digest, "secret1");
        assert_eq!(account.password_digest.len(), 64);
    }
}
