//! Identity provider boundary
//!
//! Authentication lives outside the core. The core consumes a [`User`] and
//! an authenticated flag through [`IdentityProvider`]; [`LocalIdentityProvider`]
//! is an in-process implementation for offline use and tests.

use crate::error::AuthError;
use crate::types::{ProfileUpdate, User};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Result type for identity operations
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// External session and profile service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in with email and password
    async fn login(&self, email: &str, password: &str) -> AuthResult<User>;

    /// Create an account and sign in
    async fn register(&self, name: &str, email: &str, password: &str) -> AuthResult<User>;

    /// End the current session
    async fn logout(&self) -> AuthResult<()>;

    /// The signed-in user, if any
    async fn current_user(&self) -> Option<User>;

    /// Whether a user is signed in
    async fn is_authenticated(&self) -> bool {
        self.current_user().await.is_some()
    }

    /// Edit the signed-in user's profile
    async fn update_profile(&self, update: ProfileUpdate) -> AuthResult<User>;
}

struct Account {
    user: User,
    salt: String,
    password_hash: String,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    current: Option<String>,
}

/// In-process identity provider
///
/// Accounts live in memory. Signing in with an unknown email creates an
/// account on the fly, so any non-empty credentials work until an account
/// for that email exists.
#[derive(Default)]
pub struct LocalIdentityProvider {
    state: RwLock<State>,
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State {
    /// Insert an account and sign it in
    fn create_account(&mut self, name: &str, email: &str, password: &str) -> User {
        let salt = Uuid::new_v4().simple().to_string();
        let user = User::new(Uuid::new_v4().to_string(), name.trim(), email.trim());
        let account = Account {
            user: user.clone(),
            password_hash: hash_password(&salt, password),
            salt,
        };
        let key = normalize_email(email);
        self.accounts.insert(key.clone(), account);
        self.current = Some(key);
        user
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        let key = normalize_email(email);
        let mut state = self.state.write().await;
        if let Some(account) = state.accounts.get(&key) {
            if hash_password(&account.salt, password) != account.password_hash {
                tracing::debug!("login rejected: password mismatch");
                return Err(AuthError::InvalidCredentials);
            }
            let user = account.user.clone();
            state.current = Some(key);
            return Ok(user);
        }
        tracing::debug!("login for unknown email, creating account");
        Ok(state.create_account(&display_name(email), email, password))
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> AuthResult<User> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Registration(
                "name, email and password are required".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(AuthError::Registration(format!(
                "'{}' is not an email address",
                email
            )));
        }
        let mut state = self.state.write().await;
        if state.accounts.contains_key(&normalize_email(email)) {
            return Err(AuthError::Registration(
                "an account with this email already exists".to_string(),
            ));
        }
        Ok(state.create_account(name, email, password))
    }

    async fn logout(&self) -> AuthResult<()> {
        self.state.write().await.current = None;
        Ok(())
    }

    async fn current_user(&self) -> Option<User> {
        let state = self.state.read().await;
        let key = state.current.as_ref()?;
        state.accounts.get(key).map(|a| a.user.clone())
    }

    async fn update_profile(&self, update: ProfileUpdate) -> AuthResult<User> {
        let mut state = self.state.write().await;
        let key = state.current.clone().ok_or(AuthError::NotAuthenticated)?;
        let mut account = state
            .accounts
            .remove(&key)
            .ok_or(AuthError::NotAuthenticated)?;

        let mut user = account.user.clone();
        if let Err(reason) = update.apply(&mut user) {
            state.accounts.insert(key, account);
            return Err(AuthError::InvalidProfile(reason));
        }

        // Accounts are keyed by email, so an email change moves the entry
        let new_key = normalize_email(&user.email);
        if new_key != key && state.accounts.contains_key(&new_key) {
            state.accounts.insert(key, account);
            return Err(AuthError::InvalidProfile(
                "email already in use".to_string(),
            ));
        }
        account.user = user.clone();
        state.accounts.insert(new_key.clone(), account);
        state.current = Some(new_key);
        Ok(user)
    }
}
