//! Authentication gate
//!
//! One hard-coded demo account, compared in plain text after an artificial
//! delay. The signed-in [`User`] is persisted through a [`SessionStorage`] so
//! it can be restored on the next start.

pub mod backend;

pub use backend::{FileSessionStorage, MemorySessionStorage, SessionStorage};

use crate::error::Result;
use sentinel_core::User;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Storage key holding the serialized user
pub const SESSION_KEY: &str = "sentinel_user";

/// Wait applied to every login attempt
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(800);

/// The single account allowed to sign in
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
}

impl Credentials {
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// Session record for this account
    pub fn user(&self) -> User {
        User::new(&self.email, &self.name, &self.role)
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: "demo@sentinelai.com".to_string(),
            password: "demo123".to_string(),
            name: "Demo User".to_string(),
            role: "Fraud Analyst".to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish()
    }
}

/// Signed-in state, passed explicitly to whatever needs it
pub struct Session {
    storage: Arc<dyn SessionStorage>,
    credentials: Credentials,
    login_delay: Duration,
    user: RwLock<Option<User>>,
}

impl Session {
    pub fn new(storage: Arc<dyn SessionStorage>, credentials: Credentials) -> Self {
        Self {
            storage,
            credentials,
            login_delay: DEFAULT_LOGIN_DELAY,
            user: RwLock::new(None),
        }
    }

    pub fn with_login_delay(mut self, delay: Duration) -> Self {
        self.login_delay = delay;
        self
    }

    /// Load a previously persisted user.
    ///
    /// A record that no longer parses is dropped from storage.
    pub async fn restore(&self) -> Result<Option<User>> {
        let Some(raw) = self.storage.get(SESSION_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                info!(email = %user.email, "Session restored");
                *self.user.write().await = Some(user.clone());
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session record");
                self.storage.remove(SESSION_KEY).await?;
                Ok(None)
            }
        }
    }

    /// Check the credentials after the login delay.
    ///
    /// Returns `false` on a mismatch, leaving the current user untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<bool> {
        tokio::time::sleep(self.login_delay).await;

        if !self.credentials.matches(email, password) {
            warn!(email = %email, "Login rejected");
            return Ok(false);
        }

        let user = self.credentials.user();
        self.storage
            .set(SESSION_KEY, &serde_json::to_string(&user)?)
            .await?;
        *self.user.write().await = Some(user);

        info!(email = %email, "Login succeeded");
        Ok(true)
    }

    /// Forget the user in memory and in storage
    pub async fn logout(&self) -> Result<()> {
        self.user.write().await.take();
        self.storage.remove(SESSION_KEY).await?;
        info!("Logged out");
        Ok(())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }
}
