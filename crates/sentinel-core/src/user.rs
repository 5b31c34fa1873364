//! Session user record

use serde::{Deserialize, Serialize};

/// The signed-in analyst, as persisted in session storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub role: String,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role: role.into(),
        }
    }
}
