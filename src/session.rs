// src/session.rs

use std::collections::HashMap;

use crate::error::AppError;

/// The three kinds of signed-in users of the Recruiting API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserClass {
    Admin,
    Company,
    JobSeeker,
}

impl UserClass {
    /// Key under which the bearer token of this class is kept.
    pub fn storage_key(self) -> &'static str {
        match self {
            UserClass::Admin => "admin_token",
            UserClass::Company => "token",
            UserClass::JobSeeker => "jobseeker_token",
        }
    }
}

/// In-memory key/value token store.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    entries: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Stores `token` under the key of `class`.
    pub fn sign_in(&mut self, class: UserClass, token: impl Into<String>) {
        self.set(class.storage_key(), token);
    }

    pub fn sign_out(&mut self, class: UserClass) {
        self.remove(class.storage_key());
    }
}

/// Authenticated context handed to the API client at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    class: UserClass,
    token: String,
}

impl Session {
    pub fn new(class: UserClass, token: impl Into<String>) -> Self {
        Self {
            class,
            token: token.into(),
        }
    }

    pub fn admin(token: impl Into<String>) -> Self {
        Self::new(UserClass::Admin, token)
    }

    /// Reads the token of `class` from the store.
    pub fn resolve(store: &SessionStore, class: UserClass) -> Result<Self, AppError> {
        match store.get(class.storage_key()) {
            Some(token) if !token.trim().is_empty() => Ok(Self::new(class, token)),
            _ => Err(AppError::AuthError(format!(
                "No '{}' in session",
                class.storage_key()
            ))),
        }
    }

    pub fn class(&self) -> UserClass {
        self.class
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
