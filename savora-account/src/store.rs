use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered user, keyed by email in the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// In-memory user store
pub struct UserStore {
    users: HashMap<String, UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    pub fn get_user(&self, email: &str) -> Option<&UserRecord> {
        self.users.get(email)
    }

    pub fn save_user(&mut self, email: &str, password_hash: String) {
        self.users.insert(
            email.to_string(),
            UserRecord {
                email: email.to_string(),
                password_hash,
                created_at: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
