use lazy_static::lazy_static;
use regex::Regex;

use crate::store::UserStore;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap();
}

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least 8 characters long")]
    WeakPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("User already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// Registration and login over an in-memory user store
pub struct AccountManager {
    store: UserStore,
}

impl AccountManager {
    pub fn new() -> Self {
        Self {
            store: UserStore::new(),
        }
    }

    /// Validate email shape (anything@anything.anything)
    pub fn validate_email(email: &str) -> Result<(), AccountError> {
        if EMAIL.is_match(email) {
            Ok(())
        } else {
            Err(AccountError::InvalidEmail)
        }
    }

    /// Minimum-length check only; hardening is out of scope
    pub fn validate_password(password: &str) -> Result<(), AccountError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AccountError::WeakPassword);
        }
        Ok(())
    }

    /// Register a new user; the password is stored hashed
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AccountError> {
        Self::validate_email(email)?;
        Self::validate_password(password)?;

        if password != confirm_password {
            return Err(AccountError::PasswordMismatch);
        }
        if self.store.get_user(email).is_some() {
            return Err(AccountError::AlreadyRegistered(email.to_string()));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
        self.store.save_user(email, password_hash);
        tracing::info!(email, "user registered");

        Ok(())
    }

    /// True only for a known email with a matching password.
    /// No error detail leaks to the caller.
    pub fn authenticate(&self, email: &str, password: &str) -> bool {
        match self.store.get_user(email) {
            Some(user) => bcrypt::verify(password, &user.password_hash).unwrap_or(false),
            None => false,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }
}

impl Default for AccountManager {
    fn default() -> Self {
        Self::new()
    }
}
