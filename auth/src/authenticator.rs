use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and JWT token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    decoy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Absolute expiry of the token
    pub expires_at: Option<DateTime<Utc>>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    ///
    /// # Errors
    /// * `PasswordError` - The decoy hash for unknown accounts could not be built
    pub fn new(jwt_secret: &[u8]) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new();
        let decoy_hash = password_hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            decoy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Subject to embed in the token
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or hash is malformed)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = Claims::for_user(user_id, ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at: claims.expires_at(),
        })
    }

    /// Reject a login attempt for an account that does not exist.
    ///
    /// Runs one verification against a decoy hash so that an unknown email
    /// costs the same as a wrong password.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, &self.decoy_hash);
        AuthenticationError::InvalidCredentials
    }

    /// Validate and decode a session token.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, badly signed, or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
