use crate::domain_model::UserIdentity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username already taken")]
    DuplicateUsername,
    #[error("unknown username")]
    UnknownUsername,
    #[error("bad password")]
    BadPassword,
    #[error("malformed token")]
    MalformedToken,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token subject no longer exists")]
    UnknownSubject,
    #[error("policy violation: {0}")]
    PolicyViolation(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

impl AuthError {
    /// Login failures that must look the same from outside.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, AuthError::UnknownUsername | AuthError::BadPassword)
    }

    /// Token failures that must look the same from outside.
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedToken
                | AuthError::InvalidSignature
                | AuthError::Expired
                | AuthError::UnknownSubject
        )
    }
}

#[derive(Clone)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterInput")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken(pub String);

#[derive(Debug, Clone, Serialize)]
pub struct AuthToken {
    pub access_token: AccessToken,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub trait TokenCodec: Send + Sync {
    fn issue(&self, subject: &str) -> Result<AuthToken, AuthError>;
    fn verify(&self, token: &AccessToken) -> Result<TokenClaims, AuthError>;
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, AuthError>;
    /// A valid hash of a throwaway password, verified against when the
    /// username is unknown so both login failures cost the same.
    fn decoy_hash(&self) -> &str;
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, request: RegisterInput) -> Result<UserIdentity, AuthError>;
    async fn login(&self, request: LoginInput) -> Result<AuthToken, AuthError>;
    async fn authorize(&self, token: &str) -> Result<UserIdentity, AuthError>;
}
