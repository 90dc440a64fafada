use crate::application_port::{AuthError, CredentialHasher};
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-users";

/// Argon2id with the crate's default parameters. The parameters travel inside
/// each PHC string, so stored hashes keep verifying if the defaults change.
pub struct Argon2PasswordHasher {
    decoy_hash: String,
}

impl Argon2PasswordHasher {
    pub fn new() -> Result<Self, AuthError> {
        let decoy_hash = hash_blocking(DECOY_PASSWORD)?;
        Ok(Argon2PasswordHasher { decoy_hash })
    }
}

fn hash_blocking(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::InternalError(e.to_string()))?
        .to_string();
    Ok(hash)
}

fn verify_blocking(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::InternalError(format!("invalid PHC hash: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::InternalError(format!("verify error: {e}"))),
    }
}

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|e| AuthError::InternalError(format!("hashing task failed: {e}")))?
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &password_hash))
            .await
            .map_err(|e| AuthError::InternalError(format!("verify task failed: {e}")))?
    }

    fn decoy_hash(&self) -> &str {
        &self.decoy_hash
    }
}
