use crate::application_port::*;
use crate::domain_model::UserIdentity;
use crate::domain_port::CredentialStore;
use crate::logger::*;
use std::sync::Arc;

/// Minimum lengths checked on registration. Zero disables a check.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialPolicy {
    pub min_username_len: usize,
    pub min_password_len: usize,
}

pub struct RealAuthService {
    credential_store: Arc<dyn CredentialStore>,
    credential_hasher: Arc<dyn CredentialHasher>,
    token_codec: Arc<dyn TokenCodec>,
    policy: CredentialPolicy,
}

impl RealAuthService {
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        credential_hasher: Arc<dyn CredentialHasher>,
        token_codec: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            credential_store,
            credential_hasher,
            token_codec,
            policy: CredentialPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CredentialPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn validate_register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if username.chars().count() < self.policy.min_username_len {
            return Err(AuthError::PolicyViolation("username too short".to_string()));
        }
        if password.chars().count() < self.policy.min_password_len {
            return Err(AuthError::PolicyViolation("password too short".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn register(&self, request: RegisterInput) -> Result<UserIdentity, AuthError> {
        let RegisterInput { username, password } = request;

        self.validate_register(&username, &password)?;

        // Skips the hashing cost for the common case; the store still
        // rejects a racing duplicate on insert.
        if self
            .credential_store
            .find_by_username(&username)
            .await?
            .is_some()
        {
            debug!(%username, "register rejected: username taken");
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash = self.credential_hasher.hash_password(&password).await?;
        let user = self
            .credential_store
            .create(&username, &password_hash)
            .await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn login(&self, request: LoginInput) -> Result<AuthToken, AuthError> {
        let LoginInput { username, password } = request;

        let Some(user) = self.credential_store.find_by_username(&username).await? else {
            // same verification work as a wrong password
            let _ = self
                .credential_hasher
                .verify_password(&password, self.credential_hasher.decoy_hash())
                .await?;
            debug!(%username, "login rejected: unknown username");
            return Err(AuthError::UnknownUsername);
        };

        let ok = self
            .credential_hasher
            .verify_password(&password, &user.password_hash)
            .await?;
        if !ok {
            debug!(user_id = %user.id, "login rejected: bad password");
            return Err(AuthError::BadPassword);
        }

        let token = self.token_codec.issue(&user.username)?;

        info!(user_id = %user.id, expires_at = %token.expires_at, "token issued");
        Ok(token)
    }

    async fn authorize(&self, token: &str) -> Result<UserIdentity, AuthError> {
        let claims = self
            .token_codec
            .verify(&AccessToken(token.to_string()))
            .inspect_err(|e| debug!(error = %e, "token rejected"))?;

        match self
            .credential_store
            .find_by_username(&claims.subject)
            .await?
        {
            Some(user) => Ok(user),
            None => {
                debug!(subject = %claims.subject, "token rejected: subject not found");
                Err(AuthError::UnknownSubject)
            }
        }
    }
}
