use crate::application_port::*;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the record for `username`. Case-sensitive, no side effects.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserIdentity>, AuthError>;

    /// Insert a new record and return it with its assigned id and creation time.
    ///
    /// Uniqueness is enforced by the backend itself, so two concurrent calls
    /// for the same username yield one record and one `DuplicateUsername`.
    async fn create(&self, username: &str, password_hash: &str)
    -> Result<UserIdentity, AuthError>;
}
