use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

/// Process-local store. Records are lost on restart.
pub struct MemoryCredentialStore {
    users: DashMap<String, UserIdentity>,
    next_id: AtomicI64,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        MemoryCredentialStore {
            users: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserIdentity>, AuthError> {
        Ok(self.users.get(username).map(|entry| entry.value().clone()))
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserIdentity, AuthError> {
        // the entry holds the shard lock until the insert is done
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(AuthError::DuplicateUsername),
            Entry::Vacant(slot) => {
                let user = UserIdentity {
                    id: UserId(self.next_id.fetch_add(1, Ordering::Relaxed)),
                    username: username.to_string(),
                    password_hash: password_hash.to_string(),
                    created_at: Utc::now(),
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}
