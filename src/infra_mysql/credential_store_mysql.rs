use super::util::is_dup_key;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlCredentialStore {
    pool: MySqlPool,
}

impl MySqlCredentialStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlCredentialStore { pool }
    }

    /// Create the table if it does not exist yet. The binary collation keeps
    /// the unique key case-sensitive.
    pub async fn ensure_schema(&self) -> Result<(), AuthError> {
        sqlx::query(
            r#"
CREATE TABLE IF NOT EXISTS user_identity (
    id            BIGINT       NOT NULL AUTO_INCREMENT,
    username      VARCHAR(191) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    created_at    DATETIME(6)  NOT NULL,
    PRIMARY KEY (id),
    UNIQUE KEY uq_user_identity_username (username)
) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4
"#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::Store(format!("create user_identity: {e}")))?;

        Ok(())
    }

    fn row_to_record(row: MySqlRow) -> Result<UserIdentity, AuthError> {
        let id: i64 = row
            .try_get("id")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let username: String = row
            .try_get("username")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(UserIdentity {
            id: UserId(id),
            username,
            password_hash,
            created_at,
        })
    }
}

#[async_trait::async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserIdentity>, AuthError> {
        let row_opt: Option<MySqlRow> = sqlx::query(
            r#"
SELECT id, username, password_hash, created_at
FROM user_identity
WHERE username = ?
"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Store(e.to_string()))?;

        row_opt.map(Self::row_to_record).transpose()
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserIdentity, AuthError> {
        // DATETIME(6) keeps microseconds
        let created_at = Utc::now().trunc_subsecs(6);

        let result = sqlx::query(
            r#"
INSERT INTO user_identity (username, password_hash, created_at)
VALUES (?, ?, ?)
"#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        let done = match result {
            Ok(done) => done,
            Err(e) if is_dup_key(&e) => return Err(AuthError::DuplicateUsername),
            Err(e) => return Err(AuthError::Store(format!("insert user_identity: {e}"))),
        };

        let id = i64::try_from(done.last_insert_id())
            .map_err(|e| AuthError::Store(format!("user id out of range: {e}")))?;

        Ok(UserIdentity {
            id: UserId(id),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at,
        })
    }
}
