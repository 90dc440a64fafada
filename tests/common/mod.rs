#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;
use talait::application_impl::*;
use talait::application_port::*;
use talait::domain_port::*;
use talait::infra_memory::MemoryCredentialStore;

pub const TOKEN_TTL_SECS: u64 = 1800;
pub const SECRET: &str = "test-secret-signing-key";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

pub fn jwt_config(secret: &str) -> JwtConfig {
    JwtConfig {
        issuer: "talait.auth".to_string(),
        audience: "talait-client".to_string(),
        token_ttl: Duration::from_secs(TOKEN_TTL_SECS),
        signing_key: secret.as_bytes().to_vec(),
    }
}

pub struct Harness {
    pub auth_service: Arc<RealAuthService>,
    pub store: Arc<MemoryCredentialStore>,
    pub clock: Arc<ManualClock>,
}

pub fn harness() -> Harness {
    harness_with_policy(CredentialPolicy::default())
}

pub fn harness_with_policy(policy: CredentialPolicy) -> Harness {
    let store = Arc::new(MemoryCredentialStore::new());
    let clock = Arc::new(ManualClock::new(start_time()));
    let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher::new().unwrap());
    let codec: Arc<dyn TokenCodec> =
        Arc::new(JwtHs256Codec::new(jwt_config(SECRET), clock.clone()).unwrap());

    let auth_service =
        Arc::new(RealAuthService::new(store.clone(), hasher, codec).with_policy(policy));

    Harness {
        auth_service,
        store,
        clock,
    }
}

pub fn register_input(username: &str, password: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_string(),
        password: password.to_string(),
    }
}

pub fn login_input(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.to_string(),
        password: password.to_string(),
    }
}
