//! Walks one account through register, login and an authorized translation
//! using the in-memory store and the fake translator.

use std::sync::Arc;
use std::time::Duration;
use talait::application_impl::*;
use talait::application_port::*;
use talait::domain_port::*;
use talait::infra_memory::MemoryCredentialStore;
use talait::logger::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _logger = Logger::new_bootstrap();

    let clock = Arc::new(ManualClock::new(chrono::Utc::now()));
    let auth_service = RealAuthService::new(
        Arc::new(MemoryCredentialStore::new()),
        Arc::new(Argon2PasswordHasher::new()?),
        Arc::new(JwtHs256Codec::new(
            JwtConfig {
                issuer: "talait.auth".to_string(),
                audience: "talait-client".to_string(),
                token_ttl: Duration::from_secs(60),
                signing_key: b"demo-only-signing-key".to_vec(),
            },
            clock.clone(),
        )?),
    );
    let translate_service = FakeTranslateService::new();

    let alice = auth_service
        .register(RegisterInput {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        })
        .await?;
    info!(?alice, "registered");

    let again = auth_service
        .register(RegisterInput {
            username: "alice".to_string(),
            password: "pw2".to_string(),
        })
        .await;
    info!(?again, "registered twice");

    let wrong = auth_service
        .login(LoginInput {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        })
        .await;
    info!(?wrong, "login with wrong password");

    let token = auth_service
        .login(LoginInput {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        })
        .await?;
    info!(expires_at = %token.expires_at, "logged in");

    let actor = auth_service.authorize(&token.access_token.0).await?;
    let result = translate_service
        .translate(
            &actor,
            TranslateInput {
                text: "Bonjour".to_string(),
                source_language: "fr".to_string(),
                target_language: "en".to_string(),
            },
        )
        .await?;
    info!(translated = %result.translated_text, "translated");

    clock.advance(chrono::Duration::seconds(60));
    let expired = auth_service.authorize(&token.access_token.0).await;
    info!(?expired, "authorize after lifetime");

    Ok(())
}
