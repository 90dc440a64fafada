use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_http::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::{anyhow, bail};
use sqlx::MySqlPool;
use std::sync::Arc;
use std::time::Duration;

pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub translate_service: Arc<dyn TranslateService>,
    pool: Option<MySqlPool>,
}

impl Server {
    /// Assemble a server from ready-made services. No storage pool is owned.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        translate_service: Arc<dyn TranslateService>,
    ) -> Self {
        Self {
            auth_service,
            translate_service,
            pool: None,
        }
    }

    /// Build every backend named in `settings`. Fails when the token signing
    /// secret is absent, so the process never serves without one.
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let signing_key = read_env_secret(&settings.auth.signing_key_env).ok_or_else(|| {
            anyhow!(
                "{} is not set; refusing to start without a token signing secret",
                settings.auth.signing_key_env
            )
        })?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let (credential_store, pool): (Arc<dyn CredentialStore>, Option<MySqlPool>) =
            match settings.store.backend.as_str() {
                "memory" => {
                    warn!("using in-memory credential store; accounts are lost on restart");
                    (Arc::new(MemoryCredentialStore::new()), None)
                }
                "mysql" => {
                    let dsn = settings
                        .store
                        .dsn
                        .as_deref()
                        .ok_or_else(|| anyhow!("store.dsn is required for the mysql backend"))?;
                    let pool = MySqlPool::connect(dsn).await?;
                    let store = MySqlCredentialStore::new(pool.clone());
                    store.ensure_schema().await?;
                    (Arc::new(store), Some(pool))
                }
                other => bail!("Unknown store backend: {}", other),
            };

        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher::new()?);
        let token_codec: Arc<dyn TokenCodec> = Arc::new(JwtHs256Codec::new(
            JwtConfig {
                issuer: settings.auth.issuer.clone(),
                audience: settings.auth.audience.clone(),
                token_ttl: Duration::from_secs(settings.auth.token_ttl_secs),
                signing_key: signing_key.into_bytes(),
            },
            clock,
        )?);

        let auth_service: Arc<dyn AuthService> = Arc::new(
            RealAuthService::new(credential_store, credential_hasher, token_codec).with_policy(
                CredentialPolicy {
                    min_username_len: settings.auth.min_username_len,
                    min_password_len: settings.auth.min_password_len,
                },
            ),
        );

        let translate_service: Arc<dyn TranslateService> =
            match settings.translate.backend.as_str() {
                "fake" => Arc::new(FakeTranslateService::new()),
                "real" => {
                    let api_key = read_env_secret(&settings.translate.api_key_env);
                    if api_key.is_none() {
                        warn!(
                            "{} is not set; translation requests will fail",
                            settings.translate.api_key_env
                        );
                    }
                    let provider = HfInferenceProvider::new(HfInferenceConfig {
                        base_url: settings.translate.base_url.clone(),
                        api_key,
                        timeout: Duration::from_secs(settings.translate.timeout_secs),
                    })?;
                    Arc::new(RealTranslateService::new(
                        Arc::new(provider),
                        settings.translate.model_template.clone(),
                    ))
                }
                other => bail!("Unknown translate backend: {}", other),
            };

        info!(
            store = %settings.store.backend,
            translate = %settings.translate.backend,
            "server started"
        );

        Ok(Self {
            auth_service,
            translate_service,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

fn read_env_secret(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
