use crate::domain_model::UserIdentity;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("invalid language code: {0:?}")]
    InvalidLanguage(String),
    #[error("translation provider api key is not configured")]
    MissingApiKey,
    #[error("translation provider unavailable: {0}")]
    ProviderUnavailable(String),
}

#[derive(Debug, Clone)]
pub struct TranslateInput {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateResult {
    pub translated_text: String,
}

#[async_trait::async_trait]
pub trait TranslateService: Send + Sync {
    /// `actor` is the identity resolved by the authorization gate.
    async fn translate(
        &self,
        actor: &UserIdentity,
        input: TranslateInput,
    ) -> Result<TranslateResult, TranslateError>;
}
