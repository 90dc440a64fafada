use crate::application_port::*;
use crate::domain_model::UserIdentity;
use crate::domain_port::TranslationProvider;
use crate::logger::*;
use std::sync::Arc;

pub const DEFAULT_MODEL_TEMPLATE: &str = "Helsinki-NLP/opus-mt-{source}-{target}";

pub struct RealTranslateService {
    provider: Arc<dyn TranslationProvider>,
    model_template: String,
}

impl RealTranslateService {
    pub fn new(provider: Arc<dyn TranslationProvider>, model_template: impl Into<String>) -> Self {
        RealTranslateService {
            provider,
            model_template: model_template.into(),
        }
    }

    /// Codes end up in the provider URL, so only `[A-Za-z0-9_]` is accepted.
    fn validate_language(code: &str) -> Result<(), TranslateError> {
        let valid = !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(())
        } else {
            Err(TranslateError::InvalidLanguage(code.to_string()))
        }
    }

    fn model_name(&self, source: &str, target: &str) -> String {
        self.model_template
            .replace("{source}", source)
            .replace("{target}", target)
    }
}

#[async_trait::async_trait]
impl TranslateService for RealTranslateService {
    async fn translate(
        &self,
        actor: &UserIdentity,
        input: TranslateInput,
    ) -> Result<TranslateResult, TranslateError> {
        Self::validate_language(&input.source_language)?;
        Self::validate_language(&input.target_language)?;

        let model = self.model_name(&input.source_language, &input.target_language);
        debug!(user_id = %actor.id, %model, chars = input.text.len(), "forwarding translation");

        let translated_text = self.provider.translate(&model, &input.text).await?;
        Ok(TranslateResult { translated_text })
    }
}
