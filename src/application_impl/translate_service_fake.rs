use crate::application_port::*;
use crate::domain_model::UserIdentity;

/// Echoes the input tagged with the language pair. No network access.
#[derive(Debug)]
pub struct FakeTranslateService;

impl FakeTranslateService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TranslateService for FakeTranslateService {
    async fn translate(
        &self,
        _actor: &UserIdentity,
        input: TranslateInput,
    ) -> Result<TranslateResult, TranslateError> {
        Ok(TranslateResult {
            translated_text: format!(
                "[{}->{}] {}",
                input.source_language, input.target_language, input.text
            ),
        })
    }
}
