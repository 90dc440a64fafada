use crate::application_port::TranslateError;

#[async_trait::async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Run `text` through the remote model named `model`.
    async fn translate(&self, model: &str, text: &str) -> Result<String, TranslateError>;
}
