use crate::application_port::TranslateError;
use crate::domain_port::TranslationProvider;
use crate::logger::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HF_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

#[derive(Debug, Clone)]
pub struct HfInferenceConfig {
    pub base_url: String,
    /// `None` makes every call fail with `MissingApiKey`.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslationOutput {
    #[serde(default)]
    translation_text: String,
}

// The endpoint answers with either a list or a single object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<TranslationOutput>),
    One(TranslationOutput),
}

/// Hugging Face inference API client for translation models.
pub struct HfInferenceProvider {
    config: HfInferenceConfig,
    http: reqwest::Client,
}

impl HfInferenceProvider {
    pub fn new(config: HfInferenceConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    fn model_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait::async_trait]
impl TranslationProvider for HfInferenceProvider {
    async fn translate(&self, model: &str, text: &str) -> Result<String, TranslateError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(TranslateError::MissingApiKey)?;

        let resp = self
            .http
            .post(self.model_url(model))
            .bearer_auth(api_key)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await
            .map_err(|e| {
                warn!(%model, error = %e, "translation request failed");
                TranslateError::ProviderUnavailable(e.to_string())
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(%model, %status, %body, "translation provider returned an error");
            return Err(TranslateError::ProviderUnavailable(format!(
                "provider returned {status}"
            )));
        }

        let parsed: InferenceResponse = resp.json().await.map_err(|e| {
            warn!(%model, error = %e, "undecodable translation response");
            TranslateError::ProviderUnavailable(e.to_string())
        })?;

        match parsed {
            InferenceResponse::Many(outputs) => outputs
                .into_iter()
                .next()
                .map(|output| output.translation_text)
                .ok_or_else(|| TranslateError::ProviderUnavailable("empty response".to_string())),
            InferenceResponse::One(output) => Ok(output.translation_text),
        }
    }
}
