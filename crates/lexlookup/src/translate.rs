use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Base URL used when no translation endpoint is configured.
pub const DEFAULT_TRANSLATE_URL: &str = "https://libretranslate.com";

const PROVIDER: &str = "translation";

/// Translate text between ISO 639 language codes.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError>;
}

/// Client for the LibreTranslate JSON API.
///
/// The public instance rejects keyless traffic under load; self-hosted
/// instances usually take no key at all, so the key is optional and omitted
/// from the request body when unset.
pub struct LibreTranslate {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslate {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[async_trait]
impl TranslationProvider for LibreTranslate {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/translate", self.base_url.trim_end_matches('/'));
        let request = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| ProviderError::Request {
                provider: PROVIDER,
                source: err,
            })?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: response.status(),
            });
        }
        let body: TranslateResponse =
            response.json().await.map_err(|err| ProviderError::Request {
                provider: PROVIDER,
                source: err,
            })?;
        Ok(body.translated_text)
    }
}
