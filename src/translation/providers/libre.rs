//! LibreTranslate 适配器

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::{non_empty_str, read_json, TranslationProvider};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::language::normalize;
use crate::translation::types::{LanguageTag, ProviderId, TranslationOutcome};

pub const DEFAULT_API_URL: &str = "https://libretranslate.com/translate";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: String,
    target: String,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// 免费社区 REST 提供商
pub struct LibreTranslateProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl LibreTranslateProvider {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout,
        }
    }

    async fn request(
        &self,
        text: &str,
        target_language: &LanguageTag,
        source_language: &LanguageTag,
    ) -> TranslationResult<TranslationOutcome> {
        // auto 原样发送，LibreTranslate 自行检测
        let source = normalize(ProviderId::Libre, source_language);
        let payload = LibreRequest {
            q: text,
            source: source.clone(),
            target: normalize(ProviderId::Libre, target_language),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        tracing::debug!("LibreTranslate 翻译请求: {} -> {}", payload.source, payload.target);

        let response = self
            .client
            .post(&self.api_url)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        let body = read_json(response, "/error").await?;

        let translated = non_empty_str(&body, "/translatedText").ok_or_else(|| {
            TranslationError::InvalidResponse("Invalid response from LibreTranslate API".to_string())
        })?;
        let detected = non_empty_str(&body, "/detectedLanguage/language").unwrap_or(source.as_str());

        Ok(TranslationOutcome::success(translated, detected))
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslateProvider {
    fn name(&self) -> &str {
        ProviderId::Libre.as_str()
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &LanguageTag,
        source_language: &LanguageTag,
    ) -> TranslationOutcome {
        let result = self.request(text, target_language, source_language).await;
        if let Err(ref e) = result {
            tracing::warn!("LibreTranslate 翻译失败: {}", e);
        }
        result.into()
    }
}
