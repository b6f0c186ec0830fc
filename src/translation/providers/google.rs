//! Google Cloud Translation v2 适配器

use std::time::Duration;

use async_trait::async_trait;

use super::{non_empty_str, read_json, TranslationProvider};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::language::normalize;
use crate::translation::types::{LanguageTag, ProviderId, TranslationOutcome};

pub const DEFAULT_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 需要 API key 的主提供商
pub struct GoogleProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl GoogleProvider {
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
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            TranslationError::Config("Google API key is not configured".to_string())
        })?;

        let target = normalize(ProviderId::Google, target_language);
        let mut params = vec![
            ("q", text.to_string()),
            ("target", target),
            ("key", api_key.to_string()),
            ("format", "text".to_string()),
        ];
        // 源语言为 auto 时不发送，由服务端自动检测
        if !source_language.is_auto() {
            params.push(("source", normalize(ProviderId::Google, source_language)));
        }

        tracing::debug!(
            "Google 翻译请求: target={}, source={}, chars={}",
            target_language,
            source_language,
            text.chars().count()
        );

        let response = self
            .client
            .post(&self.api_url)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await?;

        let body = read_json(response, "/error/message").await?;

        let translation = body
            .pointer("/data/translations/0")
            .ok_or_else(|| {
                TranslationError::InvalidResponse(
                    "Invalid response from Google Translate API".to_string(),
                )
            })?;
        let translated = non_empty_str(translation, "/translatedText").ok_or_else(|| {
            TranslationError::InvalidResponse(
                "Invalid response from Google Translate API".to_string(),
            )
        })?;

        // 未报告检测语言时使用发送给服务端的源语言代码
        let detected = non_empty_str(translation, "/detectedSourceLanguage")
            .map(str::to_string)
            .unwrap_or_else(|| normalize(ProviderId::Google, source_language));

        Ok(TranslationOutcome::success(translated, detected))
    }
}

#[async_trait]
impl TranslationProvider for GoogleProvider {
    fn name(&self) -> &str {
        ProviderId::Google.as_str()
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &LanguageTag,
        source_language: &LanguageTag,
    ) -> TranslationOutcome {
        let result = self.request(text, target_language, source_language).await;
        if let Err(ref e) = result {
            tracing::warn!("Google 翻译失败: {}", e);
        }
        result.into()
    }
}
