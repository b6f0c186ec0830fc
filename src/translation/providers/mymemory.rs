//! MyMemory 翻译记忆库适配器

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{non_empty_str, read_json, TranslationProvider};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::language::normalize;
use crate::translation::types::{LanguageTag, ProviderId, TranslationOutcome};

pub const DEFAULT_API_URL: &str = "https://api.mymemory.translated.net/get";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 基于翻译记忆的提供商，不支持自动检测源语言
pub struct MyMemoryProvider {
    client: reqwest::Client,
    api_url: String,
    email: Option<String>,
    timeout: Duration,
}

impl MyMemoryProvider {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        email: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            email: email.filter(|e| !e.trim().is_empty()),
            timeout,
        }
    }

    async fn request(
        &self,
        text: &str,
        target_language: &LanguageTag,
        source_language: &LanguageTag,
    ) -> TranslationResult<TranslationOutcome> {
        let source = normalize(ProviderId::MyMemory, source_language);
        let target = normalize(ProviderId::MyMemory, target_language);
        let langpair = format!("{}|{}", source, target);

        tracing::debug!("MyMemory 翻译请求: langpair={}", langpair);

        let mut params = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = self.email.as_deref() {
            params.push(("de", email));
        }

        let response = self
            .client
            .get(&self.api_url)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await?;

        let body = read_json(response, "/error").await?;
        check_response_status(&body)?;

        let translated = non_empty_str(&body, "/responseData/translatedText").ok_or_else(|| {
            TranslationError::InvalidResponse("Invalid response from MyMemory API".to_string())
        })?;

        Ok(TranslationOutcome::success(translated, source))
    }
}

/// MyMemory 在 HTTP 200 中通过 `responseStatus` 报告错误（如语言对无效、配额用尽）
fn check_response_status(body: &Value) -> TranslationResult<()> {
    let status = match body.get("responseStatus") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };

    match status {
        Some(code) if code != 200 => {
            let message = non_empty_str(body, "/responseDetails")
                .map(str::to_string)
                .unwrap_or_else(|| format!("MyMemory API returned status {}", code));
            Err(TranslationError::HttpStatus {
                status: u16::try_from(code).unwrap_or(500),
                message,
            })
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn name(&self) -> &str {
        ProviderId::MyMemory.as_str()
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &LanguageTag,
        source_language: &LanguageTag,
    ) -> TranslationOutcome {
        let result = self.request(text, target_language, source_language).await;
        if let Err(ref e) = result {
            tracing::warn!("MyMemory 翻译失败: {}", e);
        }
        result.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_in_body_status() {
        assert!(check_response_status(&json!({"responseStatus": 200})).is_ok());
        assert!(check_response_status(&json!({"responseStatus": "200"})).is_ok());
        assert!(check_response_status(&json!({})).is_ok());

        let err = check_response_status(&json!({
            "responseStatus": "403",
            "responseDetails": "'AUTO' IS AN INVALID SOURCE LANGUAGE"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "'AUTO' IS AN INVALID SOURCE LANGUAGE");

        let err = check_response_status(&json!({"responseStatus": 429})).unwrap_err();
        assert_eq!(err.to_string(), "MyMemory API returned status 429");
    }
}
