//! 翻译提供商适配器
//!
//! 每个后端一个适配器，统一实现 [`TranslationProvider`]。适配器内部使用
//! `TranslationResult` 组织请求流程，在边界处统一转换为 [`TranslationOutcome`]，
//! 任何失败都不会以错误形式越过适配器边界。

pub mod google;
pub mod libre;
pub mod mock;
pub mod mymemory;

pub use google::GoogleProvider;
pub use libre::LibreTranslateProvider;
pub use mock::MockProvider;
pub use mymemory::MyMemoryProvider;

use async_trait::async_trait;
use serde_json::Value;

use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::types::{LanguageTag, TranslationOutcome};

/// 请求外部服务时使用的 User-Agent
pub const USER_AGENT: &str = concat!("transgate/", env!("CARGO_PKG_VERSION"));

/// 统一的翻译能力
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// 用于日志的提供商名称
    fn name(&self) -> &str;

    /// 翻译文本，所有失败路径都以 `Failure` 返回
    async fn translate(
        &self,
        text: &str,
        target_language: &LanguageTag,
        source_language: &LanguageTag,
    ) -> TranslationOutcome;
}

/// 创建各 HTTP 适配器共享的客户端
pub fn build_http_client() -> TranslationResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| TranslationError::Internal(format!("failed to build HTTP client: {}", e)))
}

/// 检查响应状态并解析 JSON 响应体
///
/// 非 2xx 响应时按 `error_pointer`（JSON Pointer）从错误体中提取提供商给出的消息，
/// 提取不到则退回到通用的状态码描述。
pub(crate) async fn read_json(
    response: reqwest::Response,
    error_pointer: &str,
) -> TranslationResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body, error_pointer).unwrap_or_else(|| {
            format!("Request failed with status code {}", status.as_u16())
        });
        return Err(TranslationError::HttpStatus {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// 从提供商的错误体中提取可读消息
pub(crate) fn extract_error_message(body: &str, pointer: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let found = value.pointer(pointer)?;
    let message = match found {
        Value::String(s) => s.clone(),
        Value::Object(map) => map.get("message")?.as_str()?.to_string(),
        _ => return None,
    };
    let message = message.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

/// 读取非空字符串字段
pub(crate) fn non_empty_str<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_shapes() {
        let google = r#"{"error":{"code":400,"message":"API key not valid."}}"#;
        assert_eq!(
            extract_error_message(google, "/error/message").as_deref(),
            Some("API key not valid.")
        );

        let libre = r#"{"error":"Visit https://portal.libretranslate.com to get an API key"}"#;
        assert!(extract_error_message(libre, "/error")
            .unwrap()
            .starts_with("Visit"));

        // 对象形式的 error 也能取到 message
        assert_eq!(
            extract_error_message(google, "/error").as_deref(),
            Some("API key not valid.")
        );
    }

    #[test]
    fn test_extract_error_message_is_defensive() {
        assert_eq!(extract_error_message("<html>502</html>", "/error"), None);
        assert_eq!(extract_error_message(r#"{"error":42}"#, "/error"), None);
        assert_eq!(extract_error_message(r#"{"error":"  "}"#, "/error"), None);
        assert_eq!(extract_error_message(r#"{}"#, "/error/message"), None);
    }

    #[test]
    fn test_non_empty_str() {
        let value = serde_json::json!({"a": {"b": "x", "c": ""}});
        assert_eq!(non_empty_str(&value, "/a/b"), Some("x"));
        assert_eq!(non_empty_str(&value, "/a/c"), None);
        assert_eq!(non_empty_str(&value, "/a/d"), None);
    }
}
