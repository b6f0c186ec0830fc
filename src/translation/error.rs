//! 翻译模块统一错误处理
//!
//! 适配器内的任何错误（包括缺少 key 时的 `Config`）都在适配器边界转换为 `Failure`
//! 并触发回退。`InvalidInput` 在 HTTP 边界返回 400，加载配置时的错误使启动失败。

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 输入验证错误
    #[error("{0}")]
    InvalidInput(String),

    /// 配置错误
    #[error("configuration error: {0}")]
    Config(String),

    /// 网络错误
    #[error("{0}")]
    Network(String),

    /// 超时错误
    #[error("{0}")]
    Timeout(String),

    /// 服务端返回非 2xx 状态
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    /// 2xx 响应但结构不符合预期
    #[error("{0}")]
    InvalidResponse(String),

    /// 内部错误
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslationError::Timeout(format!("request timed out: {}", error))
        } else if error.is_decode() {
            TranslationError::InvalidResponse(format!("failed to decode response body: {}", error))
        } else if let Some(status) = error.status() {
            TranslationError::HttpStatus {
                status: status.as_u16(),
                message: format!("Request failed with status code {}", status.as_u16()),
            }
        } else {
            TranslationError::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::InvalidResponse(format!("malformed JSON: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::Config(format!("TOML parse error: {}", error))
    }
}

impl From<crate::env::EnvError> for TranslationError {
    fn from(error: crate::env::EnvError) -> Self {
        TranslationError::Config(error.to_string())
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_provider_message_verbatim() {
        let err = TranslationError::HttpStatus {
            status: 403,
            message: "API key not valid".into(),
        };
        assert_eq!(err.to_string(), "API key not valid");

        let err = TranslationError::Config("Google API key is not configured".into());
        assert_eq!(
            err.to_string(),
            "configuration error: Google API key is not configured"
        );
    }

    #[test]
    fn test_env_error_becomes_config_error() {
        let err: TranslationError = crate::env::EnvError {
            variable: "TRANSGATE_MODE".into(),
            message: "bad mode".into(),
        }
        .into();
        assert_eq!(
            err,
            TranslationError::Config("Environment variable 'TRANSGATE_MODE': bad mode".into())
        );
    }
}
