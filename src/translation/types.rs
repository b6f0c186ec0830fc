//! 翻译请求、语言标签与统一结果类型

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{TranslationError, TranslationResult};

/// 单次请求允许的最大字符数（与浏览器端限制一致）
pub const MAX_TEXT_CHARS: usize = 5000;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: text and targetLanguage";

/// 翻译提供商标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Google Cloud Translation (需要 API key)
    Google,
    /// LibreTranslate 社区实例
    Libre,
    /// MyMemory 翻译记忆库
    MyMemory,
    /// 离线演示提供商
    Mock,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Google => "google",
            ProviderId::Libre => "libre",
            ProviderId::MyMemory => "mymemory",
            ProviderId::Mock => "mock",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(ProviderId::Google),
            "libre" | "libretranslate" => Ok(ProviderId::Libre),
            "mymemory" => Ok(ProviderId::MyMemory),
            "mock" | "offline" => Ok(ProviderId::Mock),
            other => Err(TranslationError::Config(format!(
                "unknown provider '{}'. Use: google, libre, mymemory, mock",
                other
            ))),
        }
    }
}

/// 规范语言标签，`auto` 表示调用时自动检测
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    pub const AUTO: &'static str = "auto";

    pub fn new(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            Self::auto()
        } else {
            Self(tag)
        }
    }

    pub fn auto() -> Self {
        Self(Self::AUTO.to_string())
    }

    pub fn is_auto(&self) -> bool {
        self.0 == Self::AUTO
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self::auto()
    }
}

impl From<&str> for LanguageTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for LanguageTag {
    fn from(tag: String) -> Self {
        Self::new(&tag)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 已验证的翻译请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: LanguageTag,
    pub target_language: LanguageTag,
}

impl TranslationRequest {
    /// 校验原始字段并构造请求
    ///
    /// 文本去除空白后不能为空，目标语言必须存在，源语言缺省为 `auto`。
    pub fn new(
        text: Option<&str>,
        source_language: Option<&str>,
        target_language: Option<&str>,
    ) -> TranslationResult<Self> {
        let text = text.filter(|t| !t.trim().is_empty());
        let target = target_language.filter(|t| !t.trim().is_empty());

        let (text, target) = match (text, target) {
            (Some(text), Some(target)) => (text, target),
            _ => return Err(TranslationError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string())),
        };

        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(TranslationError::InvalidInput(format!(
                "Text exceeds maximum length of {} characters",
                MAX_TEXT_CHARS
            )));
        }

        Ok(Self {
            text: text.to_string(),
            source_language: source_language.map(LanguageTag::new).unwrap_or_default(),
            target_language: LanguageTag::new(target),
        })
    }
}

/// 统一的翻译结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Success {
        translated_text: String,
        detected_source_language: LanguageTag,
    },
    Failure {
        error_message: String,
    },
}

impl TranslationOutcome {
    pub fn success(translated_text: impl Into<String>, detected: impl Into<LanguageTag>) -> Self {
        TranslationOutcome::Success {
            translated_text: translated_text.into(),
            detected_source_language: detected.into(),
        }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        TranslationOutcome::Failure {
            error_message: error_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TranslationOutcome::Success { .. })
    }

    pub fn translated_text(&self) -> Option<&str> {
        match self {
            TranslationOutcome::Success { translated_text, .. } => Some(translated_text),
            TranslationOutcome::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            TranslationOutcome::Success { .. } => None,
            TranslationOutcome::Failure { error_message } => Some(error_message),
        }
    }
}

/// 适配器内部结果到统一结果的转换
impl From<TranslationResult<TranslationOutcome>> for TranslationOutcome {
    fn from(result: TranslationResult<TranslationOutcome>) -> Self {
        match result {
            Ok(outcome) => outcome,
            Err(e) => TranslationOutcome::failure(e.to_string()),
        }
    }
}

impl Serialize for TranslationOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        match self {
            TranslationOutcome::Success {
                translated_text,
                detected_source_language,
            } => {
                let mut s = serializer.serialize_struct("TranslationOutcome", 3)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("translatedText", translated_text)?;
                s.serialize_field("detectedSourceLanguage", detected_source_language.as_str())?;
                s.end()
            }
            TranslationOutcome::Failure { error_message } => {
                let mut s = serializer.serialize_struct("TranslationOutcome", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error_message)?;
                s.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TranslationOutcome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            success: bool,
            translated_text: Option<String>,
            detected_source_language: Option<String>,
            error: Option<String>,
        }
        let raw = Raw::deserialize(deserializer)?;
        if raw.success {
            let translated = raw
                .translated_text
                .ok_or_else(|| serde::de::Error::missing_field("translatedText"))?;
            Ok(TranslationOutcome::success(
                translated,
                raw.detected_source_language.unwrap_or_default(),
            ))
        } else {
            Ok(TranslationOutcome::failure(raw.error.unwrap_or_default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_source_to_auto() {
        let request = TranslationRequest::new(Some("hello"), None, Some("es")).unwrap();
        assert!(request.source_language.is_auto());
        assert_eq!(request.target_language.as_str(), "es");
        assert_eq!(request.text, "hello");
    }

    #[test]
    fn test_request_rejects_blank_text_and_missing_target() {
        for text in [None, Some(""), Some("   \n\t")] {
            let err = TranslationRequest::new(text, None, Some("es")).unwrap_err();
            assert_eq!(err, TranslationError::InvalidInput(MISSING_FIELDS_MESSAGE.into()));
        }
        assert!(TranslationRequest::new(Some("hello"), Some("en"), None).is_err());
        assert!(TranslationRequest::new(Some("hello"), Some("en"), Some(" ")).is_err());
    }

    #[test]
    fn test_request_enforces_length_limit() {
        let at_limit = "a".repeat(MAX_TEXT_CHARS);
        assert!(TranslationRequest::new(Some(&at_limit), None, Some("fr")).is_ok());

        let over = "é".repeat(MAX_TEXT_CHARS + 1);
        let err = TranslationRequest::new(Some(&over), None, Some("fr")).unwrap_err();
        assert!(err.to_string().contains("5000"));
    }

    #[test]
    fn test_language_tag_normalizes_input() {
        assert_eq!(LanguageTag::new(" ES ").as_str(), "es");
        assert!(LanguageTag::new("").is_auto());
        assert!(LanguageTag::from("AUTO").is_auto());
    }

    #[test]
    fn test_provider_id_parsing() {
        assert_eq!("LibreTranslate".parse::<ProviderId>().unwrap(), ProviderId::Libre);
        assert_eq!("offline".parse::<ProviderId>().unwrap(), ProviderId::Mock);
        assert!("deepl".parse::<ProviderId>().is_err());
    }

    #[test]
    fn test_outcome_wire_shape() {
        let success = TranslationOutcome::success("hola", "en");
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            serde_json::json!({
                "success": true,
                "translatedText": "hola",
                "detectedSourceLanguage": "en"
            })
        );

        let failure = TranslationOutcome::failure("quota exceeded");
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            serde_json::json!({ "success": false, "error": "quota exceeded" })
        );

        let parsed: TranslationOutcome =
            serde_json::from_str(r#"{"success":false,"error":"down"}"#).unwrap();
        assert_eq!(parsed.error_message(), Some("down"));
    }
}
