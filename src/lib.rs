//! # Transgate
//!
//! 文本翻译网关：接收一段文本和目标语言，按优先级依次尝试多个翻译后端
//! （Google、LibreTranslate、MyMemory、离线演示），返回统一的成功/失败结果。
//!
//! ## 模块组织
//!
//! - `translation` - 请求校验、语言规范化、提供商适配器与回退编排
//! - `web` - HTTP 端点和静态页面
//! - `env` - 类型安全的环境变量
//! - `logging` - 日志初始化

pub mod env;
pub mod logging;
pub mod translation;
pub mod web;

pub use translation::{
    FallbackOrchestrator, LanguageTag, ProviderId, TranslationConfig, TranslationError,
    TranslationOutcome, TranslationRequest, TranslationResult,
};
pub use web::{WebConfig, WebServer};
