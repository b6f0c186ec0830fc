//! 翻译核心
//!
//! - `types` - 请求、语言标签与统一结果
//! - `language` - 按提供商规范化语言代码
//! - `providers` - 各翻译后端的适配器
//! - `orchestrator` - 按优先级回退的编排器
//! - `config` - 配置加载与提供商顺序
//! - `error` - 错误类型

pub mod config;
pub mod error;
pub mod language;
pub mod orchestrator;
pub mod providers;
pub mod types;

pub use config::{ProviderMode, ProviderSpec, TranslationConfig};
pub use error::{TranslationError, TranslationResult};
pub use orchestrator::FallbackOrchestrator;
pub use providers::TranslationProvider;
pub use types::{LanguageTag, ProviderId, TranslationOutcome, TranslationRequest};
