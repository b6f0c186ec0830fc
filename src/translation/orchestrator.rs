//! 提供商回退编排
//!
//! 按配置的优先级顺序依次调用提供商，遇到第一个成功结果即返回；
//! 全部失败时返回最后一个提供商的失败结果。单次请求内严格串行，
//! 没有重试、退避或熔断。

use std::sync::Arc;
use std::time::Duration;

use super::config::{ProviderSpec, TranslationConfig};
use super::error::TranslationResult;
use super::providers::{
    build_http_client, GoogleProvider, LibreTranslateProvider, MockProvider, MyMemoryProvider,
    TranslationProvider,
};
use super::types::{ProviderId, TranslationOutcome, TranslationRequest};

pub const NO_PROVIDERS_MESSAGE: &str = "No translation providers configured";

/// 回退编排器，启动后只读，可在并发请求间共享
#[derive(Clone)]
pub struct FallbackOrchestrator {
    providers: Vec<Arc<dyn TranslationProvider>>,
}

impl FallbackOrchestrator {
    /// 使用已构造好的提供商列表创建编排器，顺序即优先级
    pub fn new(providers: Vec<Arc<dyn TranslationProvider>>) -> Self {
        Self { providers }
    }

    /// 按提供商顺序和配置构造真实的适配器
    pub fn from_spec(spec: &ProviderSpec, config: &TranslationConfig) -> TranslationResult<Self> {
        let client = build_http_client()?;

        let providers = spec
            .order()
            .iter()
            .map(|id| -> Arc<dyn TranslationProvider> {
                match id {
                    ProviderId::Google => Arc::new(GoogleProvider::new(
                        client.clone(),
                        config.google.api_url.clone(),
                        config.google.api_key.clone(),
                        Duration::from_secs(config.google.timeout_secs),
                    )),
                    ProviderId::Libre => Arc::new(LibreTranslateProvider::new(
                        client.clone(),
                        config.libre.api_url.clone(),
                        config.libre.api_key.clone(),
                        Duration::from_secs(config.libre.timeout_secs),
                    )),
                    ProviderId::MyMemory => Arc::new(MyMemoryProvider::new(
                        client.clone(),
                        config.mymemory.api_url.clone(),
                        config.mymemory.email.clone(),
                        Duration::from_secs(config.mymemory.timeout_secs),
                    )),
                    ProviderId::Mock => Arc::new(
                        MockProvider::new()
                            .with_delay(Duration::from_millis(config.mock.delay_ms)),
                    ),
                }
            })
            .collect();

        Ok(Self::new(providers))
    }

    /// 从配置直接构造
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        let spec = ProviderSpec::from_config(config)?;
        Self::from_spec(&spec, config)
    }

    /// 当前的提供商顺序（名称）
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// 执行一次回退链
    pub async fn orchestrate(&self, request: &TranslationRequest) -> TranslationOutcome {
        let mut last_failure = None;

        for (attempt, provider) in self.providers.iter().enumerate() {
            tracing::debug!(
                "尝试提供商 {} (第 {}/{} 个)",
                provider.name(),
                attempt + 1,
                self.providers.len()
            );

            let outcome = provider
                .translate(
                    &request.text,
                    &request.target_language,
                    &request.source_language,
                )
                .await;

            match outcome {
                TranslationOutcome::Success { .. } => {
                    tracing::info!("提供商 {} 翻译成功", provider.name());
                    return outcome;
                }
                TranslationOutcome::Failure { ref error_message } => {
                    tracing::warn!(
                        "提供商 {} 翻译失败: {}，尝试下一个",
                        provider.name(),
                        error_message
                    );
                    last_failure = Some(outcome);
                }
            }
        }

        tracing::error!("所有提供商均翻译失败");
        last_failure.unwrap_or_else(|| TranslationOutcome::failure(NO_PROVIDERS_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::types::LanguageTag;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录调用顺序并返回固定结果的提供商
    struct ScriptedProvider {
        name: &'static str,
        outcome: TranslationOutcome,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl TranslationProvider for ScriptedProvider {
        fn name(&self) -> &str {
            self.name
        }

        async fn translate(
            &self,
            _text: &str,
            _target_language: &LanguageTag,
            _source_language: &LanguageTag,
        ) -> TranslationOutcome {
            self.calls.lock().unwrap().push(self.name);
            self.outcome.clone()
        }
    }

    fn scripted(
        name: &'static str,
        outcome: TranslationOutcome,
        calls: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Arc<dyn TranslationProvider> {
        Arc::new(ScriptedProvider {
            name,
            outcome,
            calls: Arc::clone(calls),
        })
    }

    fn request() -> TranslationRequest {
        TranslationRequest::new(Some("hello"), None, Some("es")).unwrap()
    }

    #[tokio::test]
    async fn test_first_failure_falls_through_to_second() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let orchestrator = FallbackOrchestrator::new(vec![
            scripted("a", TranslationOutcome::failure("a is down"), &calls),
            scripted("b", TranslationOutcome::success("hola", "en"), &calls),
        ]);

        let outcome = orchestrator.orchestrate(&request()).await;

        assert_eq!(outcome, TranslationOutcome::success("hola", "en"));
        assert_eq!(*calls.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_stops_at_first_success() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let orchestrator = FallbackOrchestrator::new(vec![
            scripted("a", TranslationOutcome::success("hola", "en"), &calls),
            scripted("b", TranslationOutcome::success("buenas", "en"), &calls),
        ]);

        let outcome = orchestrator.orchestrate(&request()).await;

        assert_eq!(outcome.translated_text(), Some("hola"));
        assert_eq!(*calls.lock().unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_failure() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let orchestrator = FallbackOrchestrator::new(vec![
            scripted("a", TranslationOutcome::failure("first"), &calls),
            scripted("b", TranslationOutcome::failure("second"), &calls),
            scripted("c", TranslationOutcome::failure("third"), &calls),
        ]);

        let outcome = orchestrator.orchestrate(&request()).await;

        assert_eq!(outcome, TranslationOutcome::failure("third"));
        assert_eq!(*calls.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_empty_chain_fails() {
        let orchestrator = FallbackOrchestrator::new(Vec::new());
        let outcome = orchestrator.orchestrate(&request()).await;
        assert_eq!(outcome.error_message(), Some(NO_PROVIDERS_MESSAGE));
    }

    #[test]
    fn test_from_spec_keeps_configured_order() {
        let spec = ProviderSpec::new(vec![ProviderId::Mock, ProviderId::Google, ProviderId::Libre])
            .unwrap();
        let orchestrator =
            FallbackOrchestrator::from_spec(&spec, &TranslationConfig::default()).unwrap();
        assert_eq!(orchestrator.provider_names(), vec!["mock", "google", "libre"]);
    }
}
