//! 离线演示提供商
//!
//! 不访问网络，基于一张很小的英语短语表做整句或逐词替换，
//! 查不到的内容原样返回并带上可见的 `[DEMO]` 标记。用于无网络环境下的测试与演示。

use std::time::Duration;

use async_trait::async_trait;

use super::TranslationProvider;
use crate::translation::language::normalize;
use crate::translation::types::{LanguageTag, ProviderId, TranslationOutcome};

pub const DEMO_MARKER: &str = "[DEMO]";

const EN_ES: &[(&str, &str)] = &[
    ("hello", "hola"),
    ("goodbye", "adiós"),
    ("thank you", "gracias"),
    ("please", "por favor"),
    ("how are you", "cómo estás"),
    ("good morning", "buenos días"),
    ("good night", "buenas noches"),
    ("yes", "sí"),
    ("no", "no"),
];

const EN_FR: &[(&str, &str)] = &[
    ("hello", "bonjour"),
    ("goodbye", "au revoir"),
    ("thank you", "merci"),
    ("please", "s'il vous plaît"),
    ("how are you", "comment allez-vous"),
    ("good morning", "bonjour"),
    ("good night", "bonne nuit"),
    ("yes", "oui"),
    ("no", "non"),
];

const EN_DE: &[(&str, &str)] = &[
    ("hello", "hallo"),
    ("goodbye", "auf wiedersehen"),
    ("thank you", "danke"),
    ("please", "bitte"),
    ("how are you", "wie geht es dir"),
    ("good morning", "guten morgen"),
    ("good night", "gute nacht"),
    ("yes", "ja"),
    ("no", "nein"),
];

fn phrase_table(source: &str, target: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match (source, target) {
        ("en", "es") => Some(EN_ES),
        ("en", "fr") => Some(EN_FR),
        ("en", "de") => Some(EN_DE),
        _ => None,
    }
}

fn lookup(table: &[(&'static str, &'static str)], phrase: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == phrase)
        .map(|(_, to)| *to)
}

/// 确定性的离线翻译，没有隐藏状态
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    delay: Duration,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 模拟网络延迟
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// 同步的翻译逻辑
    pub fn translate_offline(
        &self,
        text: &str,
        target_language: &LanguageTag,
        source_language: &LanguageTag,
    ) -> TranslationOutcome {
        let source = normalize(ProviderId::Mock, source_language);
        let target = normalize(ProviderId::Mock, target_language);

        let Some(table) = phrase_table(&source, &target) else {
            return TranslationOutcome::success(
                format!("[DEMO Translation to {}] {}", target, text),
                source,
            );
        };

        if let Some(phrase) = lookup(table, &text.to_lowercase()) {
            return TranslationOutcome::success(phrase, source);
        }

        let translated = text
            .split(' ')
            .map(|word| lookup(table, &word.to_lowercase()).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ");

        TranslationOutcome::success(format!("{} {}", DEMO_MARKER, translated), source)
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        ProviderId::Mock.as_str()
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &LanguageTag,
        source_language: &LanguageTag,
    ) -> TranslationOutcome {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.translate_offline(text, target_language, source_language)
    }
}
