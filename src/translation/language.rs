//! 语言代码规范化
//!
//! 每个提供商使用的语言代码并不统一。这里按提供商维护一份映射表，
//! 把规范标签转换为线上协议需要的标签。未收录的标签原样透传。

use super::types::{LanguageTag, ProviderId};

/// MyMemory 与离线提供商不支持自动检测时使用的源语言
pub const AUTO_FALLBACK_SOURCE: &str = "en";

const GOOGLE_TAGS: &[(&str, &str)] = &[
    ("zh", "zh-CN"),
    ("zh-cn", "zh-CN"),
    ("zh-tw", "zh-TW"),
    ("he", "iw"),
];

const LIBRE_TAGS: &[(&str, &str)] = &[("zh-cn", "zh"), ("zh-tw", "zt")];

const MYMEMORY_TAGS: &[(&str, &str)] = &[
    ("en", "en"),
    ("es", "es"),
    ("fr", "fr"),
    ("de", "de"),
    ("it", "it"),
    ("pt", "pt"),
    ("ru", "ru"),
    ("ja", "ja"),
    ("ko", "ko"),
    ("zh", "zh"),
    ("ar", "ar"),
    ("hi", "hi"),
    ("zh-cn", "zh-CN"),
    ("zh-tw", "zh-TW"),
];

/// 将规范标签转换为指定提供商的线上标签
///
/// `auto` 对 Google 与 LibreTranslate 保持不变（前者由适配器省略参数，
/// 后者原样发送），对 MyMemory 和离线提供商替换为英语。
pub fn normalize(provider: ProviderId, tag: &LanguageTag) -> String {
    if tag.is_auto() {
        return match provider {
            ProviderId::Google | ProviderId::Libre => LanguageTag::AUTO.to_string(),
            ProviderId::MyMemory | ProviderId::Mock => AUTO_FALLBACK_SOURCE.to_string(),
        };
    }

    let table: &'static [(&'static str, &'static str)] = match provider {
        ProviderId::Google => GOOGLE_TAGS,
        ProviderId::Libre => LIBRE_TAGS,
        ProviderId::MyMemory => MYMEMORY_TAGS,
        ProviderId::Mock => &[],
    };

    lookup(table, tag.as_str())
        .unwrap_or(tag.as_str())
        .to_string()
}

fn lookup(table: &'static [(&'static str, &'static str)], tag: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(canonical, _)| *canonical == tag)
        .map(|(_, wire)| *wire)
}
