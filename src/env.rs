//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。每个变量是一个实现了 [`EnvVar`] 的单元结构体，
//! 自带名称、默认值、说明和解析规则。

use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// 环境变量解析错误
#[derive(Debug, Clone, Error)]
#[error("Environment variable '{variable}': {message}")]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// 仅在变量被显式设置时返回值，解析失败仍然报错
    fn get_set() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "TRANSGATE_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// 提供商模式
    pub struct Mode;
    impl EnvVar<String> for Mode {
        const NAME: &'static str = "TRANSGATE_MODE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str =
            "Provider mode: google, fallback (libre then mymemory), mymemory, mock";

        fn parse(value: &str) -> EnvResult<String> {
            let mode = value.trim().to_lowercase();
            match mode.as_str() {
                "google" | "primary" | "fallback" | "free" | "mymemory" | "mock" | "offline" => {
                    Ok(mode)
                }
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid mode '{}'. Use: google, fallback, mymemory, mock",
                        value
                    ),
                }),
            }
        }
    }

    /// 显式的提供商顺序，覆盖模式
    pub struct Providers;
    impl EnvVar<Vec<String>> for Providers {
        const NAME: &'static str = "TRANSGATE_PROVIDERS";
        const DEFAULT: Option<Vec<String>> = None;
        const DESCRIPTION: &'static str =
            "Ordered, comma-separated provider list (overrides TRANSGATE_MODE)";

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            let providers: Vec<String> = value
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            if providers.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Provider list cannot be empty".to_string(),
                });
            }
            Ok(providers)
        }
    }

    /// 旧版开关：强制使用离线提供商
    pub struct UseMock;
    impl EnvVar<bool> for UseMock {
        const NAME: &'static str = "USE_MOCK";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Legacy toggle: use the offline demo provider";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 旧版开关：只使用 MyMemory
    pub struct UseMyMemory;
    impl EnvVar<bool> for UseMyMemory {
        const NAME: &'static str = "USE_MYMEMORY";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Legacy toggle: use MyMemory only";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// Google API key
    pub struct GoogleApiKey;
    impl EnvVar<String> for GoogleApiKey {
        const NAME: &'static str = "GOOGLE_API_KEY";
        const DEFAULT: Option<String> = None; // 无默认值
        const DESCRIPTION: &'static str = "Google Cloud Translation API key";

        fn parse(value: &str) -> EnvResult<String> {
            let key = value.trim();
            if key.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API key cannot be empty".to_string(),
                });
            }
            Ok(key.to_string())
        }

        /// 空值视为未设置，常见于 `.env` 模板
        fn get_set() -> EnvResult<Option<String>> {
            Ok(non_blank(Self::NAME))
        }
    }

    /// Google API 地址
    pub struct GoogleUrl;
    impl EnvVar<String> for GoogleUrl {
        const NAME: &'static str = "TRANSGATE_GOOGLE_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Google Translate v2 endpoint URL";

        fn parse(value: &str) -> EnvResult<String> {
            parse_url(value, Self::NAME)
        }
    }

    /// LibreTranslate 地址
    pub struct LibreUrl;
    impl EnvVar<String> for LibreUrl {
        const NAME: &'static str = "TRANSGATE_LIBRE_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "LibreTranslate /translate endpoint URL";

        fn parse(value: &str) -> EnvResult<String> {
            parse_url(value, Self::NAME)
        }
    }

    /// LibreTranslate API key
    pub struct LibreApiKey;
    impl EnvVar<String> for LibreApiKey {
        const NAME: &'static str = "LIBRETRANSLATE_API_KEY";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "LibreTranslate API key (optional)";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }

        fn get_set() -> EnvResult<Option<String>> {
            Ok(non_blank(Self::NAME))
        }
    }

    /// MyMemory 地址
    pub struct MyMemoryUrl;
    impl EnvVar<String> for MyMemoryUrl {
        const NAME: &'static str = "TRANSGATE_MYMEMORY_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "MyMemory /get endpoint URL";

        fn parse(value: &str) -> EnvResult<String> {
            parse_url(value, Self::NAME)
        }
    }

    /// MyMemory 联系邮箱（提高免费额度）
    pub struct MyMemoryEmail;
    impl EnvVar<String> for MyMemoryEmail {
        const NAME: &'static str = "TRANSGATE_MYMEMORY_EMAIL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Contact e-mail sent to MyMemory for a larger quota";

        fn parse(value: &str) -> EnvResult<String> {
            let email = value.trim();
            if !email.contains('@') {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Must be a valid e-mail address".to_string(),
                });
            }
            Ok(email.to_string())
        }
    }

    /// 离线提供商的模拟延迟
    pub struct MockDelay;
    impl EnvVar<Duration> for MockDelay {
        const NAME: &'static str = "TRANSGATE_MOCK_DELAY_MS";
        const DEFAULT: Option<Duration> = Some(Duration::from_millis(500));
        const DESCRIPTION: &'static str = "Simulated latency of the offline provider in ms";

        fn parse(value: &str) -> EnvResult<Duration> {
            let millis: u64 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number of milliseconds".to_string(),
            })?;

            if millis > 10_000 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Delay too long (max 10000 ms)".to_string(),
                });
            }

            Ok(Duration::from_millis(millis))
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "TRANSGATE_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Web server bind address";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "TRANSGATE_WEB_PORT";
        const DEFAULT: Option<u16> = Some(3000);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port cannot be 0".to_string(),
                });
            }

            Ok(port)
        }
    }

    /// 静态文件目录
    pub struct StaticDir;
    impl EnvVar<String> for StaticDir {
        const NAME: &'static str = "TRANSGATE_WEB_STATIC_DIR";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Static files directory (empty disables file serving)";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("public".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }
}

// 辅助函数

/// 读取去掉首尾空白后的值，空值视为未设置
fn non_blank(var_name: &str) -> Option<String> {
    env::var(var_name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" | "" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

fn parse_url(value: &str, var_name: &str) -> EnvResult<String> {
    let raw = value.trim();
    match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(raw.to_string()),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: "URL must be an absolute http:// or https:// address".to_string(),
        }),
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    fn line<T: fmt::Debug, V: EnvVar<T>>(docs: &mut String) {
        docs.push_str(&format!(
            "- `{}`: {} (default: {:?})\n",
            V::NAME,
            V::DESCRIPTION,
            V::DEFAULT
        ));
    }

    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    line::<String, core::LogLevel>(&mut docs);
    line::<bool, core::NoColor>(&mut docs);

    docs.push_str("\n## Translation Configuration\n\n");
    line::<String, translation::Mode>(&mut docs);
    line::<Vec<String>, translation::Providers>(&mut docs);
    line::<bool, translation::UseMock>(&mut docs);
    line::<bool, translation::UseMyMemory>(&mut docs);
    line::<String, translation::GoogleApiKey>(&mut docs);
    line::<String, translation::GoogleUrl>(&mut docs);
    line::<String, translation::LibreUrl>(&mut docs);
    line::<String, translation::LibreApiKey>(&mut docs);
    line::<String, translation::MyMemoryUrl>(&mut docs);
    line::<String, translation::MyMemoryEmail>(&mut docs);
    line::<Duration, translation::MockDelay>(&mut docs);

    docs.push_str("\n## Web Server Configuration\n\n");
    line::<String, web::BindAddress>(&mut docs);
    line::<u16, web::Port>(&mut docs);
    line::<String, web::StaticDir>(&mut docs);

    docs
}
