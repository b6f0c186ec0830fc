//! 翻译配置管理
//!
//! 配置按三层合并，优先级从低到高：
//!
//! 1. `TranslationConfig::default()`
//! 2. TOML/JSON 配置文件（`--config` 指定，或按 [`constants::CONFIG_PATHS`] 搜索）
//! 3. 环境变量（启动时先加载 `.env` 文件）
//!
//! 合并结果在启动时转换为不可变的 [`ProviderSpec`]，之后不再读取进程环境。

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{TranslationError, TranslationResult};
use super::providers::{google, libre, mymemory};
use super::types::ProviderId;

/// 配置常量
pub mod constants {
    /// 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "transgate.toml",
        "config/transgate.toml",
        "~/.config/transgate/config.toml",
    ];

    /// 按顺序尝试加载的 .env 文件
    pub const ENV_FILES: &[&str] = &[".env.local", ".env"];

    pub const DEFAULT_MOCK_DELAY_MS: u64 = 500;
    pub const MAX_TIMEOUT_SECS: u64 = 300;
}

/// 提供商模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// 只使用需要 key 的 Google
    Google,
    /// LibreTranslate 优先，MyMemory 兜底
    #[default]
    Fallback,
    /// 只使用 MyMemory
    MyMemory,
    /// 只使用离线提供商
    Mock,
}

impl ProviderMode {
    /// 模式对应的默认提供商顺序
    pub fn providers(&self) -> Vec<ProviderId> {
        match self {
            ProviderMode::Google => vec![ProviderId::Google],
            ProviderMode::Fallback => vec![ProviderId::Libre, ProviderId::MyMemory],
            ProviderMode::MyMemory => vec![ProviderId::MyMemory],
            ProviderMode::Mock => vec![ProviderId::Mock],
        }
    }
}

impl FromStr for ProviderMode {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" | "primary" => Ok(ProviderMode::Google),
            "fallback" | "free" => Ok(ProviderMode::Fallback),
            "mymemory" => Ok(ProviderMode::MyMemory),
            "mock" | "offline" => Ok(ProviderMode::Mock),
            other => Err(TranslationError::Config(format!(
                "unknown mode '{}'. Use: google, fallback, mymemory, mock",
                other
            ))),
        }
    }
}

/// Google 设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            api_url: google::DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout_secs: google::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// LibreTranslate 设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibreSettings {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LibreSettings {
    fn default() -> Self {
        Self {
            api_url: libre::DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout_secs: libre::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// MyMemory 设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MyMemorySettings {
    pub api_url: String,
    pub email: Option<String>,
    pub timeout_secs: u64,
}

impl Default for MyMemorySettings {
    fn default() -> Self {
        Self {
            api_url: mymemory::DEFAULT_API_URL.to_string(),
            email: None,
            timeout_secs: mymemory::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// 离线提供商设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockSettings {
    pub delay_ms: u64,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            delay_ms: constants::DEFAULT_MOCK_DELAY_MS,
        }
    }
}

/// 翻译配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub mode: ProviderMode,
    /// 显式的提供商顺序，非空时覆盖 `mode`
    pub providers: Vec<ProviderId>,
    pub google: GoogleSettings,
    pub libre: LibreSettings,
    pub mymemory: MyMemorySettings,
    pub mock: MockSettings,
}

/// 从环境变量收集到的覆盖项
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub mode: Option<String>,
    pub providers: Option<Vec<String>>,
    pub use_mock: bool,
    pub use_mymemory: bool,
    pub google_api_key: Option<String>,
    pub google_url: Option<String>,
    pub libre_url: Option<String>,
    pub libre_api_key: Option<String>,
    pub mymemory_url: Option<String>,
    pub mymemory_email: Option<String>,
    pub mock_delay: Option<Duration>,
}

impl EnvOverrides {
    /// 读取当前进程的环境变量
    pub fn from_env() -> TranslationResult<Self> {
        Self::read(true)
    }

    /// 只读取提供商设置，忽略 `TRANSGATE_PROVIDERS`、`TRANSGATE_MODE` 和旧版开关
    pub fn from_env_without_selection() -> TranslationResult<Self> {
        Self::read(false)
    }

    fn read(selection: bool) -> TranslationResult<Self> {
        use crate::env::{translation, EnvVar};

        let mut overrides = Self::default();
        if selection {
            overrides.mode = translation::Mode::get_set()?;
            overrides.providers = translation::Providers::get_set()?;
            overrides.use_mock = translation::UseMock::get()?;
            overrides.use_mymemory = translation::UseMyMemory::get()?;
        }

        Ok(Self {
            google_api_key: translation::GoogleApiKey::get_set()?,
            google_url: translation::GoogleUrl::get_set()?,
            libre_url: translation::LibreUrl::get_set()?,
            libre_api_key: translation::LibreApiKey::get_set()?,
            mymemory_url: translation::MyMemoryUrl::get_set()?,
            mymemory_email: translation::MyMemoryEmail::get_set()?,
            mock_delay: translation::MockDelay::get_set()?,
            ..overrides
        })
    }
}

impl TranslationConfig {
    /// 加载完整配置：.env、配置文件、环境变量
    ///
    /// `mode` 来自命令行，给出时优先于所有环境变量和配置文件中的提供商选择。
    pub fn load(path: Option<&Path>, mode: Option<ProviderMode>) -> TranslationResult<Self> {
        Self::load_dotenv();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::find_config_file() {
                Some(found) => {
                    tracing::info!("加载配置文件: {}", found.display());
                    Self::from_file(&found)?
                }
                None => {
                    tracing::info!("未找到配置文件，使用默认配置");
                    Self::default()
                }
            },
        };

        let overrides = match mode {
            Some(_) => EnvOverrides::from_env_without_selection()?,
            None => EnvOverrides::from_env()?,
        };
        config.apply_overrides(overrides)?;
        if let Some(mode) = mode {
            config.select_mode(mode);
        }
        config.validate()?;
        Ok(config)
    }

    /// 切换到指定模式，清空显式的提供商顺序
    pub fn select_mode(&mut self, mode: ProviderMode) {
        self.mode = mode;
        self.providers.clear();
    }

    /// 从指定文件加载配置
    pub fn from_file(path: &Path) -> TranslationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranslationError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&content).map_err(|e| {
                TranslationError::Config(format!("failed to parse JSON config: {}", e))
            })
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    fn find_config_file() -> Option<PathBuf> {
        constants::CONFIG_PATHS
            .iter()
            .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()))
            .find(|path| path.exists())
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        for env_file in constants::ENV_FILES {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 应用环境变量覆盖
    ///
    /// 选择提供商的优先级：`TRANSGATE_PROVIDERS` > `TRANSGATE_MODE` > `USE_MYMEMORY` > `USE_MOCK`。
    pub fn apply_overrides(&mut self, overrides: EnvOverrides) -> TranslationResult<()> {
        if let Some(providers) = overrides.providers {
            self.providers = providers
                .iter()
                .map(|p| p.parse::<ProviderId>())
                .collect::<TranslationResult<Vec<_>>>()?;
        } else if let Some(mode) = overrides.mode {
            self.select_mode(mode.parse()?);
        } else if overrides.use_mymemory {
            self.select_mode(ProviderMode::MyMemory);
        } else if overrides.use_mock {
            self.select_mode(ProviderMode::Mock);
        }

        if let Some(key) = overrides.google_api_key {
            self.google.api_key = Some(key);
        }
        if let Some(url) = overrides.google_url {
            self.google.api_url = url;
        }
        if let Some(url) = overrides.libre_url {
            tracing::info!("环境变量覆盖 LibreTranslate 地址: {}", url);
            self.libre.api_url = url;
        }
        if let Some(key) = overrides.libre_api_key {
            self.libre.api_key = Some(key);
        }
        if let Some(url) = overrides.mymemory_url {
            self.mymemory.api_url = url;
        }
        if let Some(email) = overrides.mymemory_email {
            self.mymemory.email = Some(email);
        }
        if let Some(delay) = overrides.mock_delay {
            self.mock.delay_ms = delay.as_millis() as u64;
        }

        Ok(())
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        for (name, api_url) in [
            ("google", &self.google.api_url),
            ("libre", &self.libre.api_url),
            ("mymemory", &self.mymemory.api_url),
        ] {
            let parsed = url::Url::parse(api_url).map_err(|e| {
                TranslationError::Config(format!("invalid {} api_url '{}': {}", name, api_url, e))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(TranslationError::Config(format!(
                    "{} api_url must use http or https",
                    name
                )));
            }
        }

        for (name, secs) in [
            ("google", self.google.timeout_secs),
            ("libre", self.libre.timeout_secs),
            ("mymemory", self.mymemory.timeout_secs),
        ] {
            if secs == 0 || secs > constants::MAX_TIMEOUT_SECS {
                return Err(TranslationError::Config(format!(
                    "{} timeout_secs must be between 1 and {}",
                    name,
                    constants::MAX_TIMEOUT_SECS
                )));
            }
        }

        let spec = ProviderSpec::from_config(self)?;
        if spec.contains(ProviderId::Google) && self.google.api_key.is_none() {
            // 不阻止启动，Google 调用会以 Failure 返回并触发回退
            tracing::warn!("已选择 Google 提供商但未配置 GOOGLE_API_KEY");
        }

        Ok(())
    }

    /// 生成示例配置（不包含密钥）
    pub fn to_example_toml(&self) -> TranslationResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TranslationError::Internal(format!("failed to serialize config: {}", e)))
    }
}

/// 启动时确定的提供商顺序，之后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    order: Vec<ProviderId>,
}

impl ProviderSpec {
    /// 创建提供商顺序，重复项只保留第一次出现
    pub fn new(order: Vec<ProviderId>) -> TranslationResult<Self> {
        let mut deduped: Vec<ProviderId> = Vec::with_capacity(order.len());
        for id in order {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }

        if deduped.is_empty() {
            return Err(TranslationError::Config(
                "at least one translation provider must be configured".to_string(),
            ));
        }

        Ok(Self { order: deduped })
    }

    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        if config.providers.is_empty() {
            Self::new(config.mode.providers())
        } else {
            Self::new(config.providers.clone())
        }
    }

    pub fn order(&self) -> &[ProviderId] {
        &self.order
    }

    pub fn contains(&self, id: ProviderId) -> bool {
        self.order.contains(&id)
    }
}
