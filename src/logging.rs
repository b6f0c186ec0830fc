//! 日志初始化
//!
//! 过滤规则优先使用 `RUST_LOG`，否则使用 `TRANSGATE_LOG_LEVEL`（默认 `info`）。
//! 日志写到 stderr，stdout 留给命令输出。

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::env::{core, EnvResult, EnvVar};

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub no_color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            no_color: false,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            level: core::LogLevel::get()?,
            no_color: core::NoColor::get()?,
        })
    }

    /// 命令行的 `-v` 次数提升日志级别
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        match verbosity {
            0 => {}
            1 => self.level = "debug".to_string(),
            _ => self.level = "trace".to_string(),
        }
        self
    }
}

/// 构造过滤器，`RUST_LOG` 优先
pub fn create_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// 安装全局日志订阅者，重复调用时返回错误信息
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(create_env_filter(config))
        .with_target(true)
        .with_ansi(!config.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_raises_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.clone().with_verbosity(0).level, "info");
        assert_eq!(config.clone().with_verbosity(1).level, "debug");
        assert_eq!(config.with_verbosity(3).level, "trace");
    }
}
