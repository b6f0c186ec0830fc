//! Web 模块的数据类型定义

use std::sync::Arc;

use serde::Serialize;

use crate::translation::FallbackOrchestrator;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const NOT_FOUND_HTML: &str = "<h1>404 - File Not Found</h1>";

/// 应用状态，请求之间只读共享
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<FallbackOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: FallbackOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// 边界层错误响应体，与失败的翻译结果同形
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
