//! 请求处理器

pub mod translate;

pub use translate::*;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};

use crate::web::types::{ErrorResponse, METHOD_NOT_ALLOWED_MESSAGE, NOT_FOUND_HTML};

/// 翻译端点的 CORS 预检，返回空响应体
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// 翻译端点上的其他方法
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}

/// 静态文件不存在
pub async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML))
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}
