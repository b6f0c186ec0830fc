//! 翻译 API 处理器

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

use super::error_response;
use crate::translation::TranslationRequest;
use crate::web::types::{AppState, INVALID_JSON_MESSAGE};

/// 翻译请求处理器
///
/// 成功与失败的翻译结果都以 200 返回，由 `success` 字段区分。
/// 请求体不是合法 JSON 时返回 500，字段缺失或非字符串时返回 400。
pub async fn translate(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("请求体解析失败: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, INVALID_JSON_MESSAGE);
        }
    };

    let field = |name: &str| payload.get(name).and_then(Value::as_str);
    let request = match TranslationRequest::new(
        field("text"),
        field("sourceLanguage"),
        field("targetLanguage"),
    ) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("请求校验失败: {}", e);
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    tracing::info!(
        "翻译请求: {} -> {} ({} 字符)",
        request.source_language,
        request.target_language,
        request.text.chars().count()
    );

    let outcome = state.orchestrator.orchestrate(&request).await;
    (StatusCode::OK, Json(outcome)).into_response()
}
