//! Web 路由定义

use std::sync::Arc;

use axum::{routing::post, Router};

use crate::web::{handlers::*, types::AppState};

/// 翻译端点，`/api/translate` 是浏览器页面使用的路径
pub const TRANSLATE_PATHS: &[&str] = &["/translate", "/api/translate"];

/// 创建 API 路由
pub fn create_routes() -> Router<Arc<AppState>> {
    TRANSLATE_PATHS.iter().fold(Router::new(), |router, path| {
        router.route(
            path,
            post(translate)
                .options(preflight)
                .fallback(method_not_allowed),
        )
    })
}
