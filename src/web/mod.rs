//! Web 服务器模块
//!
//! 对外暴露 JSON 翻译端点，其余路径提供静态页面

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::{handler::HandlerWithoutStateExt, Router};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::translation::{FallbackOrchestrator, TranslationError, TranslationResult};

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, orchestrator: FallbackOrchestrator) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(orchestrator)),
        }
    }

    /// 构造路由，不绑定端口
    pub fn router(&self) -> Router {
        create_router(Arc::clone(&self.state), &self.config)
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> TranslationResult<()> {
        self.config.validate()?;

        let app = self.router();
        let listener = tokio::net::TcpListener::bind(self.config.listen_address())
            .await
            .map_err(|e| TranslationError::Internal(format!("Failed to bind server: {}", e)))?;

        tracing::info!(
            "Web server starting at http://{} (providers: {})",
            self.config.listen_address(),
            self.state.orchestrator.provider_names().join(" -> ")
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TranslationError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    let app = create_routes().with_state(app_state);

    // 其余路径交给静态文件服务
    let app = match &config.static_dir {
        Some(static_dir) => app.fallback_service(
            ServeDir::new(static_dir).not_found_service(handlers::not_found.into_service()),
        ),
        None => app.fallback(handlers::not_found),
    };

    app.layer(CorsLayer::permissive())
}
