// 集成测试公共模块
//
// 在本地随机端口上启动替身服务，模拟各翻译后端的 HTTP 行为

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::Query,
    http::StatusCode,
    routing::{any, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// 替身服务收到的请求记录
pub type Recorded = Arc<Mutex<Vec<Value>>>;

/// 启动替身服务，返回其根地址
pub async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });

    format!("http://{}", addr)
}

/// 总是返回 403 的 Google 替身
pub fn google_forbidden() -> Router {
    Router::new().route(
        "/translate",
        post(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": {"code": 403, "message": "API key not valid. Please pass a valid API key."}
                })),
            )
        }),
    )
}

/// 记录查询参数并返回给定响应体的 Google 替身
pub fn google_ok(response: Value, recorded: Recorded) -> Router {
    Router::new().route(
        "/translate",
        post(move |Query(params): Query<HashMap<String, String>>| {
            let recorded = Arc::clone(&recorded);
            let response = response.clone();
            async move {
                recorded.lock().unwrap().push(json!(params));
                Json(response)
            }
        }),
    )
}

/// 对任意方法都返回固定状态码和响应体的替身
pub fn fixed_response(path: &'static str, status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        path,
        any(move || async move {
            (status, [("content-type", "application/json")], body)
        }),
    )
}

/// 记录查询参数并返回固定译文的 MyMemory 替身
pub fn mymemory_ok(translated: &'static str, recorded: Recorded) -> Router {
    Router::new().route(
        "/get",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let recorded = Arc::clone(&recorded);
            async move {
                recorded.lock().unwrap().push(json!(params));
                Json(json!({
                    "responseStatus": 200,
                    "responseData": {"translatedText": translated, "match": 1}
                }))
            }
        }),
    )
}

/// 记录请求体并返回固定译文与检测语言的 LibreTranslate 替身
pub fn libre_ok(translated: &'static str, detected: &'static str, recorded: Recorded) -> Router {
    Router::new().route(
        "/translate",
        post(move |Json(body): Json<Value>| {
            let recorded = Arc::clone(&recorded);
            async move {
                recorded.lock().unwrap().push(body);
                Json(json!({
                    "translatedText": translated,
                    "detectedLanguage": {"confidence": 92.0, "language": detected}
                }))
            }
        }),
    )
}

/// 返回 500 和自定义错误体的 LibreTranslate 替身
pub fn libre_error(message: &'static str) -> Router {
    Router::new().route(
        "/translate",
        post(move || async move {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
        }),
    )
}

/// 响应前先等待的替身，用于触发超时
pub fn slow(path: &'static str, delay: Duration) -> Router {
    Router::new().route(
        path,
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!({"translatedText": "too late"}))
        }),
    )
}

/// 共享的 HTTP 客户端
pub fn client() -> reqwest::Client {
    transgate::translation::providers::build_http_client().expect("http client")
}
