// 声明子模块
pub mod editor;
pub mod handlers;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use services::form_store::FormStore;

/// 全局状态，所有 Handler 共享同一个文件存储
pub struct AppState {
    pub store: FormStore,
}

/// 构建完整路由 (API + 静态页面)
pub fn app(state: Arc<AppState>) -> Router {
    // 跨域：开发阶段允许所有，生产环境需收紧
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // 表单接口
        .route("/forms", get(handlers::form_handler::list_forms)
            .post(handlers::form_handler::create_form))
        .route("/forms/:id", get(handlers::form_handler::get_form))

        // 填写提交接口
        .route("/submit/:form_id", post(handlers::submission_handler::submit_response))

        // 静态页面：/ 为仪表盘+构建器，/form 为公开填写页
        .route_service("/form", ServeFile::new("public/form.html"))
        .fallback_service(ServeDir::new("public"))

        // 表单文档可能很大，放宽请求体上限到 50MB
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))

        // 中间件：日志记录和跨域
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
