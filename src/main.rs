use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use form_builder_backend::services::form_store::FormStore;
use form_builder_backend::{app, AppState};

#[tokio::main]
async fn main() {
    // 1. 初始化日志系统
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. 加载 .env 环境变量
    dotenv().ok();
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let data_path =
        std::env::var("FORM_DATA_PATH").unwrap_or_else(|_| "data/submissions.json".into());

    // 3. 打开文件存储 (目录与初始文件不存在时自动创建)
    let store = FormStore::open(&data_path)
        .await
        .expect("Failed to open form data file");
    let shared_state = Arc::new(AppState { store });

    // 4. 构建路由
    let app = app(shared_state);

    // 5. 启动服务
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("🚀 Server started at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
