use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::AppState;

/// 1. 获取全部表单 (含各自的填写记录，仪表盘据此算统计)
pub async fn list_forms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.read_document().await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => {
            tracing::error!("!!! 读取数据文件失败: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Error reading data" }))).into_response()
        }
    }
}

/// 2. 保存表单 (服务端分配 id 与创建时间)
pub async fn create_form(
    State(state): State<Arc<AppState>>,
    Json(mut draft): Json<Value>,
) -> impl IntoResponse {
    let form_id = Uuid::new_v4().to_string();

    // 注入服务端字段；submissions 从空数组起步。
    // 非对象负载不做校验，原样落盘。
    if let Some(form) = draft.as_object_mut() {
        form.insert("id".to_string(), json!(form_id));
        form.insert("createdAt".to_string(), json!(Utc::now().to_rfc3339()));
        form.entry("submissions").or_insert_with(|| json!([]));
    }

    tracing::info!(">>> 保存新表单: id={}", form_id);

    match state.store.append_form(draft).await {
        Ok(()) => Json(json!({ "message": "Form saved successfully", "formId": form_id })).into_response(),
        Err(e) => {
            tracing::error!("!!! 写入数据文件失败: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Error saving data" }))).into_response()
        }
    }
}

/// 3. 按 id 获取单个表单
pub async fn get_form(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
) -> impl IntoResponse {
    match state.store.find_form(&form_id).await {
        Ok(Some(form)) => (StatusCode::OK, Json(form)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Json(json!({ "error": "Form not found" }))).into_response(),
        Err(e) => {
            tracing::error!("!!! 读取数据文件失败: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Error reading data" }))).into_response()
        }
    }
}
