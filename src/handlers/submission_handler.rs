use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::AppState;

/// 提交一次表单填写。答案不做任何校验，追加后不可修改或删除
pub async fn submit_response(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
    Json(mut submission): Json<Value>,
) -> impl IntoResponse {
    if let Some(record) = submission.as_object_mut() {
        record.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
        record.insert("submittedAt".to_string(), json!(Utc::now().to_rfc3339()));
    }

    match state.store.append_submission(&form_id, submission).await {
        Ok(true) => Json(json!({ "message": "Response submitted successfully" })).into_response(),
        Ok(false) => {
            tracing::warn!("--- 提交失败: 表单[{}]不存在", form_id);
            (StatusCode::NOT_FOUND, Json(json!({ "error": "Form not found" }))).into_response()
        }
        Err(e) => {
            tracing::error!("!!! 写入填写记录失败: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Error saving submission" }))).into_response()
        }
    }
}
