use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::field::FormField;
use super::submission::Submission;

/// 客户端草稿：尚未保存、没有服务端 id 的表单文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub title: String,
    pub description: String,
    pub fields: Vec<FormField>,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            title: "Untitled Form".to_string(),
            description: String::new(),
            fields: Vec::new(),
        }
    }
}

/// 已持久化的表单。id 与 createdAt 在首次保存时由服务端分配，此后不变
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}
