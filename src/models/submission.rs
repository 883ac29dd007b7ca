use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// 单个问题的答案：标量/单选/下拉为字符串，多选为字符串列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multiple(Vec<String>),
}

/// 一次填写记录。答案以 fieldId 为键，与服务端分配的 id/时间戳平铺在同一层
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub answers: BTreeMap<String, AnswerValue>,
}
