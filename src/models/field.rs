use serde::{Deserialize, Serialize};

/// 字段类型枚举，与前端调色板一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Number,
    Date,
    Radio,
    Checkbox,
    Dropdown,
}

impl FieldType {
    /// 选择类字段 (单选/多选/下拉) 携带 options 列表
    pub fn has_options(self) -> bool {
        matches!(self, FieldType::Radio | FieldType::Checkbox | FieldType::Dropdown)
    }

    /// 标量输入字段携带 placeholder，与 options 互斥
    pub fn takes_placeholder(self) -> bool {
        !self.has_options()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub question: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>, // 仅标量输入字段
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>, // 仅选择类字段，至少保留一项
}

impl FormField {
    /// 按类型生成默认字段
    pub fn new(id: String, field_type: FieldType) -> Self {
        let (placeholder, options) = if field_type.has_options() {
            (None, Some(vec!["Option 1".to_string(), "Option 2".to_string()]))
        } else {
            (Some(String::new()), None)
        };

        Self {
            id,
            field_type,
            question: "Untitled Question".to_string(),
            required: false,
            placeholder,
            options,
        }
    }
}
