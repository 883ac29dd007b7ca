//! 表单编辑器状态机
//!
//! 纯内存文档模型 (标题 + 描述 + 有序字段列表 + 至多一个选中字段)，
//! 与任何 UI 解耦。每次变更返回一个 EditorEvent，渲染层据此只刷新
//! 受影响的预览区域，状态转移本身可以脱离 DOM 单测。

use crate::models::field::{FieldType, FormField};
use crate::models::form::FormDraft;

/// 变更产生的渲染通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// 新字段已追加到列表尾部并成为选中字段
    FieldInserted { id: String },
    /// 单个字段内容变化，仅重绘该字段
    FieldUpdated { id: String },
    /// 字段已删除；panel_cleared 表示属性面板需要清空，
    /// preview_emptied 表示预览区退回空状态提示
    FieldRemoved {
        id: String,
        panel_cleared: bool,
        preview_emptied: bool,
    },
    /// 选中字段切换，属性面板按当前值重新填充
    SelectionChanged { id: String },
    /// 无效操作，文档未变化
    Noop,
}

/// 对单个字段的局部更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPatch {
    Question(String),
    Required(bool),
    Placeholder(String),
    /// 修改第 index 个选项的文本
    SetOption { index: usize, text: String },
    /// 追加一个默认选项
    AddOption,
    /// 删除第 index 个选项；仅剩一项时拒绝
    RemoveOption { index: usize },
}

pub struct FormEditor {
    draft: FormDraft,
    selected: Option<String>,
    next_seq: u64, // 字段 id 自增序号
}

impl FormEditor {
    pub fn new() -> Self {
        Self {
            draft: FormDraft::default(),
            selected: None,
            next_seq: 1,
        }
    }

    /// 追加一个带类型默认值的新字段，并将其选中
    pub fn add_field(&mut self, field_type: FieldType) -> EditorEvent {
        let id = format!("field-{}", self.next_seq);
        self.next_seq += 1;

        self.draft.fields.push(FormField::new(id.clone(), field_type));
        self.selected = Some(id.clone());

        EditorEvent::FieldInserted { id }
    }

    /// 选中指定字段；id 不存在时不做任何事
    pub fn select_field(&mut self, id: &str) -> EditorEvent {
        if !self.draft.fields.iter().any(|f| f.id == id) {
            return EditorEvent::Noop;
        }
        self.selected = Some(id.to_string());
        EditorEvent::SelectionChanged { id: id.to_string() }
    }

    /// 对指定字段应用局部更新；id 不存在或更新违反字段形状约束时静默忽略
    pub fn update_field(&mut self, id: &str, patch: FieldPatch) -> EditorEvent {
        let Some(field) = self.draft.fields.iter_mut().find(|f| f.id == id) else {
            return EditorEvent::Noop;
        };

        match patch {
            FieldPatch::Question(question) => field.question = question,
            FieldPatch::Required(required) => field.required = required,
            FieldPatch::Placeholder(text) => {
                // placeholder 只对标量输入字段有意义
                if !field.field_type.takes_placeholder() {
                    return EditorEvent::Noop;
                }
                field.placeholder = Some(text);
            }
            FieldPatch::SetOption { index, text } => {
                let Some(options) = field.options.as_mut() else {
                    return EditorEvent::Noop;
                };
                let Some(slot) = options.get_mut(index) else {
                    return EditorEvent::Noop;
                };
                *slot = text;
            }
            FieldPatch::AddOption => {
                let Some(options) = field.options.as_mut() else {
                    return EditorEvent::Noop;
                };
                options.push("New Option".to_string());
            }
            FieldPatch::RemoveOption { index } => {
                let Some(options) = field.options.as_mut() else {
                    return EditorEvent::Noop;
                };
                // 约束：选项列表永远不少于一项
                if options.len() <= 1 || index >= options.len() {
                    return EditorEvent::Noop;
                }
                options.remove(index);
            }
        }

        EditorEvent::FieldUpdated { id: id.to_string() }
    }

    /// 删除指定字段；若它正被选中则同时清空属性面板
    pub fn delete_field(&mut self, id: &str) -> EditorEvent {
        let Some(pos) = self.draft.fields.iter().position(|f| f.id == id) else {
            return EditorEvent::Noop;
        };
        self.draft.fields.remove(pos);

        let panel_cleared = self.selected.as_deref() == Some(id);
        if panel_cleared {
            self.selected = None;
        }

        EditorEvent::FieldRemoved {
            id: id.to_string(),
            panel_cleared,
            preview_emptied: self.draft.fields.is_empty(),
        }
    }

    /// 表单标题；空串回退到默认标题
    pub fn set_title(&mut self, title: &str) {
        self.draft.title = if title.is_empty() {
            "Untitled Form".to_string()
        } else {
            title.to_string()
        };
    }

    pub fn set_description(&mut self, description: &str) {
        self.draft.description = description.to_string();
    }

    /// 生成用于持久化的表单文档
    pub fn serialize(&self) -> FormDraft {
        self.draft.clone()
    }

    pub fn fields(&self) -> &[FormField] {
        &self.draft.fields
    }

    /// 属性面板当前展示的字段
    pub fn selected_field(&self) -> Option<&FormField> {
        let id = self.selected.as_deref()?;
        self.draft.fields.iter().find(|f| f.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Email,
        FieldType::Number,
        FieldType::Date,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Dropdown,
    ];

    #[test]
    fn add_field_matches_type_schema() {
        for ty in ALL_TYPES {
            let mut editor = FormEditor::new();
            editor.add_field(ty);

            let field = &editor.fields()[0];
            assert_eq!(field.field_type, ty);
            assert_eq!(field.question, "Untitled Question");
            assert!(!field.required);
            assert_eq!(field.options.is_some(), ty.has_options());
            assert_eq!(field.placeholder.is_some(), ty.takes_placeholder());
        }
    }

    #[test]
    fn add_field_choice_defaults_and_selection() {
        let mut editor = FormEditor::new();
        let event = editor.add_field(FieldType::Radio);

        assert_eq!(event, EditorEvent::FieldInserted { id: "field-1".into() });
        assert_eq!(editor.selected_id(), Some("field-1"));
        assert_eq!(
            editor.fields()[0].options.as_deref(),
            Some(["Option 1".to_string(), "Option 2".to_string()].as_slice())
        );
    }

    #[test]
    fn field_ids_are_unique() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Text);
        editor.add_field(FieldType::Text);
        editor.add_field(FieldType::Date);

        let ids: Vec<_> = editor.fields().iter().map(|f| f.id.clone()).collect();
        assert_eq!(ids, vec!["field-1", "field-2", "field-3"]);
    }

    #[test]
    fn select_unknown_field_is_noop() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Text);

        assert_eq!(editor.select_field("field-99"), EditorEvent::Noop);
        // 原有选中不受影响
        assert_eq!(editor.selected_id(), Some("field-1"));
    }

    #[test]
    fn select_switches_property_panel() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Text);
        editor.add_field(FieldType::Email);

        let event = editor.select_field("field-1");
        assert_eq!(event, EditorEvent::SelectionChanged { id: "field-1".into() });
        assert_eq!(editor.selected_field().unwrap().field_type, FieldType::Text);
    }

    #[test]
    fn update_unknown_field_is_noop() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Text);

        let event = editor.update_field("nope", FieldPatch::Required(true));
        assert_eq!(event, EditorEvent::Noop);
        assert!(!editor.fields()[0].required);
    }

    #[test]
    fn update_question_and_required() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Text);

        editor.update_field("field-1", FieldPatch::Question("你的姓名?".into()));
        let event = editor.update_field("field-1", FieldPatch::Required(true));

        assert_eq!(event, EditorEvent::FieldUpdated { id: "field-1".into() });
        let field = &editor.fields()[0];
        assert_eq!(field.question, "你的姓名?");
        assert!(field.required);
    }

    #[test]
    fn placeholder_rejected_on_choice_field() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Dropdown);

        let event = editor.update_field("field-1", FieldPatch::Placeholder("pick".into()));
        assert_eq!(event, EditorEvent::Noop);
        assert!(editor.fields()[0].placeholder.is_none());
    }

    #[test]
    fn option_edits_rejected_on_scalar_field() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Text);

        assert_eq!(editor.update_field("field-1", FieldPatch::AddOption), EditorEvent::Noop);
        assert_eq!(
            editor.update_field("field-1", FieldPatch::SetOption { index: 0, text: "A".into() }),
            EditorEvent::Noop
        );
        assert!(editor.fields()[0].options.is_none());
    }

    #[test]
    fn options_never_drop_below_one() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Checkbox);

        // 两项 -> 一项，允许
        let event = editor.update_field("field-1", FieldPatch::RemoveOption { index: 0 });
        assert_eq!(event, EditorEvent::FieldUpdated { id: "field-1".into() });
        assert_eq!(editor.fields()[0].options.as_ref().unwrap().len(), 1);

        // 仅剩一项时删除被拒绝
        let event = editor.update_field("field-1", FieldPatch::RemoveOption { index: 0 });
        assert_eq!(event, EditorEvent::Noop);
        assert_eq!(editor.fields()[0].options.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn add_and_edit_options() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Radio);

        editor.update_field("field-1", FieldPatch::AddOption);
        editor.update_field("field-1", FieldPatch::SetOption { index: 2, text: "Maybe".into() });

        assert_eq!(
            editor.fields()[0].options.as_deref(),
            Some(["Option 1".to_string(), "Option 2".to_string(), "Maybe".to_string()].as_slice())
        );

        // 越界写入被忽略
        let event = editor.update_field("field-1", FieldPatch::SetOption { index: 9, text: "x".into() });
        assert_eq!(event, EditorEvent::Noop);
    }

    #[test]
    fn delete_field_never_survives_serialize() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Text);
        editor.add_field(FieldType::Email);

        editor.delete_field("field-1");
        let draft = editor.serialize();

        assert!(draft.fields.iter().all(|f| f.id != "field-1"));
        assert_eq!(draft.fields.len(), 1);
    }

    #[test]
    fn delete_selected_field_clears_panel() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Text);
        editor.add_field(FieldType::Date);
        editor.select_field("field-1");

        let event = editor.delete_field("field-1");
        assert_eq!(
            event,
            EditorEvent::FieldRemoved {
                id: "field-1".into(),
                panel_cleared: true,
                preview_emptied: false,
            }
        );
        assert!(editor.selected_field().is_none());
    }

    #[test]
    fn deleting_last_field_empties_preview() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Number);

        let event = editor.delete_field("field-1");
        assert_eq!(
            event,
            EditorEvent::FieldRemoved {
                id: "field-1".into(),
                panel_cleared: true,
                preview_emptied: true,
            }
        );
    }

    #[test]
    fn delete_unknown_field_is_noop() {
        let mut editor = FormEditor::new();
        editor.add_field(FieldType::Text);

        assert_eq!(editor.delete_field("field-7"), EditorEvent::Noop);
        assert_eq!(editor.fields().len(), 1);
    }

    #[test]
    fn empty_title_falls_back_to_default() {
        let mut editor = FormEditor::new();
        editor.set_title("调查问卷");
        editor.set_title("");

        assert_eq!(editor.serialize().title, "Untitled Form");
    }

    #[test]
    fn serialize_preserves_field_order() {
        let mut editor = FormEditor::new();
        editor.set_title("Quiz");
        editor.set_description("简单测验");
        editor.add_field(FieldType::Radio);
        editor.add_field(FieldType::Text);
        editor.add_field(FieldType::Checkbox);

        let draft = editor.serialize();
        assert_eq!(draft.title, "Quiz");
        assert_eq!(draft.description, "简单测验");
        let types: Vec<_> = draft.fields.iter().map(|f| f.field_type).collect();
        assert_eq!(types, vec![FieldType::Radio, FieldType::Text, FieldType::Checkbox]);
    }
}
