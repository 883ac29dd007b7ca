//! 扁平 JSON 文件存储
//!
//! 整个数据集是单个 `{ "forms": [...] }` 文档，每次变更都完整读出、
//! 修改、再整体写回 (美化缩进)。进程内的写操作通过一把异步互斥锁
//! 串行化；跨进程并发写仍然是后写覆盖，没有任何事务保证。
//! 存储层不校验表单形状，任何可序列化的 JSON 文档都原样落盘。

use std::io;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tokio::sync::Mutex;

pub struct FormStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FormStore {
    /// 打开数据文件；目录或文件不存在时自动初始化为空文档
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        if tokio::fs::metadata(&path).await.is_err() {
            let empty = serde_json::to_string_pretty(&json!({ "forms": [] }))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            tokio::fs::write(&path, empty).await?;
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    async fn load(&self) -> io::Result<Value> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    async fn persist(&self, document: &Value) -> io::Result<()> {
        let content = serde_json::to_string_pretty(document)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        tokio::fs::write(&self.path, content).await
    }

    /// 当前持久化的完整文档，含各表单的 submissions
    pub async fn read_document(&self) -> io::Result<Value> {
        self.load().await
    }

    /// 追加一个表单并写回
    pub async fn append_form(&self, form: Value) -> io::Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        forms_mut(&mut document)?.push(form);
        self.persist(&document).await
    }

    /// 按 id 查找表单
    pub async fn find_form(&self, form_id: &str) -> io::Result<Option<Value>> {
        let document = self.load().await?;
        let found = document
            .get("forms")
            .and_then(Value::as_array)
            .and_then(|forms| forms.iter().find(|f| form_id_matches(f, form_id)))
            .cloned();
        Ok(found)
    }

    /// 向指定表单追加一条填写记录；表单不存在时返回 false 且不落盘
    pub async fn append_submission(&self, form_id: &str, submission: Value) -> io::Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        let Some(form) = forms_mut(&mut document)?
            .iter_mut()
            .find(|f| form_id_matches(f, form_id))
        else {
            return Ok(false);
        };

        // 旧文档里可能还没有 submissions 键，补上空数组
        let entry = form
            .as_object_mut()
            .ok_or_else(|| corrupt("form entry is not an object"))?
            .entry("submissions")
            .or_insert_with(|| json!([]));
        entry
            .as_array_mut()
            .ok_or_else(|| corrupt("submissions is not an array"))?
            .push(submission);

        self.persist(&document).await?;
        Ok(true)
    }
}

fn forms_mut(document: &mut Value) -> io::Result<&mut Vec<Value>> {
    document
        .get_mut("forms")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| corrupt("missing forms array"))
}

fn form_id_matches(form: &Value, form_id: &str) -> bool {
    form.get("id").and_then(Value::as_str) == Some(form_id)
}

fn corrupt(detail: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("data file corrupt: {}", detail))
}
