use crate::relations::{infer_relationships, RelationshipEdge};
use gostruct::RecordDescription;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// 类图模型: 结构体 + 嵌入关系
#[derive(Debug, Clone, Serialize)]
pub struct Diagram {
    pub records: Vec<RecordDescription>,
    pub relationships: Vec<RelationshipEdge>,
}

impl Diagram {
    /// 在全部结构体上推断关系
    pub fn new(records: Vec<RecordDescription>) -> Self {
        let relationships = infer_relationships(&records);
        tracing::debug!(records = records.len(), relationships = relationships.len(), "diagram model built");
        Self {
            records,
            relationships,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 输出格式, 由输出文件扩展名决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    PlantUml,
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::PlantUml,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PlantUml => "PlantUML",
            Self::Json => "JSON",
        }
    }
}
