use gostruct::RecordDescription;
use serde::{Deserialize, Serialize};

/// 嵌入关系: child 嵌入了 parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub parent: String,
    pub child: String,
}

impl RelationshipEdge {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

/// 从匿名字段推断嵌入关系
///
/// 每个匿名字段的类型 (去掉 `*` 和 `[]` 后) 与每个同名结构体各产生一条边,
/// 不去重, 按发现顺序输出。
pub fn infer_relationships(records: &[RecordDescription]) -> Vec<RelationshipEdge> {
    let mut edges = Vec::new();

    for record in records {
        for field in record.embedded_fields() {
            let embedded = field.clean_type();
            for parent in records.iter().filter(|r| r.name == embedded) {
                edges.push(RelationshipEdge::new(&parent.name, &record.name));
            }
        }
    }

    edges
}
