use serde::{Deserialize, Serialize};

/// 结构体描述 - 一个 Go struct 类型声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescription {
    /// 类型名: "DeviceCreatedEvent"
    pub name: String,
    /// 字段列表 (声明顺序)
    pub fields: Vec<FieldDescription>,
    /// 声明上方的文档注释
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    /// 所在文件
    pub file_path: String,
}

impl RecordDescription {
    /// 匿名 (嵌入) 字段
    pub fn embedded_fields(&self) -> impl Iterator<Item = &FieldDescription> {
        self.fields.iter().filter(|f| f.is_embedded())
    }
}

/// 字段描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescription {
    /// 字段名, 嵌入字段为空串
    pub name: String,
    /// 类型源码原文: "*DeviceInfo", "[]string", "time.Time"
    pub type_text: String,
    /// tag 原文 (含反引号), 没有则为空串
    pub tag_text: String,
    /// 行尾注释
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FieldDescription {
    pub fn is_embedded(&self) -> bool {
        self.name.is_empty()
    }

    /// 去掉指针/切片前缀后的类型名
    pub fn clean_type(&self) -> &str {
        clean_type(&self.type_text)
    }

    /// json tag 中声明的序列化键
    pub fn json_key(&self) -> Option<String> {
        crate::tag::json_key(&self.tag_text)
    }
}

/// 规范化类型文本: 去掉一个前导 `*`, 再去掉一个前导 `[]`
///
/// 渲染和继承关系推断共用这一规则。
pub fn clean_type(type_text: &str) -> &str {
    let t = type_text.trim();
    let t = t.strip_prefix('*').unwrap_or(t);
    let t = t.strip_prefix("[]").unwrap_or(t);
    t.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, type_text: &str) -> FieldDescription {
        FieldDescription {
            name: name.to_string(),
            type_text: type_text.to_string(),
            tag_text: String::new(),
            comment: None,
        }
    }

    #[test]
    fn test_clean_type_strips_pointer_and_slice() {
        assert_eq!(clean_type("*DeviceInfo"), "DeviceInfo");
        assert_eq!(clean_type("[]string"), "string");
        assert_eq!(clean_type("*[]Item"), "Item");
        assert_eq!(clean_type("  time.Time "), "time.Time");
    }

    #[test]
    fn test_clean_type_strips_at_most_one_of_each() {
        assert_eq!(clean_type("**Node"), "*Node");
        assert_eq!(clean_type("[][]byte"), "[]byte");
        // 顺序固定: 先 `*` 后 `[]`
        assert_eq!(clean_type("[]*Item"), "*Item");
        assert_eq!(clean_type("[4]int"), "[4]int");
        assert_eq!(clean_type("map[string]int"), "map[string]int");
    }

    #[test]
    fn test_embedded_fields() {
        let record = RecordDescription {
            name: "Wrapper".to_string(),
            fields: vec![field("", "*Base"), field("ID", "string"), field("", "Meta")],
            doc_comment: None,
            file_path: "wrapper.go".to_string(),
        };

        let embedded: Vec<_> = record.embedded_fields().map(|f| f.clean_type()).collect();
        assert_eq!(embedded, vec!["Base", "Meta"]);
    }
}
