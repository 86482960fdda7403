use crate::diagram::Diagram;
use gostruct::FieldDescription;

/// 默认标题
pub const DEFAULT_TITLE: &str = "Event Structures from Common Events Package";

/// PlantUML 类图生成器
pub struct PlantUmlGenerator {
    title: String,
}

impl PlantUmlGenerator {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// 生成完整的 PlantUML 文档
    pub fn generate(&self, diagram: &Diagram) -> String {
        let mut lines = vec![
            "@startuml".to_string(),
            "!theme plain".to_string(),
            "skinparam backgroundColor #FFFFFF".to_string(),
            "skinparam classAttributeIconSize 0".to_string(),
            String::new(),
            format!("title {}", self.title),
            String::new(),
        ];

        // 每个结构体一个 class
        for record in &diagram.records {
            lines.push(format!("class {} {{", record.name));
            for field in &record.fields {
                lines.push(Self::field_line(field));
            }
            lines.push("}".to_string());
            lines.push(String::new());
        }

        // 嵌入关系
        for edge in &diagram.relationships {
            lines.push(format!("{} <|-- {}", edge.parent, edge.child));
        }

        lines.push(String::new());
        lines.push("@enduml".to_string());

        let mut document = lines.join("\n");
        document.push('\n');
        document
    }

    /// 字段行: `  + AccountID (account_id) : string`, 嵌入字段用 `^` 且只显示类型
    #[doc(hidden)]
    pub fn field_line(field: &FieldDescription) -> String {
        let field_type = field.clean_type();
        let (visibility, name) = if field.is_embedded() {
            ("^", field_type)
        } else {
            ("+", field.name.as_str())
        };

        // 嵌入字段只显示类型名, 不带 json 键
        let key = if field.is_embedded() { None } else { field.json_key() };
        let display = match key {
            Some(key) if key != name => format!("{} ({})", name, key),
            _ => name.to_string(),
        };

        format!("  {} {} : {}", visibility, display, field_type)
    }
}

impl Default for PlantUmlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gostruct::RecordDescription;

    fn field(name: &str, type_text: &str, tag_text: &str) -> FieldDescription {
        FieldDescription {
            name: name.to_string(),
            type_text: type_text.to_string(),
            tag_text: tag_text.to_string(),
            comment: None,
        }
    }

    fn record(name: &str, fields: Vec<FieldDescription>) -> RecordDescription {
        RecordDescription {
            name: name.to_string(),
            fields,
            doc_comment: None,
            file_path: "/test/events.go".to_string(),
        }
    }

    #[test]
    fn test_field_line_with_json_key() {
        let f = field("AccountID", "string", r#"`json:"account_id"`"#);
        assert_eq!(PlantUmlGenerator::field_line(&f), "  + AccountID (account_id) : string");
    }

    #[test]
    fn test_field_line_key_equal_to_name() {
        let f = field("DeviceInfo", "DeviceInfo", r#"`json:"DeviceInfo"`"#);
        assert_eq!(PlantUmlGenerator::field_line(&f), "  + DeviceInfo : DeviceInfo");
    }

    #[test]
    fn test_field_line_without_tag() {
        let f = field("Changes", "[]string", "");
        assert_eq!(PlantUmlGenerator::field_line(&f), "  + Changes : string");

        let f = field("Secret", "string", r#"`json:"-"`"#);
        assert_eq!(PlantUmlGenerator::field_line(&f), "  + Secret : string");
    }

    #[test]
    fn test_field_line_embedded() {
        let f = field("", "*DeviceInfo", "");
        assert_eq!(PlantUmlGenerator::field_line(&f), "  ^ DeviceInfo : DeviceInfo");

        let f = field("", "Base", r#"`json:"base"`"#);
        assert_eq!(PlantUmlGenerator::field_line(&f), "  ^ Base : Base");
        assert_eq!(f.tag_text, r#"`json:"base"`"#);
    }

    #[test]
    fn test_generate_full_document() {
        let diagram = Diagram::new(vec![
            record("DeviceInfo", vec![field("DeviceName", "string", r#"`json:"device_name"`"#)]),
            record("DeviceUpdatedEvent", vec![field("", "*DeviceInfo", "")]),
        ]);

        let expected = "\
@startuml
!theme plain
skinparam backgroundColor #FFFFFF
skinparam classAttributeIconSize 0

title Event Structures from Common Events Package

class DeviceInfo {
  + DeviceName (device_name) : string
}

class DeviceUpdatedEvent {
  ^ DeviceInfo : DeviceInfo
}

DeviceInfo <|-- DeviceUpdatedEvent

@enduml
";
        assert_eq!(PlantUmlGenerator::new().generate(&diagram), expected);
    }

    #[test]
    fn test_generate_without_relationships() {
        let diagram = Diagram::new(vec![record("Empty", vec![])]);
        let output = PlantUmlGenerator::new().with_title("Custom").generate(&diagram);

        assert!(output.contains("title Custom\n"));
        assert!(output.ends_with("class Empty {\n}\n\n\n@enduml\n"));
    }

    #[test]
    fn test_duplicate_records_rendered_twice() {
        let diagram = Diagram::new(vec![record("Dup", vec![]), record("Dup", vec![])]);
        let output = PlantUmlGenerator::new().generate(&diagram);
        assert_eq!(output.matches("class Dup {").count(), 2);
    }

    #[test]
    fn test_generator_default() {
        let gen = PlantUmlGenerator::default();
        assert_eq!(gen.title, DEFAULT_TITLE);
    }
}
