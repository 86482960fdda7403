//! Go 源码解析器 - 使用 tree-sitter 提取 struct 声明

use crate::error::ParseError;
use crate::types::{FieldDescription, RecordDescription};
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Go 源文件扩展名
pub const GO_EXTENSION: &str = "go";

/// 检查是否是 Go 源文件
pub fn is_go_file(path: &Path) -> bool {
    path.extension().map(|e| e == GO_EXTENSION).unwrap_or(false)
}

/// 类型声明的形态
#[derive(Debug, Clone, Copy)]
pub enum TypeShape<'tree> {
    /// `type X struct {...}`, 携带 struct_type 节点
    Record(Node<'tree>),
    /// `type X = Y`
    Alias,
    /// `type X Y`, `type X pkg.Y`
    Named,
    /// `type X interface {...}`
    Interface,
    /// 函数、map、切片等其他类型
    Other,
}

impl<'tree> TypeShape<'tree> {
    /// 判断 type_spec / type_alias 节点的形态
    pub fn classify(spec: Node<'tree>) -> Self {
        if spec.kind() == "type_alias" {
            return Self::Alias;
        }
        match spec.child_by_field_name("type") {
            Some(t) if t.kind() == "struct_type" => Self::Record(t),
            Some(t) if t.kind() == "interface_type" => Self::Interface,
            Some(t) if matches!(t.kind(), "type_identifier" | "qualified_type" | "generic_type") => Self::Named,
            _ => Self::Other,
        }
    }
}

/// Go 解析器
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, tree_sitter::LanguageError> {
        let mut parser = Parser::new();
        let language = tree_sitter_go::language();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    /// 提取文件中所有顶层 struct 声明 (未经过滤)
    pub fn parse_records(&mut self, content: &str, path: &Path) -> Result<Vec<RecordDescription>, ParseError> {
        let tree = self.parser.parse(content.as_bytes(), None).ok_or_else(|| ParseError {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
            message: "parser produced no syntax tree".to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(Self::first_error(root, content, path));
        }
        Self::check_top_level(root, path)?;

        let file_path = path.to_string_lossy().to_string();
        let mut records = Vec::new();

        for decl in root.children(&mut root.walk()) {
            if decl.kind() != "type_declaration" {
                continue;
            }

            let grouped = decl.children(&mut decl.walk()).any(|c| c.kind() == "(");

            for spec in decl.children(&mut decl.walk()) {
                if !matches!(spec.kind(), "type_spec" | "type_alias") {
                    continue;
                }

                let name = spec
                    .child_by_field_name("name")
                    .map(|n| node_text(n, content))
                    .unwrap_or_default();

                match TypeShape::classify(spec) {
                    TypeShape::Record(struct_node) => {
                        let doc_comment = leading_comments(spec, content)
                            .or_else(|| if grouped { None } else { leading_comments(decl, content) });

                        records.push(RecordDescription {
                            name: name.to_string(),
                            fields: Self::extract_fields(struct_node, content),
                            doc_comment,
                            file_path: file_path.clone(),
                        });
                    }
                    shape => {
                        tracing::trace!(type_name = name, ?shape, "skipping non-struct type");
                    }
                }
            }
        }

        Ok(records)
    }

    fn extract_fields(struct_node: Node, content: &str) -> Vec<FieldDescription> {
        let mut fields = Vec::new();

        for child in struct_node.children(&mut struct_node.walk()) {
            if child.kind() != "field_declaration_list" {
                continue;
            }
            for field in child.children(&mut child.walk()) {
                if field.kind() == "field_declaration" {
                    Self::push_field(field, content, &mut fields);
                }
            }
        }

        fields
    }

    /// 一条字段声明可能对应多个字段 (`A, B int`), 嵌入字段对应一个空名字段
    fn push_field(field: Node, content: &str, fields: &mut Vec<FieldDescription>) {
        let Some(type_node) = field.child_by_field_name("type") else {
            return;
        };

        let names: Vec<&str> = field
            .children_by_field_name("name", &mut field.walk())
            .map(|n| node_text(n, content))
            .collect();

        // 嵌入字段的 type 节点不含前导 `*`, 从声明起点截取
        let start = if names.is_empty() {
            field.start_byte()
        } else {
            type_node.start_byte()
        };
        let type_text = slice_clamped(content, start, type_node.end_byte()).to_string();

        let tag_text = field
            .child_by_field_name("tag")
            .map(|t| node_text(t, content).to_string())
            .unwrap_or_default();

        let comment = trailing_comment(field).map(|c| comment_text(c, content));

        if names.is_empty() {
            fields.push(FieldDescription {
                name: String::new(),
                type_text,
                tag_text,
                comment,
            });
            return;
        }

        for name in names {
            fields.push(FieldDescription {
                name: name.to_string(),
                type_text: type_text.clone(),
                tag_text: tag_text.clone(),
                comment: comment.clone(),
            });
        }
    }

    /// 语法树允许顶层语句且 package 子句可选, Go 编译器不允许
    fn check_top_level(root: Node, path: &Path) -> Result<(), ParseError> {
        let error_at = |node: Node, message: &str| {
            let position = node.start_position();
            ParseError {
                path: path.to_path_buf(),
                line: position.row + 1,
                column: position.column + 1,
                message: message.to_string(),
            }
        };

        let mut seen_package = false;
        let mut seen_decl = false;

        for node in root.named_children(&mut root.walk()) {
            match node.kind() {
                "comment" => {}
                "package_clause" if !seen_package => seen_package = true,
                "package_clause" => return Err(error_at(node, "duplicate `package` clause")),
                _ if !seen_package => return Err(error_at(node, "expected `package` clause")),
                "import_declaration" if seen_decl => {
                    return Err(error_at(node, "imports must appear before other declarations"))
                }
                "import_declaration" => {}
                "function_declaration" | "method_declaration" | "type_declaration" | "var_declaration"
                | "const_declaration" => seen_decl = true,
                other => {
                    return Err(error_at(node, &format!("unexpected `{}` at top level", other)));
                }
            }
        }

        if !seen_package {
            return Err(error_at(root, "expected `package` clause"));
        }
        Ok(())
    }

    fn first_error(root: Node, content: &str, path: &Path) -> ParseError {
        fn find_error(node: Node) -> Option<Node> {
            if node.is_error() || node.is_missing() {
                return Some(node);
            }
            if !node.has_error() {
                return None;
            }
            node.children(&mut node.walk()).find_map(find_error)
        }

        let node = find_error(root).unwrap_or(root);
        let position = node.start_position();
        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            let near: String = node_text(node, content).chars().take(32).collect();
            format!("syntax error near `{}`", near.trim())
        };

        ParseError {
            path: path.to_path_buf(),
            line: position.row + 1,
            column: position.column + 1,
            message,
        }
    }
}

fn node_text<'a>(node: Node, content: &'a str) -> &'a str {
    slice_clamped(content, node.start_byte(), node.end_byte())
}

/// 按字节偏移截取源码, 越界或起止颠倒时返回空串
pub fn slice_clamped(content: &str, start: usize, end: usize) -> &str {
    let end = end.min(content.len());
    if start >= end {
        return "";
    }
    content.get(start..end).unwrap_or("")
}

/// 与字段声明同一行结束的注释
fn trailing_comment(field: Node) -> Option<Node> {
    if let Some(inner) = field.children(&mut field.walk()).find(|c| c.kind() == "comment") {
        return Some(inner);
    }

    let row = field.end_position().row;
    let mut next = field.next_sibling();
    while let Some(node) = next {
        if node.start_position().row != row {
            break;
        }
        if node.kind() == "comment" {
            return Some(node);
        }
        if node.is_named() {
            break;
        }
        next = node.next_sibling();
    }
    None
}

/// 紧贴在节点上方的连续注释行
fn leading_comments(node: Node, content: &str) -> Option<String> {
    let mut lines = Vec::new();
    let mut expected_row = node.start_position().row;
    let mut prev = node.prev_sibling();

    while let Some(p) = prev {
        if !p.is_named() && p.kind() == "\n" {
            prev = p.prev_sibling();
            continue;
        }
        if p.kind() != "comment" || p.end_position().row + 1 != expected_row {
            break;
        }
        lines.push(comment_text(p, content));
        expected_row = p.start_position().row;
        prev = p.prev_sibling();
    }

    if lines.is_empty() {
        return None;
    }
    lines.reverse();
    Some(lines.join("\n"))
}

/// 去掉注释标记
fn comment_text(node: Node, content: &str) -> String {
    let raw = node_text(node, content);
    let text = if let Some(line) = raw.strip_prefix("//") {
        line
    } else {
        raw.strip_prefix("/*")
            .and_then(|s| s.strip_suffix("*/"))
            .unwrap_or(raw)
    };
    text.trim().to_string()
}
