//! gostruct - Go struct 声明提取
//!
//! 扫描 Go 源码目录, 用 tree-sitter 解析, 提取 struct 的字段、类型原文、tag 和注释

mod error;
mod filter;
mod parser;
mod scanner;
mod tag;
mod types;

pub use error::{ParseError, Result, ScanError};
pub use filter::{is_exported, is_kept, is_kept_name, EVENT_SUFFIX};
pub use parser::{is_go_file, slice_clamped, GoParser, TypeShape};
pub use scanner::{collect_go_files, ScanReport, Scanner};
pub use tag::{json_key, StructTag};
pub use types::{clean_type, FieldDescription, RecordDescription};
