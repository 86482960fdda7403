//! uml - 类图生成
//!
//! 嵌入关系推断、PlantUML 渲染

mod diagram;
mod plantuml;
mod relations;

pub use diagram::{Diagram, OutputFormat, RenderError, Result};
pub use plantuml::{PlantUmlGenerator, DEFAULT_TITLE};
pub use relations::{infer_relationships, RelationshipEdge};
