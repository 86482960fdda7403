use std::path::PathBuf;
use thiserror::Error;

/// 扫描错误 - 致命, 终止整个流程
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// 单个文件解析失败 - 跳过该文件继续扫描
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}:{line}:{column}: {message}", .path.display())]
pub struct ParseError {
    pub path: PathBuf,
    /// 第一个错误节点的位置 (从 1 开始)
    pub line: usize,
    pub column: usize,
    pub message: String,
}

pub type Result<T> = std::result::Result<T, ScanError>;
