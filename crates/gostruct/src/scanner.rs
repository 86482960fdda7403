use crate::error::{ParseError, Result, ScanError};
use crate::filter;
use crate::parser::{is_go_file, GoParser};
use crate::types::RecordDescription;
use std::fs;
use std::path::{Path, PathBuf};

/// 扫描结果
#[derive(Debug, Default)]
pub struct ScanReport {
    /// 通过过滤的结构体, 按文件和声明顺序
    pub records: Vec<RecordDescription>,
    /// 解析失败而被跳过的文件
    pub skipped: Vec<ParseError>,
    /// 成功解析的文件数
    pub files_parsed: usize,
}

/// 源码扫描器
pub struct Scanner {
    parser: GoParser,
}

impl Scanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: GoParser::new()?,
        })
    }

    /// 扫描目录 (或单个文件) 下的所有 Go 文件
    ///
    /// 目录或文件不可读时立即失败; 单个文件解析失败只记录警告并跳过。
    pub fn scan(&mut self, root: &Path) -> Result<ScanReport> {
        let files = collect_go_files(root)?;
        tracing::debug!(root = %root.display(), files = files.len(), "collected Go files");

        files.iter().try_fold(ScanReport::default(), |mut report, path| {
            match self.scan_file(path)? {
                Ok(records) => {
                    let total = records.len();
                    report.records.extend(records.into_iter().filter(filter::is_kept));
                    report.files_parsed += 1;
                    tracing::debug!(path = %path.display(), structs = total, "parsed");
                }
                Err(err) => {
                    tracing::warn!(path = %err.path.display(), error = %err, "Failed to parse, skipping");
                    report.skipped.push(err);
                }
            }
            Ok(report)
        })
    }

    fn scan_file(&mut self, path: &Path) -> Result<std::result::Result<Vec<RecordDescription>, ParseError>> {
        let bytes = fs::read(path).map_err(|e| ScanError::io(path, e))?;

        let content = match String::from_utf8(bytes) {
            Ok(c) => c,
            Err(e) => {
                return Ok(Err(ParseError {
                    path: path.to_path_buf(),
                    line: 1,
                    column: 1,
                    message: format!("invalid UTF-8: {}", e.utf8_error()),
                }))
            }
        };

        Ok(self.parser.parse_records(&content, path))
    }
}

/// 收集 Go 文件, 同一目录内按文件名排序
pub fn collect_go_files(root: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(root).map_err(|e| ScanError::io(root, e))?;

    let mut files = Vec::new();
    if metadata.is_dir() {
        collect_dir(root, &mut files)?;
    } else if is_go_file(root) {
        files.push(root.to_path_buf());
    }
    Ok(files)
}

fn collect_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ScanError::io(dir, e))? {
        let entry = entry.map_err(|e| ScanError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| ScanError::io(entry.path(), e))?;
        entries.push((entry.path(), file_type.is_dir()));
    }
    entries.sort();

    // 符号链接目录不跟随
    for (path, is_dir) in entries {
        if is_dir {
            collect_dir(&path, files)?;
        } else if is_go_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}
