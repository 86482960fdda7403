//! Scan → diagram → output file

use crate::config::Config;
use gostruct::Scanner;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use uml::{Diagram, OutputFormat, PlantUmlGenerator};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Error creating output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error writing output file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] uml::RenderError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Diagram written with this many structs
    Written { path: PathBuf, records: usize },
    /// Nothing matched the filter, no file written
    Empty,
}

pub fn run(config: &Config) -> anyhow::Result<Outcome> {
    let mut scanner = Scanner::new()?;
    let report = scanner.scan(&config.input)?;

    if !report.skipped.is_empty() {
        tracing::info!(
            parsed = report.files_parsed,
            skipped = report.skipped.len(),
            "Some files were skipped"
        );
    }

    let diagram = Diagram::new(report.records);
    if diagram.is_empty() {
        tracing::warn!(input = %config.input.display(), "No structs found");
        return Ok(Outcome::Empty);
    }

    let format = OutputFormat::from_path(&config.output);
    let document = render(&diagram, format)?;
    write_output(&config.output, &document)?;

    println!("Successfully generated {} file: {}", format.label(), config.output.display());
    println!("Found {} event structures", diagram.records.len());

    Ok(Outcome::Written {
        path: config.output.clone(),
        records: diagram.records.len(),
    })
}

pub fn render(diagram: &Diagram, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::PlantUml => Ok(PlantUmlGenerator::new().generate(diagram)),
        OutputFormat::Json => Ok(diagram.to_json()?),
    }
}

/// Write the finished document next to the target and rename it into place
pub fn write_output(path: &Path, document: &str) -> Result<(), OutputError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let write_err = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(document.as_bytes()).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
