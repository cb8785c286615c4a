//! Artifact and report persistence.
//!
//! A persisted compilation leaves exactly one of two things under the output
//! directory: every artifact at its relative path, or a `compile.err` file
//! holding the rendered diagnostics report. Directory creation is idempotent
//! and writes truncate, so persisting the same compilation twice reproduces
//! the same tree.

use crate::error::PersistError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use vela_backend::ArtifactSet;

/// File name of the report written when a persisted compilation fails.
pub const ERROR_REPORT_FILE: &str = "compile.err";

/// Outcome of a persisted compilation.
///
/// `success` answers "are there artifacts under the output directory"; a
/// failed compilation reports `false` and leaves the report file instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationResponse {
    pub success: bool,
}

/// Write every artifact under `output_dir` at its relative path, creating
/// parent directories as needed.
pub fn write_artifacts(output_dir: &Path, artifacts: &ArtifactSet) -> Result<(), PersistError> {
    create_dir(output_dir)?;
    for (relative, bytes) in artifacts.iter() {
        ensure_relative(relative)?;
        let path = output_dir.join(relative);
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }
        fs::write(&path, bytes).map_err(|source| PersistError::WriteArtifact {
            path: path.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Write the newline-separated diagnostics report to
/// [`ERROR_REPORT_FILE`] under `output_dir`.
pub fn write_error_report(output_dir: &Path, lines: &[String]) -> Result<(), PersistError> {
    create_dir(output_dir)?;
    let path = output_dir.join(ERROR_REPORT_FILE);
    let mut report = lines.join("\n");
    report.push('\n');
    fs::write(&path, report).map_err(|source| PersistError::WriteReport {
        path: path.clone(),
        source,
    })?;
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), PersistError> {
    fs::create_dir_all(path).map_err(|source| PersistError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_relative(artifact_path: &str) -> Result<(), PersistError> {
    let path = Path::new(artifact_path);
    // An empty path has no components, which `all` would accept.
    let safe = !artifact_path.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if safe {
        Ok(())
    } else {
        Err(PersistError::UnsafePath(artifact_path.to_string()))
    }
}
