//! Source materialization.
//!
//! Backends consume files on disk, not strings. The materializer writes each
//! project source under the context scratch directory and hands back a
//! [`FileHandle`] per file, in project order. Handles are only valid while
//! the owning environment lives; nothing retains them across operations.

use crate::context::CompileContext;
use crate::error::MaterializeError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use vela_source::{Project, SourceFile};

/// Backend-ready handle to one materialized source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    path: PathBuf,
}

impl FileHandle {
    /// Project-relative name the file was declared with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute location inside the context scratch directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write one source file under the context scratch directory.
///
/// File names are project-relative paths. Absolute names and any form of
/// parent traversal are rejected, so a project cannot write outside its own
/// context.
pub fn materialize_source(
    context: &CompileContext,
    file: &SourceFile,
) -> Result<FileHandle, MaterializeError> {
    let relative = safe_relative_path(&file.name)?;
    let path = context.scratch_dir().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| MaterializeError::Io {
            name: file.name.clone(),
            source,
        })?;
    }
    fs::write(&path, &file.text).map_err(|source| MaterializeError::Io {
        name: file.name.clone(),
        source,
    })?;
    log::trace!("materialized '{}' at {}", file.name, path.display());
    Ok(FileHandle {
        name: file.name.clone(),
        path,
    })
}

/// Materialize every file of a project, preserving project order.
pub fn materialize_project(
    context: &CompileContext,
    project: &Project,
) -> Result<Vec<FileHandle>, MaterializeError> {
    project
        .files()
        .iter()
        .map(|file| materialize_source(context, file))
        .collect()
}

fn safe_relative_path(name: &str) -> Result<&Path, MaterializeError> {
    let path = Path::new(name);
    // An empty name has no components, which `all` would accept.
    let safe = !name.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if safe {
        Ok(path)
    } else {
        Err(MaterializeError::UnsafeFileName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{EnvironmentProvider, ScratchEnvironment};
    use vela_source::TargetPlatform;

    #[test]
    fn test_materialize_writes_content() {
        let environment = ScratchEnvironment::new().acquire().unwrap();
        let file = SourceFile::new("Main.vela", "fun main() {}");
        let handle = materialize_source(environment.context(), &file).unwrap();
        assert_eq!(handle.name(), "Main.vela");
        assert!(handle.path().starts_with(environment.context().scratch_dir()));
        assert_eq!(fs::read_to_string(handle.path()).unwrap(), "fun main() {}");
    }

    #[test]
    fn test_materialize_creates_nested_dirs() {
        let environment = ScratchEnvironment::new().acquire().unwrap();
        let file = SourceFile::new("util/strings/trim.vela", "fun trim() {}");
        let handle = materialize_source(environment.context(), &file).unwrap();
        assert!(handle.path().is_file());
    }

    #[test]
    fn test_materialize_project_preserves_order() {
        let environment = ScratchEnvironment::new().acquire().unwrap();
        let project = Project::new(
            vec![
                SourceFile::new("b.vela", ""),
                SourceFile::new("a.vela", ""),
            ],
            TargetPlatform::Jvm,
        )
        .unwrap();
        let handles = materialize_project(environment.context(), &project).unwrap();
        let names: Vec<_> = handles.iter().map(FileHandle::name).collect();
        assert_eq!(names, vec!["b.vela", "a.vela"]);
    }

    #[test]
    fn test_unsafe_names_are_rejected() {
        let environment = ScratchEnvironment::new().acquire().unwrap();
        for name in ["../evil.vela", "/etc/passwd", "a/../../b.vela", ""] {
            let file = SourceFile::new(name, "");
            let result = materialize_source(environment.context(), &file);
            assert!(
                matches!(result, Err(MaterializeError::UnsafeFileName(_))),
                "expected rejection for {name:?}"
            );
        }
    }
}
