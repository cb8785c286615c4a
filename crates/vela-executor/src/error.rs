use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;
use vela_backend::{BackendError, EnvironmentError, MaterializeError};

/// Failure to persist compilation output
///
/// Persistence faults are fatal; they propagate to the caller instead of
/// being folded into the compilation response.
#[derive(Debug, Error, Diagnostic)]
pub enum PersistError {
    /// Creating the output directory or an artifact parent failed
    #[error("Could not create output directory {path}")]
    #[diagnostic(
        code("PERSIST-001"),
        help("Check permissions on the output directory")
    )]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an artifact file failed
    #[error("Could not write artifact {path}")]
    #[diagnostic(code("PERSIST-002"))]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the diagnostics report failed
    #[error("Could not write diagnostics report {path}")]
    #[diagnostic(code("PERSIST-003"))]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact path escapes the output directory
    #[error("Unsafe artifact path: {0}")]
    #[diagnostic(
        code("PERSIST-004"),
        help("Artifact paths must be relative and must not traverse upward")
    )]
    UnsafePath(String),
}

/// Infrastructure failure on the way to a backend.
///
/// Never crosses the crate boundary: primary operations flatten it into an
/// internal-error result, advisory operations into an empty one.
#[derive(Debug, Error)]
pub(crate) enum DispatchError {
    #[error("environment: {0}")]
    Environment(#[from] EnvironmentError),

    #[error("materialize: {0}")]
    Materialize(#[from] MaterializeError),

    #[error("backend: {0}")]
    Backend(#[from] BackendError),
}
