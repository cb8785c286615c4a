use miette::Diagnostic;
use thiserror::Error;

/// Failure to acquire a scoped compilation environment
#[derive(Debug, Error, Diagnostic)]
pub enum EnvironmentError {
    /// The scratch directory could not be created
    #[error("Could not create scratch directory: {0}")]
    #[diagnostic(
        code("ENV-001"),
        help("Check free space and permissions on the system temp directory")
    )]
    Scratch(#[source] std::io::Error),

    /// The provider exists but cannot currently produce an environment
    #[error("Compilation environment unavailable: {0}")]
    #[diagnostic(code("ENV-002"))]
    Unavailable(String),
}

/// Failure to materialize a source file into a compilation context
#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    /// Writing the file under the scratch directory failed
    #[error("Could not write source '{name}'")]
    #[diagnostic(code("MAT-001"))]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The file name escapes the scratch directory
    #[error("Unsafe source file name: {0}")]
    #[diagnostic(
        code("MAT-002"),
        help("Source file names must be relative paths that do not traverse upward")
    )]
    UnsafeFileName(String),
}

/// Unexpected fault inside a backend or engine
#[derive(Debug, Error, Diagnostic)]
pub enum BackendError {
    /// An i/o operation against the compilation context failed
    #[error("Backend i/o error: {0}")]
    #[diagnostic(code("BACKEND-001"))]
    Io(#[from] std::io::Error),

    /// The backend reported a fault that is not a source diagnostic
    #[error("Backend failure: {0}")]
    #[diagnostic(code("BACKEND-002"))]
    Failed(String),
}

/// Failure inside a telemetry sink
///
/// Executors log and swallow this; recording is observation only and must
/// never change an operation's outcome.
#[derive(Debug, Error, Diagnostic)]
#[error("Telemetry sink failure: {0}")]
#[diagnostic(code("TELEMETRY-001"))]
pub struct TelemetryError(pub String);
