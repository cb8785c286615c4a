use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while constructing a project
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// Two files in the project share a name
    #[error("Duplicate file name in project: {0}")]
    #[diagnostic(
        code("PROJECT-001"),
        help("Every file in a project must have a unique name"),
        url("https://vela-lang.org/docs/projects/file-naming")
    )]
    DuplicateFileName(String),

    /// A file was declared with an empty name
    #[error("Project contains a file with an empty name")]
    #[diagnostic(
        code("PROJECT-002"),
        help("Give every source file a non-empty, project-relative name such as Main.vela"),
        url("https://vela-lang.org/docs/projects/file-naming")
    )]
    EmptyFileName,
}

/// Errors raised while loading the toolchain configuration
#[derive(Debug, Error, Diagnostic, Clone)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Error reading toolchain configuration {path}: {reason}")]
    #[diagnostic(
        code("CONFIG-001"),
        help("Check that the file exists and is readable"),
        url("https://vela-lang.org/docs/toolchain/configuration")
    )]
    ReadError { path: PathBuf, reason: String },

    /// Error parsing the configuration file
    #[error("Invalid toolchain configuration: {0}")]
    #[diagnostic(
        code("CONFIG-002"),
        help("Check the TOML syntax against the documented schema"),
        url("https://vela-lang.org/docs/toolchain/configuration")
    )]
    ParseError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
