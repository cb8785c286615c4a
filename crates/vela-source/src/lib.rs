//! Project model, diagnostics and toolchain configuration for the Vela
//! execution core.
//!
//! This crate is the shared data layer underneath every executor and backend:
//! it defines source files and projects exactly as callers hand them over,
//! the closed target-platform enumeration that drives backend routing, the
//! uniform diagnostics model with its rendered report format, and the
//! toolchain configuration plus the process-wide version descriptor.

mod config;
mod diagnostic;
mod error;
mod file;
mod platform;
mod project;

// Re-export the project model
pub use file::SourceFile;
pub use platform::TargetPlatform;
pub use project::Project;

// Re-export the diagnostics model
pub use diagnostic::{CompilerDiagnostics, Diagnostic, Severity, TextInterval, TextPosition};

// Re-export configuration types
pub use config::{EnvironmentConfig, ToolchainConfig, VersionInfo};

// Re-export error types
pub use error::{ConfigError, ProjectError};
