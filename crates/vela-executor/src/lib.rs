//! Project executor of the Vela execution core.
//!
//! [`ProjectExecutor`] is the single entry point that maps a project and an
//! operation onto a backend: it selects the backend from the project's
//! target platform, drives it inside a scoped compilation environment,
//! normalizes the output into the uniform result model and, where asked,
//! persists artifacts or reports telemetry. Backends plug in through the
//! trait seams of `vela-backend`; this crate owns only the orchestration.

mod error;
mod executor;
mod persist;

#[cfg(test)]
mod tests;

pub use executor::{BackendSet, ProjectExecutor};
pub use persist::{write_artifacts, write_error_report, CompilationResponse, ERROR_REPORT_FILE};

pub use error::PersistError;
