//! Post-hoc execution telemetry.
//!
//! A sink observes finished top-level operations; it can never affect them.
//! Executors call the sink unconditionally, so "telemetry off" is the no-op
//! sink rather than an `Option` threaded through every call site. Sink
//! failures are logged and swallowed by the caller.

use crate::error::TelemetryError;
use crate::result::BackendResult;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use vela_source::{Severity, TargetPlatform};

/// Classification of a finished operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultStatus {
    Compiled,
    NotCompiled,
    InternalError,
}

/// Normalized view of one finished top-level operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub status: ResultStatus,
    /// Number of `ERROR` diagnostics; zero for internal errors.
    pub errors: usize,
    /// Number of `WARNING` diagnostics; zero for internal errors.
    pub warnings: usize,
    pub target: TargetPlatform,
    /// Toolchain version the operation ran under.
    pub version: String,
}

impl ExecutionRecord {
    /// Summarize any backend result for the sink.
    pub fn from_result<T>(
        result: &BackendResult<T>,
        target: TargetPlatform,
        version: impl Into<String>,
    ) -> Self {
        let status = match result {
            BackendResult::Compiled { .. } => ResultStatus::Compiled,
            BackendResult::NotCompiled { .. } => ResultStatus::NotCompiled,
            BackendResult::InternalError { .. } => ResultStatus::InternalError,
        };
        let (errors, warnings) = match result.diagnostics() {
            Some(diagnostics) => (
                diagnostics.count(Severity::Error),
                diagnostics.count(Severity::Warning),
            ),
            None => (0, 0),
        };
        Self {
            status,
            errors,
            warnings,
            target,
            version: version.into(),
        }
    }
}

/// Receives one record per finished top-level operation.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, record: ExecutionRecord) -> Result<(), TelemetryError>;
}

/// Sink that drops every record; the default wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record(&self, _record: ExecutionRecord) -> Result<(), TelemetryError> {
        Ok(())
    }
}

/// In-memory sink for tests and for embedders that read records back.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    records: Mutex<Vec<ExecutionRecord>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in arrival order.
    pub fn records(&self) -> Vec<ExecutionRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record(&self, record: ExecutionRecord) -> Result<(), TelemetryError> {
        self.records.lock().push(record);
        Ok(())
    }
}
