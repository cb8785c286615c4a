//! Backend seam of the Vela execution core.
//!
//! Everything an executor consumes lives behind the traits in this crate:
//! scoped compilation environments, the source materializer, the per-target
//! backend seams, the completion engine and the telemetry sink. The uniform
//! result model they all report through lives here too, so a new backend
//! cannot invent a private result shape.

mod completion;
mod context;
mod error;
mod materialize;
mod result;
mod telemetry;
mod traits;

// Re-export environments and materialization
pub use context::{CompileContext, Environment, EnvironmentProvider, ScratchEnvironment};
pub use materialize::{materialize_project, materialize_source, FileHandle};

// Re-export the result model
pub use result::{
    ArtifactSet, BackendResult, BytecodeCompilation, ExecutionResult, JsCode, JsTranslation,
    ProgramOutput, WasmModule, WasmTranslation,
};

// Re-export the backend seams
pub use completion::{Completion, CompletionEngine, CompletionKind};
pub use traits::{BytecodeBackend, JsBackend, ProgramBackend, TestBackend, WasmBackend, WasmVariant};

// Re-export telemetry
pub use telemetry::{ExecutionRecord, NoopTelemetry, RecordingTelemetry, ResultStatus, TelemetrySink};

// Re-export error types
pub use error::{BackendError, EnvironmentError, MaterializeError, TelemetryError};
