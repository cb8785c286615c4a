//! The project executor: routing, containment and result shaping.

use crate::error::{DispatchError, PersistError};
use crate::persist::{self, CompilationResponse};
use std::path::Path;
use std::sync::Arc;
use vela_backend::{
    materialize_project, materialize_source, BackendResult, BytecodeBackend, BytecodeCompilation,
    CompileContext, Completion, CompletionEngine, EnvironmentProvider, ExecutionRecord,
    ExecutionResult, FileHandle, JsBackend, JsTranslation, NoopTelemetry, ProgramBackend,
    TelemetrySink, TestBackend, WasmBackend, WasmTranslation, WasmVariant,
};
use vela_source::{CompilerDiagnostics, Project, TargetPlatform, TextPosition, VersionInfo};

/// The complete, closed set of backends an executor routes to.
///
/// Wiring happens through a struct literal, so building an executor without
/// one of the backends is a build failure instead of a latent routing panic.
pub struct BackendSet {
    pub program: Arc<dyn ProgramBackend>,
    pub tests: Arc<dyn TestBackend>,
    pub bytecode: Arc<dyn BytecodeBackend>,
    pub js: Arc<dyn JsBackend>,
    pub wasm: Arc<dyn WasmBackend>,
    pub completion: Arc<dyn CompletionEngine>,
}

/// Routes each operation to the backend selected by the project's target
/// platform, shapes the backend's answer into the uniform result model and
/// contains failures according to the operation kind.
///
/// Operations are synchronous and self-contained: each one acquires a scoped
/// environment, materializes the project, runs exactly one backend and
/// releases the environment on every exit path. Executors keep no state
/// between calls, so one instance can serve concurrent callers.
pub struct ProjectExecutor {
    environment: Arc<dyn EnvironmentProvider>,
    backends: BackendSet,
    telemetry: Arc<dyn TelemetrySink>,
}

impl ProjectExecutor {
    /// Build an executor with the no-op telemetry sink.
    pub fn new(environment: Arc<dyn EnvironmentProvider>, backends: BackendSet) -> Self {
        Self {
            environment,
            backends,
            telemetry: Arc::new(NoopTelemetry),
        }
    }

    /// Replace the default no-op telemetry sink.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Compile the project and execute its program entry point.
    ///
    /// `include_bytecode` additionally asks for a bytecode listing in the
    /// payload. Records one telemetry entry.
    pub fn run_program(&self, project: &Project, include_bytecode: bool) -> ExecutionResult {
        let result = self.run_program_op(project, include_bytecode);
        self.record(project.platform(), &result);
        result
    }

    /// Compile the project and drive the test harness over it.
    ///
    /// Records one telemetry entry.
    pub fn run_tests(&self, project: &Project, include_bytecode: bool) -> ExecutionResult {
        let result = self.run_tests_op(project, include_bytecode);
        self.record(project.platform(), &result);
        result
    }

    /// Translate the project to JavaScript through the IR pipeline.
    ///
    /// The project argument string is passed to the translator split on
    /// whitespace. Records one telemetry entry.
    pub fn translate_to_js_ir(&self, project: &Project) -> JsTranslation {
        let result = self.translate_to_js_ir_op(project);
        self.record(project.platform(), &result);
        result
    }

    /// Compile the project to bytecode class artifacts.
    ///
    /// Records one telemetry entry.
    pub fn compile_to_bytecode(&self, project: &Project) -> BytecodeCompilation {
        let result = self.compile_to_bytecode_op(project);
        self.record(project.platform(), &result);
        result
    }

    /// Translate the project to a WASM module plus its JavaScript glue.
    ///
    /// The WASM flavor follows the project's target platform; `debug_info`
    /// asks for a source map. Records one telemetry entry.
    pub fn translate_to_wasm(&self, project: &Project, debug_info: bool) -> WasmTranslation {
        let result = self.translate_to_wasm_op(project, debug_info);
        self.record(project.platform(), &result);
        result
    }

    /// Compile to bytecode and persist the outcome under `output_dir`.
    ///
    /// Success writes every artifact at its relative path. A diagnosed
    /// failure writes the rendered report to `compile.err`; an internal
    /// error writes its message there instead. Persistence faults are the
    /// one failure this method does not fold into the response; they
    /// propagate as [`PersistError`]. Records one telemetry entry.
    pub fn compile_and_persist(
        &self,
        project: &Project,
        output_dir: &Path,
    ) -> Result<CompilationResponse, PersistError> {
        let result = self.compile_to_bytecode_op(project);
        self.record(project.platform(), &result);
        match result {
            BackendResult::Compiled { payload, .. } => {
                persist::write_artifacts(output_dir, &payload)?;
                log::debug!(
                    "persisted {} artifact(s) under {}",
                    payload.len(),
                    output_dir.display()
                );
                Ok(CompilationResponse { success: true })
            }
            BackendResult::NotCompiled { diagnostics } => {
                persist::write_error_report(output_dir, &diagnostics.report_lines())?;
                Ok(CompilationResponse { success: false })
            }
            BackendResult::InternalError { message } => {
                persist::write_error_report(output_dir, &[message])?;
                Ok(CompilationResponse { success: false })
            }
        }
    }

    /// Suggest completions in the project's first file at a zero-based
    /// cursor position.
    ///
    /// Advisory: a project without files, an out-of-range position, a
    /// failing engine and infrastructure faults all degrade to an empty
    /// list. Never records telemetry.
    pub fn completions(&self, project: &Project, position: TextPosition) -> Vec<Completion> {
        let Some(first) = project.files().first() else {
            return Vec::new();
        };
        if !position_within(&first.text, position) {
            log::debug!(
                "completion position {position} out of range in '{}'",
                first.name
            );
            return Vec::new();
        }

        let outcome = (|| -> Result<Vec<Completion>, DispatchError> {
            let environment = self.environment.acquire()?;
            let handle = materialize_source(environment.context(), first)?;
            let completions = self.backends.completion.complete(
                environment.context(),
                &handle,
                position,
                project.platform(),
            )?;
            Ok(completions)
        })();

        match outcome {
            Ok(completions) => completions,
            Err(err) => {
                log::warn!(
                    "completion failed for {} project: {err}",
                    project.platform()
                );
                Vec::new()
            }
        }
    }

    /// Diagnostics of the operation matching the project's target platform,
    /// with the payload discarded.
    ///
    /// Advisory like [`ProjectExecutor::completions`]: an internal error
    /// anywhere in the chain degrades to an empty map. Never records
    /// telemetry.
    pub fn highlight(&self, project: &Project) -> CompilerDiagnostics {
        let (diagnostics, failure) = match project.platform() {
            TargetPlatform::Jvm | TargetPlatform::JvmTest => {
                split_diagnostics(self.compile_to_bytecode_op(project))
            }
            TargetPlatform::Js => split_diagnostics(self.translate_to_js_ir_op(project)),
            TargetPlatform::Wasm | TargetPlatform::WasmUi => {
                split_diagnostics(self.translate_to_wasm_op(project, false))
            }
        };
        if let Some(message) = failure {
            log::warn!(
                "highlight failed for {} project: {message}",
                project.platform()
            );
        }
        diagnostics
    }

    /// The toolchain version descriptor this executor reports.
    pub fn version(&self) -> &'static VersionInfo {
        VersionInfo::current()
    }

    // Operation bodies without the telemetry step. `highlight` reuses them,
    // which is what keeps advisory calls unrecorded by construction.

    fn run_program_op(&self, project: &Project, include_bytecode: bool) -> ExecutionResult {
        self.dispatch(project, |context, files| {
            self.backends
                .program
                .run(context, files, project.args(), include_bytecode)
        })
    }

    fn run_tests_op(&self, project: &Project, include_bytecode: bool) -> ExecutionResult {
        self.dispatch(project, |context, files| {
            self.backends
                .tests
                .run(context, files, project.args(), include_bytecode)
        })
    }

    fn translate_to_js_ir_op(&self, project: &Project) -> JsTranslation {
        let args = project.args_tokens();
        self.dispatch(project, |context, files| {
            self.backends.js.translate(context, files, &args)
        })
    }

    fn compile_to_bytecode_op(&self, project: &Project) -> BytecodeCompilation {
        self.dispatch(project, |context, files| {
            self.backends.bytecode.compile(
                context,
                files,
                project.args(),
                project.include_classpath(),
            )
        })
    }

    fn translate_to_wasm_op(&self, project: &Project, debug_info: bool) -> WasmTranslation {
        let variant = if project.platform() == TargetPlatform::WasmUi {
            WasmVariant::Ui
        } else {
            WasmVariant::Plain
        };
        self.dispatch(project, |context, files| {
            self.backends.wasm.translate(context, files, variant, debug_info)
        })
    }

    /// Acquire a scoped environment, materialize the project into it, run
    /// exactly one backend and flatten infrastructure failures into the
    /// internal-error arm. The environment is released when this returns,
    /// whatever the outcome.
    fn dispatch<T>(
        &self,
        project: &Project,
        operation: impl FnOnce(&CompileContext, &[FileHandle]) -> BackendResult<T>,
    ) -> BackendResult<T> {
        log::debug!(
            "dispatching {} project with {} file(s)",
            project.platform(),
            project.files().len()
        );
        let outcome = (|| -> Result<BackendResult<T>, DispatchError> {
            let environment = self.environment.acquire()?;
            let handles = materialize_project(environment.context(), project)?;
            Ok(operation(environment.context(), &handles))
        })();
        outcome.unwrap_or_else(|err| BackendResult::internal_error(err.to_string()))
    }

    fn record<T>(&self, target: TargetPlatform, result: &BackendResult<T>) {
        let version = VersionInfo::current().version.clone();
        let record = ExecutionRecord::from_result(result, target, version);
        if let Err(err) = self.telemetry.record(record) {
            log::warn!("telemetry sink failed for {target} result: {err}");
        }
    }
}

fn split_diagnostics<T>(result: BackendResult<T>) -> (CompilerDiagnostics, Option<String>) {
    match result {
        BackendResult::Compiled { diagnostics, .. } | BackendResult::NotCompiled { diagnostics } => {
            (diagnostics, None)
        }
        BackendResult::InternalError { message } => (CompilerDiagnostics::new(), Some(message)),
    }
}

/// True when `position` is a valid cursor in `text`. The cursor may sit one
/// past the end of its line, where an editor puts it while the user types.
fn position_within(text: &str, position: TextPosition) -> bool {
    match text.split('\n').nth(position.line as usize) {
        Some(line) => (position.column as usize) <= line.chars().count(),
        None => false,
    }
}
