//! End-to-end tests against the public API: wire an executor the way an
//! embedding server would and check what lands on disk.

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use vela_backend::{
    ArtifactSet, BackendError, BackendResult, BytecodeBackend, BytecodeCompilation,
    CompileContext, Completion, CompletionEngine, ExecutionResult, FileHandle, JsBackend,
    JsTranslation, ProgramBackend, ScratchEnvironment, TestBackend, WasmBackend,
    WasmTranslation, WasmVariant,
};
use vela_executor::{BackendSet, ProjectExecutor, ERROR_REPORT_FILE};
use vela_source::{
    CompilerDiagnostics, Diagnostic, Project, SourceFile, TargetPlatform, TextPosition,
    TextInterval,
};

/// Bytecode backend that reads the materialized sources back and emits one
/// fake class file per source, plus a failure mode for sources containing
/// the marker token `BROKEN`.
struct EchoingBytecode;

impl BytecodeBackend for EchoingBytecode {
    fn compile(
        &self,
        _context: &CompileContext,
        files: &[FileHandle],
        _args: &str,
        _include_classpath: bool,
    ) -> BytecodeCompilation {
        let mut artifacts = ArtifactSet::new();
        let mut diagnostics = CompilerDiagnostics::new();
        for file in files {
            let text = match fs::read_to_string(file.path()) {
                Ok(text) => text,
                Err(err) => return BackendResult::internal_error(err.to_string()),
            };
            if text.contains("BROKEN") {
                diagnostics.push(
                    file.name(),
                    Diagnostic::error("unresolved reference: BROKEN").with_interval(
                        TextInterval::new(TextPosition::new(0, 0), TextPosition::new(0, 6)),
                    ),
                );
                continue;
            }
            let class_path = format!("classes/{}.class", file.name().trim_end_matches(".vela"));
            artifacts.insert(class_path, text.into_bytes());
        }
        BackendResult::from_parts(artifacts, diagnostics)
    }
}

// The remaining seams are unreachable in these tests; answering with an
// internal error makes an accidental route visible in assertions.
struct UnroutedProgram;
impl ProgramBackend for UnroutedProgram {
    fn run(&self, _: &CompileContext, _: &[FileHandle], _: &str, _: bool) -> ExecutionResult {
        BackendResult::internal_error("program backend should not run")
    }
}

struct UnroutedTests;
impl TestBackend for UnroutedTests {
    fn run(&self, _: &CompileContext, _: &[FileHandle], _: &str, _: bool) -> ExecutionResult {
        BackendResult::internal_error("test backend should not run")
    }
}

struct UnroutedJs;
impl JsBackend for UnroutedJs {
    fn translate(&self, _: &CompileContext, _: &[FileHandle], _: &[String]) -> JsTranslation {
        BackendResult::internal_error("js backend should not run")
    }
}

struct UnroutedWasm;
impl WasmBackend for UnroutedWasm {
    fn translate(
        &self,
        _: &CompileContext,
        _: &[FileHandle],
        _: WasmVariant,
        _: bool,
    ) -> WasmTranslation {
        BackendResult::internal_error("wasm backend should not run")
    }
}

struct NoCompletions;
impl CompletionEngine for NoCompletions {
    fn complete(
        &self,
        _: &CompileContext,
        _: &FileHandle,
        _: TextPosition,
        _: TargetPlatform,
    ) -> Result<Vec<Completion>, BackendError> {
        Ok(Vec::new())
    }
}

fn executor() -> ProjectExecutor {
    ProjectExecutor::new(
        Arc::new(ScratchEnvironment::new()),
        BackendSet {
            program: Arc::new(UnroutedProgram),
            tests: Arc::new(UnroutedTests),
            bytecode: Arc::new(EchoingBytecode),
            js: Arc::new(UnroutedJs),
            wasm: Arc::new(UnroutedWasm),
            completion: Arc::new(NoCompletions),
        },
    )
}

fn jvm_project(files: Vec<SourceFile>) -> Project {
    Project::new(files, TargetPlatform::Jvm).expect("valid project")
}

#[test]
fn test_persisted_artifacts_round_trip() {
    let executor = executor();
    let out = TempDir::new().expect("temp output dir");
    let project = jvm_project(vec![
        SourceFile::new("Main.vela", "fun main() {}"),
        SourceFile::new("util/Text.vela", "fun trim() {}"),
    ]);

    let response = executor
        .compile_and_persist(&project, out.path())
        .expect("persistence must succeed");
    assert!(response.success);

    assert_eq!(
        fs::read_to_string(out.path().join("classes/Main.class")).unwrap(),
        "fun main() {}"
    );
    assert_eq!(
        fs::read_to_string(out.path().join("classes/util/Text.class")).unwrap(),
        "fun trim() {}"
    );
    assert!(!out.path().join(ERROR_REPORT_FILE).exists());
}

#[test]
fn test_failed_compile_leaves_only_the_report() {
    let executor = executor();
    let out = TempDir::new().expect("temp output dir");
    let project = jvm_project(vec![
        SourceFile::new("Main.vela", "BROKEN"),
        SourceFile::new("Ok.vela", "fun main() {}"),
    ]);

    let response = executor
        .compile_and_persist(&project, out.path())
        .expect("persistence must succeed");
    assert!(!response.success);

    let report = fs::read_to_string(out.path().join(ERROR_REPORT_FILE)).unwrap();
    assert_eq!(report, "Main.vela:1:1: ERROR: unresolved reference: BROKEN\n");
    assert!(!out.path().join("classes").exists());
}

#[test]
fn test_highlight_sees_what_compile_sees() {
    let executor = executor();
    let project = jvm_project(vec![SourceFile::new("Main.vela", "BROKEN")]);

    let diagnostics = executor.highlight(&project);
    assert!(diagnostics.has_errors());
    let lines = diagnostics.report_lines();
    assert_eq!(lines, vec!["Main.vela:1:1: ERROR: unresolved reference: BROKEN".to_string()]);
}

#[test]
fn test_repeated_persist_is_stable() {
    let executor = executor();
    let out = TempDir::new().expect("temp output dir");
    let project = jvm_project(vec![SourceFile::new("Main.vela", "fun main() {}")]);

    for _ in 0..2 {
        let response = executor.compile_and_persist(&project, out.path()).unwrap();
        assert!(response.success);
    }
    assert_eq!(
        fs::read_to_string(out.path().join("classes/Main.class")).unwrap(),
        "fun main() {}"
    );
}
