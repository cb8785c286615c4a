//! Backend trait seams.
//!
//! One trait per backend keeps the signatures honest: the classpath flag
//! exists only on the bytecode compiler, tokenized arguments only on the JS
//! translator, the variant and debug pair only on the WASM translator.
//! Every backend must treat an empty file slice as a valid input and answer
//! with an empty success, so zero-file projects need no special cases
//! upstream.
//!
//! Backends report faults through the internal-error arm of
//! [`BackendResult`](crate::BackendResult) rather than panicking; a panic in
//! a backend is a bug in that backend.

use crate::context::CompileContext;
use crate::materialize::FileHandle;
use crate::result::{BytecodeCompilation, ExecutionResult, JsTranslation, WasmTranslation};
use serde::{Deserialize, Serialize};

/// Compiles a project for a JVM target and executes its program entry point.
pub trait ProgramBackend: Send + Sync {
    /// Run the sources with the raw argument string. When `include_bytecode`
    /// is set, the payload carries a bytecode listing next to the output.
    fn run(
        &self,
        context: &CompileContext,
        files: &[FileHandle],
        args: &str,
        include_bytecode: bool,
    ) -> ExecutionResult;
}

/// Compiles a project for a JVM target and drives the test harness over it.
pub trait TestBackend: Send + Sync {
    fn run(
        &self,
        context: &CompileContext,
        files: &[FileHandle],
        args: &str,
        include_bytecode: bool,
    ) -> ExecutionResult;
}

/// Compiles a project to bytecode class artifacts.
pub trait BytecodeBackend: Send + Sync {
    /// `include_classpath` asks for the runtime classpath to be linked into
    /// the compilation. No other backend has this switch.
    fn compile(
        &self,
        context: &CompileContext,
        files: &[FileHandle],
        args: &str,
        include_classpath: bool,
    ) -> BytecodeCompilation;
}

/// Translates a project to JavaScript through the IR pipeline.
pub trait JsBackend: Send + Sync {
    /// `args` is the project argument string already split on whitespace.
    fn translate(
        &self,
        context: &CompileContext,
        files: &[FileHandle],
        args: &[String],
    ) -> JsTranslation;
}

/// WASM flavor, selected from the project's target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WasmVariant {
    /// Plain browser module.
    Plain,
    /// Module linked against the UI framework runtime.
    Ui,
}

/// Translates a project to a WASM module plus its JavaScript glue.
pub trait WasmBackend: Send + Sync {
    fn translate(
        &self,
        context: &CompileContext,
        files: &[FileHandle],
        variant: WasmVariant,
        debug_info: bool,
    ) -> WasmTranslation;
}
