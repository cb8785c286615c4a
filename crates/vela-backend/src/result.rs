//! The uniform backend result model.
//!
//! Every backend answers with the same three-way shape: artifacts plus
//! diagnostics when compilation succeeded, diagnostics alone when the
//! sources were diagnosed as uncompilable, or a bare message when the
//! backend itself fell over. Callers decide "did it work, and what should
//! the user read" without knowing which backend ran.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use vela_source::CompilerDiagnostics;

/// Outcome of one backend invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum BackendResult<T> {
    /// The backend produced its payload; diagnostics are warnings at worst.
    Compiled {
        payload: T,
        diagnostics: CompilerDiagnostics,
    },
    /// The backend ran to completion and diagnosed the sources as
    /// uncompilable.
    NotCompiled { diagnostics: CompilerDiagnostics },
    /// The backend, or the infrastructure on the way to it, failed in a way
    /// the user's sources did not cause.
    InternalError { message: String },
}

impl<T> BackendResult<T> {
    /// Classify a finished compilation.
    ///
    /// Any `ERROR` diagnostic makes the result [`BackendResult::NotCompiled`]
    /// and discards the payload; a failed compilation never exposes partial
    /// artifacts.
    pub fn from_parts(payload: T, diagnostics: CompilerDiagnostics) -> Self {
        if diagnostics.has_errors() {
            BackendResult::NotCompiled { diagnostics }
        } else {
            BackendResult::Compiled {
                payload,
                diagnostics,
            }
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        BackendResult::InternalError {
            message: message.into(),
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self, BackendResult::Compiled { .. })
    }

    /// Diagnostics of a run that completed, `None` for internal errors.
    pub fn diagnostics(&self) -> Option<&CompilerDiagnostics> {
        match self {
            BackendResult::Compiled { diagnostics, .. }
            | BackendResult::NotCompiled { diagnostics } => Some(diagnostics),
            BackendResult::InternalError { .. } => None,
        }
    }

    /// Diagnostics by value; internal errors yield an empty map.
    pub fn into_diagnostics(self) -> CompilerDiagnostics {
        match self {
            BackendResult::Compiled { diagnostics, .. }
            | BackendResult::NotCompiled { diagnostics } => diagnostics,
            BackendResult::InternalError { .. } => CompilerDiagnostics::new(),
        }
    }
}

/// Output of the program and test runners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramOutput {
    /// Captured program or test-harness output.
    pub text: String,
    /// Bytecode listing, present only when the caller asked for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytecode: Option<String>,
}

impl ProgramOutput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bytecode: None,
        }
    }

    pub fn with_bytecode(mut self, bytecode: impl Into<String>) -> Self {
        self.bytecode = Some(bytecode.into());
        self
    }
}

/// Compiled artifacts keyed by output-relative path.
///
/// Insertion order is preserved so persisted trees are written, and listed,
/// deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactSet {
    files: IndexMap<String, Vec<u8>>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.files
            .iter()
            .map(|(path, bytes)| (path.as_str(), bytes.as_slice()))
    }
}

impl FromIterator<(String, Vec<u8>)> for ArtifactSet {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// JavaScript produced by the IR translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsCode {
    pub code: String,
}

impl JsCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// WebAssembly module plus the browser glue that instantiates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasmModule {
    /// Binary module bytes.
    pub module: Vec<u8>,
    /// JavaScript glue that loads and instantiates the module.
    pub glue_code: String,
    /// Source map, present only when debug info was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_map: Option<String>,
}

pub type ExecutionResult = BackendResult<ProgramOutput>;
pub type BytecodeCompilation = BackendResult<ArtifactSet>;
pub type JsTranslation = BackendResult<JsCode>;
pub type WasmTranslation = BackendResult<WasmModule>;
