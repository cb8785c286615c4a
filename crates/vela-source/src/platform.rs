//! Target platform selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The target platform a project is compiled for.
///
/// The set is closed: backend routing matches this enum exhaustively, so a
/// new variant without a routing decision does not build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetPlatform {
    /// JVM bytecode, executed through the program entry point.
    Jvm,
    /// JVM bytecode, executed through the test harness.
    JvmTest,
    /// JavaScript produced by the IR translator.
    Js,
    /// Plain WebAssembly module for the browser.
    Wasm,
    /// WebAssembly module linked against the UI framework runtime.
    WasmUi,
}

impl TargetPlatform {
    /// Targets compiled by the bytecode backend.
    pub fn is_jvm_family(&self) -> bool {
        matches!(self, TargetPlatform::Jvm | TargetPlatform::JvmTest)
    }

    /// Targets translated by the WASM backend.
    pub fn is_wasm_family(&self) -> bool {
        matches!(self, TargetPlatform::Wasm | TargetPlatform::WasmUi)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPlatform::Jvm => "jvm",
            TargetPlatform::JvmTest => "jvm-test",
            TargetPlatform::Js => "js",
            TargetPlatform::Wasm => "wasm",
            TargetPlatform::WasmUi => "wasm-ui",
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_families() {
        assert!(TargetPlatform::Jvm.is_jvm_family());
        assert!(TargetPlatform::JvmTest.is_jvm_family());
        assert!(!TargetPlatform::Js.is_jvm_family());
        assert!(TargetPlatform::Wasm.is_wasm_family());
        assert!(TargetPlatform::WasmUi.is_wasm_family());
        assert!(!TargetPlatform::JvmTest.is_wasm_family());
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(TargetPlatform::JvmTest.to_string(), "jvm-test");
        assert_eq!(TargetPlatform::WasmUi.to_string(), "wasm-ui");
    }
}
