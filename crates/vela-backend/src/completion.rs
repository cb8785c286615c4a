//! The code completion seam.

use crate::context::CompileContext;
use crate::error::BackendError;
use crate::materialize::FileHandle;
use serde::{Deserialize, Serialize};
use vela_source::{TargetPlatform, TextPosition};

/// Category of a completion item, used by editors to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionKind {
    Keyword,
    Method,
    Property,
    Class,
    Local,
}

/// One suggestion at a cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Text inserted when the suggestion is accepted.
    pub text: String,
    /// Label shown in the suggestion list.
    pub display_text: String,
    /// Type or signature tail rendered after the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<String>,
    pub kind: CompletionKind,
}

impl Completion {
    pub fn new(text: impl Into<String>, kind: CompletionKind) -> Self {
        let text = text.into();
        Self {
            display_text: text.clone(),
            text,
            tail: None,
            kind,
        }
    }

    pub fn with_display_text(mut self, display_text: impl Into<String>) -> Self {
        self.display_text = display_text.into();
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }
}

/// Suggestion engine for in-editor completion.
///
/// The engine sees one materialized file and a zero-based cursor position,
/// and must cope with syntactically broken, mid-edit source. It may fail on
/// input it cannot analyze; the executor treats every failure as "no help
/// available" and never surfaces it to the caller.
pub trait CompletionEngine: Send + Sync {
    fn complete(
        &self,
        context: &CompileContext,
        file: &FileHandle,
        position: TextPosition,
        platform: TargetPlatform,
    ) -> Result<Vec<Completion>, BackendError>;
}
