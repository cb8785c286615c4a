//! Source file representation.

use serde::{Deserialize, Serialize};

/// A named source file inside a [`Project`](crate::Project).
///
/// Files are plain data at this layer. The executor turns each one into a
/// backend-ready handle scoped to a single operation, and that handle is
/// never retained once the operation finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Project-relative name, e.g. `Main.vela` or `util/strings.vela`.
    pub name: String,
    /// Raw text content.
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}
