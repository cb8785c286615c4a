//! Projects: the unit of every executor operation.

use crate::error::ProjectError;
use crate::file::SourceFile;
use crate::platform::TargetPlatform;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// An ordered, name-unique set of source files plus the target platform and
/// the target-specific settings of one compilation.
///
/// Projects are immutable once constructed and are handed into executor
/// operations by reference; no operation retains one past its own return.
/// Construction goes through [`Project::new`] so the name-uniqueness
/// invariant holds for every value of this type, including deserialized ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProject")]
pub struct Project {
    files: Vec<SourceFile>,
    platform: TargetPlatform,
    args: String,
    include_classpath: bool,
}

/// Wire shape of a project before validation.
#[derive(Deserialize)]
struct RawProject {
    files: Vec<SourceFile>,
    platform: TargetPlatform,
    #[serde(default)]
    args: String,
    #[serde(default)]
    include_classpath: bool,
}

impl TryFrom<RawProject> for Project {
    type Error = ProjectError;

    fn try_from(raw: RawProject) -> Result<Self, Self::Error> {
        let project = Project::new(raw.files, raw.platform)?
            .with_args(raw.args)
            .with_classpath(raw.include_classpath);
        Ok(project)
    }
}

impl Project {
    /// Build a project over `files`, rejecting empty and duplicate names.
    ///
    /// A project with no files is legal; the routed backend still runs once
    /// and reports whatever an empty input means for its target.
    pub fn new(files: Vec<SourceFile>, platform: TargetPlatform) -> Result<Self, ProjectError> {
        let mut seen = FxHashSet::default();
        for file in &files {
            if file.name.is_empty() {
                return Err(ProjectError::EmptyFileName);
            }
            if !seen.insert(file.name.as_str()) {
                return Err(ProjectError::DuplicateFileName(file.name.clone()));
            }
        }
        Ok(Self {
            files,
            platform,
            args: String::new(),
            include_classpath: false,
        })
    }

    /// Set the raw argument string passed to runs and compilations.
    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = args.into();
        self
    }

    /// Ask the bytecode backend to link the runtime classpath. Ignored by
    /// every other backend.
    pub fn with_classpath(mut self, include_classpath: bool) -> Self {
        self.include_classpath = include_classpath;
        self
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn platform(&self) -> TargetPlatform {
        self.platform
    }

    pub fn args(&self) -> &str {
        &self.args
    }

    pub fn include_classpath(&self) -> bool {
        self.include_classpath
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.files.iter().map(|file| file.name.as_str())
    }

    /// The argument string split on whitespace, as consumed by the JS
    /// translator. A blank string yields no tokens.
    pub fn args_tokens(&self) -> Vec<String> {
        self.args.split_whitespace().map(str::to_owned).collect()
    }
}
