//! Scoped compilation environments.
//!
//! Backends need per-operation state: a scratch directory holding the
//! materialized sources plus variables the provider resolves for them, such
//! as toolchain locations. [`Environment`] is the RAII guard around that
//! state. The executor acquires one guard per operation and drops it on
//! every exit path, which releases whatever the provider attached, for
//! successful runs, diagnosed failures and internal errors alike.

use crate::error::EnvironmentError;
use rustc_hash::FxHashMap;
use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use vela_source::EnvironmentConfig;

/// Compilation state scoped to exactly one executor operation.
///
/// Backends receive a shared reference. The context is fully built before
/// the backend runs and is torn down together with its owning
/// [`Environment`], so nothing a backend sees outlives the call.
#[derive(Debug, Clone)]
pub struct CompileContext {
    scratch_dir: PathBuf,
    vars: FxHashMap<String, String>,
}

impl CompileContext {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            vars: FxHashMap::default(),
        }
    }

    /// Working directory for materialized sources and backend output.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// RAII guard for one compilation environment.
///
/// Resources attached with [`Environment::hold`] (temporary directories,
/// toolchain locks) live exactly as long as the guard. Dropping the guard is
/// the release contract; there is no separate close call to forget.
pub struct Environment {
    context: CompileContext,
    resources: Vec<Box<dyn Any + Send>>,
}

impl Environment {
    pub fn new(context: CompileContext) -> Self {
        Self {
            context,
            resources: Vec::new(),
        }
    }

    /// Keep `resource` alive for the lifetime of this environment.
    pub fn hold(&mut self, resource: impl Any + Send) {
        self.resources.push(Box::new(resource));
    }

    pub fn context(&self) -> &CompileContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut CompileContext {
        &mut self.context
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("context", &self.context)
            .field("resources", &self.resources.len())
            .finish()
    }
}

/// Provider of scoped compilation environments.
///
/// Acquisitions are independent: concurrent callers receive disjoint
/// contexts and may release them in any order. A provider that cannot
/// currently produce an environment reports [`EnvironmentError`]; the
/// executor shapes that into an internal-error result for primary
/// operations and into an empty result for advisory ones.
pub trait EnvironmentProvider: Send + Sync {
    fn acquire(&self) -> Result<Environment, EnvironmentError>;
}

/// Environment provider backed by process-temporary scratch directories.
///
/// Deployments that ship a real toolchain wire their own provider with the
/// variables their backends resolve. This one supplies only the
/// scoped-directory contract, which is everything the execution core itself
/// relies on.
#[derive(Debug, Default)]
pub struct ScratchEnvironment {
    config: EnvironmentConfig,
}

impl ScratchEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EnvironmentConfig) -> Self {
        Self { config }
    }
}

impl EnvironmentProvider for ScratchEnvironment {
    fn acquire(&self) -> Result<Environment, EnvironmentError> {
        let dir = tempfile::Builder::new()
            .prefix("vela-compile-")
            .tempdir()
            .map_err(EnvironmentError::Scratch)?;
        let mut context = CompileContext::new(dir.path());
        for (key, value) in &self.config.vars {
            context.set_var(key.clone(), value.clone());
        }
        log::trace!("acquired environment at {}", dir.path().display());

        let mut environment = Environment::new(context);
        if self.config.keep_scratch {
            // Skip cleanup so the directory can be inspected after release.
            std::mem::forget(dir);
        } else {
            environment.hold(dir);
        }
        Ok(environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisitions_are_disjoint() {
        let provider = ScratchEnvironment::new();
        let first = provider.acquire().unwrap();
        let second = provider.acquire().unwrap();
        assert_ne!(first.context().scratch_dir(), second.context().scratch_dir());
    }

    #[test]
    fn test_release_removes_scratch_dir() {
        let provider = ScratchEnvironment::new();
        let environment = provider.acquire().unwrap();
        let scratch = environment.context().scratch_dir().to_path_buf();
        assert!(scratch.is_dir());
        drop(environment);
        assert!(!scratch.exists());
    }

    #[test]
    fn test_keep_scratch_outlives_release() {
        let config = EnvironmentConfig {
            keep_scratch: true,
            ..EnvironmentConfig::default()
        };
        let provider = ScratchEnvironment::with_config(config);
        let environment = provider.acquire().unwrap();
        let scratch = environment.context().scratch_dir().to_path_buf();
        drop(environment);
        assert!(scratch.is_dir());
        std::fs::remove_dir_all(scratch).unwrap();
    }

    #[test]
    fn test_config_vars_are_seeded() {
        let mut config = EnvironmentConfig::default();
        config.vars.insert("VELA_HOME".to_string(), "/opt/vela".to_string());
        let provider = ScratchEnvironment::with_config(config);
        let environment = provider.acquire().unwrap();
        assert_eq!(environment.context().var("VELA_HOME"), Some("/opt/vela"));
        assert_eq!(environment.context().var("MISSING"), None);
    }

    #[test]
    fn test_held_resources_drop_with_environment() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        struct Flag(Arc<AtomicBool>);
        impl Drop for Flag {
            fn drop(&mut self) {
                self.0.store(true, Ordering::SeqCst);
            }
        }

        let dropped = Arc::new(AtomicBool::new(false));
        let provider = ScratchEnvironment::new();
        let mut environment = provider.acquire().unwrap();
        environment.hold(Flag(dropped.clone()));
        assert!(!dropped.load(Ordering::SeqCst));
        drop(environment);
        assert!(dropped.load(Ordering::SeqCst));
    }
}
