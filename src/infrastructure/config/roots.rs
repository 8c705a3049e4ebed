use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use crate::common::result::{GroveResult, OptionExt};
use crate::domain::services::path_resolver::PathResolver;

/// Environment variable holding the root list
pub const ROOT_ENV_VAR: &str = "GROVE_ROOT";

/// Directory name of the default root below the home directory
pub const DEFAULT_ROOT_DIR: &str = ".grove";

/// Where the root list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootsConfig {
    /// Explicit roots, returned verbatim when set (even when empty)
    pub roots: Option<Vec<PathBuf>>,
    /// Name of the path-list environment variable consulted otherwise
    pub env_var: String,
}

impl Default for RootsConfig {
    fn default() -> Self {
        Self {
            roots: None,
            env_var: ROOT_ENV_VAR.to_string(),
        }
    }
}

impl RootsConfig {
    /// Create a config reading the default environment variable
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit root list instead of the environment
    pub fn with_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots = Some(roots.into_iter().map(Into::into).collect());
        self
    }

    /// Read a different environment variable
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }
}

/// Resolves the ordered root list once and caches it
///
/// Roots are not checked for existence here.
#[derive(Debug, Default)]
pub struct RootResolver {
    config: RootsConfig,
    resolved: OnceLock<Vec<PathBuf>>,
}

impl RootResolver {
    pub fn new(config: RootsConfig) -> Self {
        Self {
            config,
            resolved: OnceLock::new(),
        }
    }

    /// Roots in precedence order
    ///
    /// Only an explicit empty override yields an empty list.
    pub fn roots(&self) -> &[PathBuf] {
        self.resolved.get_or_init(|| self.resolve())
    }

    /// Root used for new clones
    pub fn primary(&self) -> GroveResult<&Path> {
        self.roots()
            .first()
            .map(PathBuf::as_path)
            .ok_or_internal_error("no repository roots configured")
    }

    /// Path resolver bound to the resolved roots
    pub fn path_resolver(&self) -> PathResolver {
        PathResolver::new(self.roots().to_vec())
    }

    fn resolve(&self) -> Vec<PathBuf> {
        if let Some(roots) = &self.config.roots {
            debug!(?roots, "using configured roots");
            return roots.clone();
        }

        let from_env = std::env::var_os(&self.config.env_var)
            .map(|value| parse_root_list(&value))
            .unwrap_or_default();

        if !from_env.is_empty() {
            debug!(env_var = %self.config.env_var, roots = ?from_env, "using roots from environment");
            return from_env;
        }

        let default = default_root();
        debug!(root = %default.display(), "using default root");
        vec![default]
    }
}

/// Split a platform path list, dropping empty entries and keeping order
pub fn parse_root_list(value: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|path| !path.as_os_str().is_empty())
        .collect()
}

/// Default root below the user's home directory
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_ROOT_DIR)
}

/// Join roots with the platform path-list separator
pub fn join_root_list(roots: &[PathBuf]) -> Option<OsString> {
    std::env::join_paths(roots).ok()
}
