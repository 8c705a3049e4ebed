/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Root directory configuration (environment, explicit overrides)
/// - VCS backends (git, svn, git-svn, hg, darcs, fossil)
/// - Process execution
pub mod config;
pub mod process;
pub mod vcs;

pub use config::{RootResolver, RootsConfig};
pub use process::{CommandInvocation, CommandRunner, ProcessRunner};
pub use vcs::{VcsBackend, VcsError, VcsOperations, VcsRegistry};
