use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::value_objects::remote_url::RemoteUrl;
use crate::domain::value_objects::vcs_type::VcsType;
use crate::infrastructure::process::{CommandError, CommandInvocation, CommandRunner};

/// Name of the repository database Fossil clones into
pub const FOSSIL_REPO_NAME: &str = ".fossil";

/// Errors that can occur during VCS operations
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error("{vcs} {operation} is not supported")]
    UnsupportedOperation { vcs: VcsType, operation: String },

    #[error("External tool failed: {source}")]
    ExternalTool {
        #[from]
        source: CommandError,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VcsError {
    /// Create an unsupported operation error
    pub fn unsupported_operation(vcs: VcsType, operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            vcs,
            operation: operation.into(),
        }
    }
}

/// Clone and update capability shared by every backend
#[async_trait]
pub trait VcsOperations: Send + Sync {
    /// Materialize a working copy of `remote` at `local`
    ///
    /// `shallow` is translated into the tool's own option where one exists
    /// and ignored otherwise.
    async fn clone_repository(
        &self,
        runner: &dyn CommandRunner,
        remote: &RemoteUrl,
        local: &Path,
        shallow: bool,
    ) -> Result<(), VcsError>;

    /// Refresh the working copy at `local` in place
    async fn update(&self, runner: &dyn CommandRunner, local: &Path) -> Result<(), VcsError>;

    /// The system this backend drives
    fn vcs_type(&self) -> VcsType;
}

/// Supported version control integrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsBackend {
    Git,
    Subversion,
    GitSvn,
    Mercurial,
    Darcs,
    /// Clones its database to `<parent>/.fossil` and opens the checkout in
    /// `<parent>`, so the destination directory itself is never created.
    /// `update` still runs in the destination and needs it to exist.
    Fossil,
    /// Recognized but refuses every operation
    Cvs,
}

impl VcsBackend {
    /// Backend handling `vcs`
    pub fn for_type(vcs: VcsType) -> Self {
        match vcs {
            VcsType::Git => VcsBackend::Git,
            VcsType::Svn => VcsBackend::Subversion,
            VcsType::GitSvn => VcsBackend::GitSvn,
            VcsType::Hg => VcsBackend::Mercurial,
            VcsType::Darcs => VcsBackend::Darcs,
            VcsType::Fossil => VcsBackend::Fossil,
            VcsType::Cvs => VcsBackend::Cvs,
        }
    }

    /// Commands that clone `remote` into `local`, in execution order
    pub fn clone_commands(
        &self,
        remote: &RemoteUrl,
        local: &Path,
        shallow: bool,
    ) -> Result<Vec<CommandInvocation>, VcsError> {
        let url = remote.as_str();

        let commands = match self {
            VcsBackend::Git => {
                let mut cmd = CommandInvocation::new("git").arg("clone");
                if shallow {
                    cmd = cmd.args(["--depth", "1"]);
                }
                vec![cmd.arg(url).path_arg(local)]
            }
            VcsBackend::Subversion => {
                let mut cmd = CommandInvocation::new("svn").arg("checkout");
                if shallow {
                    cmd = cmd.args(["--depth", "1"]);
                }
                vec![cmd.arg(url).path_arg(local)]
            }
            VcsBackend::GitSvn => vec![CommandInvocation::new("git")
                .args(["svn", "clone", url])
                .path_arg(local)],
            VcsBackend::Mercurial => vec![CommandInvocation::new("hg")
                .args(["clone", url])
                .path_arg(local)],
            VcsBackend::Darcs => {
                let mut cmd = CommandInvocation::new("darcs").arg("get");
                if shallow {
                    cmd = cmd.arg("--lazy");
                }
                vec![cmd.arg(url).path_arg(local)]
            }
            VcsBackend::Fossil => {
                let parent = parent_dir(local);
                vec![
                    CommandInvocation::new("fossil")
                        .args(["clone", url])
                        .path_arg(&parent.join(FOSSIL_REPO_NAME)),
                    CommandInvocation::new("fossil")
                        .args(["open", FOSSIL_REPO_NAME])
                        .in_dir(parent),
                ]
            }
            VcsBackend::Cvs => {
                return Err(VcsError::unsupported_operation(VcsType::Cvs, "clone"))
            }
        };

        Ok(commands)
    }

    /// Command that refreshes the working copy at `local`
    pub fn update_command(&self, local: &Path) -> Result<CommandInvocation, VcsError> {
        let cmd = match self {
            VcsBackend::Git => CommandInvocation::new("git").args(["pull", "--ff-only"]),
            VcsBackend::Subversion => CommandInvocation::new("svn").arg("update"),
            VcsBackend::GitSvn => CommandInvocation::new("git").args(["svn", "rebase"]),
            VcsBackend::Mercurial => CommandInvocation::new("hg").args(["pull", "--update"]),
            VcsBackend::Darcs => CommandInvocation::new("darcs").arg("pull"),
            VcsBackend::Fossil => CommandInvocation::new("fossil").arg("update"),
            VcsBackend::Cvs => {
                return Err(VcsError::unsupported_operation(VcsType::Cvs, "update"))
            }
        };

        Ok(cmd.in_dir(local))
    }
}

fn parent_dir(local: &Path) -> PathBuf {
    local
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

async fn run_all(
    runner: &dyn CommandRunner,
    commands: Vec<CommandInvocation>,
) -> Result<(), VcsError> {
    for command in commands {
        runner.execute(command).await?;
    }
    Ok(())
}

#[async_trait]
impl VcsOperations for VcsBackend {
    async fn clone_repository(
        &self,
        runner: &dyn CommandRunner,
        remote: &RemoteUrl,
        local: &Path,
        shallow: bool,
    ) -> Result<(), VcsError> {
        let commands = self.clone_commands(remote, local, shallow)?;

        let parent = parent_dir(local);
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|source| VcsError::CreateDirectory {
                path: parent.clone(),
                source,
            })?;

        let vcs = self.vcs_type();
        if shallow && !vcs.supports_shallow_clone() {
            debug!(%vcs, "shallow clone not available, cloning full history");
        }

        info!(%vcs, tool = vcs.executable_name(), remote = %remote, local = %local.display(), "cloning");
        run_all(runner, commands).await
    }

    async fn update(&self, runner: &dyn CommandRunner, local: &Path) -> Result<(), VcsError> {
        let command = self.update_command(local)?;

        info!(vcs = %self.vcs_type(), local = %local.display(), "updating");
        run_all(runner, vec![command]).await
    }

    fn vcs_type(&self) -> VcsType {
        match self {
            VcsBackend::Git => VcsType::Git,
            VcsBackend::Subversion => VcsType::Svn,
            VcsBackend::GitSvn => VcsType::GitSvn,
            VcsBackend::Mercurial => VcsType::Hg,
            VcsBackend::Darcs => VcsType::Darcs,
            VcsBackend::Fossil => VcsType::Fossil,
            VcsBackend::Cvs => VcsType::Cvs,
        }
    }
}
