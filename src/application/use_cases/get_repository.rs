use std::sync::Arc;
use tracing::info;

use crate::common::error::GroveError;
use crate::common::result::GroveResult;
use crate::domain::entities::local_repository::LocalRepository;
use crate::domain::services::path_resolver::PathResolver;
use crate::domain::value_objects::remote_url::RemoteUrl;
use crate::domain::value_objects::vcs_type::VcsType;
use crate::infrastructure::process::CommandRunner;
use crate::infrastructure::vcs::{VcsBackend, VcsOperations, VcsRegistry};

/// リポジトリ取得の設定
#[derive(Debug, Clone, Default)]
pub struct GetRepositoryConfig {
    /// リモートURLまたはその省略形
    pub url: String,
    /// 明示的なVCS識別子（未指定なら検出または推測）
    pub vcs: Option<String>,
    /// 既存の作業コピーを更新するかどうか
    pub update: bool,
    /// 対応するVCSではシャロークローンを行う
    pub shallow: bool,
}

impl GetRepositoryConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_vcs(mut self, vcs: impl Into<String>) -> Self {
        self.vcs = Some(vcs.into());
        self
    }

    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn with_shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }
}

/// 取得の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetOutcome {
    Cloned(LocalRepository),
    Updated(LocalRepository),
    /// 既に存在し、更新も要求されていない
    Skipped(LocalRepository),
}

impl GetOutcome {
    pub fn repository(&self) -> &LocalRepository {
        match self {
            GetOutcome::Cloned(repo) | GetOutcome::Updated(repo) | GetOutcome::Skipped(repo) => {
                repo
            }
        }
    }
}

/// 正規の場所へリポジトリをクローンする、または既存のものを更新する
pub struct GetRepositoryUseCase {
    resolver: PathResolver,
    runner: Arc<dyn CommandRunner>,
}

impl GetRepositoryUseCase {
    pub fn new(resolver: PathResolver, runner: Arc<dyn CommandRunner>) -> Self {
        Self { resolver, runner }
    }

    pub async fn execute(&self, config: &GetRepositoryConfig) -> GroveResult<GetOutcome> {
        let url = RemoteUrl::parse(&config.url)?;
        let repo = self.resolver.from_url(&url)?;

        let explicit = match &config.vcs {
            Some(id) => Some(
                VcsRegistry::lookup(id).ok_or_else(|| GroveError::UnknownVcs(id.clone()))?,
            ),
            None => None,
        };

        if repo.exists() {
            if !config.update {
                info!(path = %repo.full_path().display(), "already exists, skipping");
                return Ok(GetOutcome::Skipped(repo));
            }

            let backend = explicit
                .or_else(|| repo.vcs_type().map(VcsBackend::for_type))
                .unwrap_or_else(|| infer_backend(&url));
            backend.update(self.runner.as_ref(), repo.full_path()).await?;
            return Ok(GetOutcome::Updated(repo));
        }

        let backend = explicit.unwrap_or_else(|| infer_backend(&url));
        backend
            .clone_repository(self.runner.as_ref(), &url, repo.full_path(), config.shallow)
            .await?;
        Ok(GetOutcome::Cloned(repo))
    }
}

/// URLだけからバックエンドを推測
///
/// Subversionのスキームとホスティング規約は `svn`、`.hg` で終わるものは
/// Mercurial、それ以外はgitとみなす。
pub fn infer_backend(url: &RemoteUrl) -> VcsBackend {
    let vcs = match (url.scheme(), url.host()) {
        ("svn" | "svn+ssh", _) => VcsType::Svn,
        (_, "svn.code.sf.net" | "subversion.assembla.com") => VcsType::Svn,
        (_, "scm.sourceforge.jp") if url.path().starts_with("/svnroot/") => VcsType::Svn,
        _ if url.path().trim_end_matches('/').ends_with(".hg") => VcsType::Hg,
        _ => VcsType::Git,
    };
    VcsBackend::for_type(vcs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::process::{CommandInvocation, MockCommandRunner};
    use tempfile::TempDir;

    fn use_case(root: &TempDir, runner: MockCommandRunner) -> GetRepositoryUseCase {
        GetRepositoryUseCase::new(
            PathResolver::new(vec![root.path().to_path_buf()]),
            Arc::new(runner),
        )
    }

    #[test]
    fn test_infer_backend() {
        let infer = |url: &str| infer_backend(&RemoteUrl::parse(url).unwrap());
        assert_eq!(infer("https://github.com/motemen/ghq"), VcsBackend::Git);
        assert_eq!(infer("svn+ssh://svn.example.com/repo"), VcsBackend::Subversion);
        assert_eq!(infer("http://svn.code.sf.net/p/ghq/code/trunk"), VcsBackend::Subversion);
        assert_eq!(infer("https://subversion.assembla.com/svn/ghq/"), VcsBackend::Subversion);
        assert_eq!(infer("http://scm.sourceforge.jp/svnroot/ghq/"), VcsBackend::Subversion);
        assert_eq!(infer("http://scm.sourceforge.jp/gitroot/ghq/ghq.git"), VcsBackend::Git);
        assert_eq!(infer("https://hg.example.com/team/tool.hg"), VcsBackend::Mercurial);
    }

    #[tokio::test]
    async fn test_clones_missing_repository() {
        let root = TempDir::new().unwrap();
        let dest = root.path().join("github.com").join("motemen").join("ghq");
        let expected_dest = dest.to_string_lossy().into_owned();

        let mut runner = MockCommandRunner::new();
        runner
            .expect_execute()
            .withf(move |cmd: &CommandInvocation| {
                cmd.program == "git"
                    && cmd.args
                        == vec![
                            "clone".to_string(),
                            "--depth".to_string(),
                            "1".to_string(),
                            "ssh://git@github.com/motemen/ghq.git".to_string(),
                            expected_dest.clone(),
                        ]
            })
            .times(1)
            .returning(|_| Ok(()));

        let outcome = use_case(&root, runner)
            .execute(
                &GetRepositoryConfig::new("git@github.com:motemen/ghq.git").with_shallow(true),
            )
            .await
            .unwrap();

        assert!(matches!(outcome, GetOutcome::Cloned(_)));
        assert_eq!(outcome.repository().full_path(), dest.as_path());
    }

    #[tokio::test]
    async fn test_existing_repository_is_skipped_without_update() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("github.com/motemen/ghq/.git")).unwrap();

        let mut runner = MockCommandRunner::new();
        runner.expect_execute().never();

        let outcome = use_case(&root, runner)
            .execute(&GetRepositoryConfig::new("https://github.com/motemen/ghq"))
            .await
            .unwrap();
        assert!(matches!(outcome, GetOutcome::Skipped(_)));
    }

    #[tokio::test]
    async fn test_update_uses_detected_vcs() {
        let root = TempDir::new().unwrap();
        let dest = root.path().join("example.com").join("team").join("tool");
        std::fs::create_dir_all(dest.join(".hg")).unwrap();
        let expected_dir = dest.clone();

        let mut runner = MockCommandRunner::new();
        runner
            .expect_execute()
            .withf(move |cmd: &CommandInvocation| {
                cmd.program == "hg" && cmd.working_dir.as_ref() == Some(&expected_dir)
            })
            .times(1)
            .returning(|_| Ok(()));

        let outcome = use_case(&root, runner)
            .execute(&GetRepositoryConfig::new("https://example.com/team/tool").with_update(true))
            .await
            .unwrap();
        assert!(matches!(outcome, GetOutcome::Updated(_)));
    }

    #[tokio::test]
    async fn test_unknown_vcs_is_rejected_before_spawning() {
        let root = TempDir::new().unwrap();
        let mut runner = MockCommandRunner::new();
        runner.expect_execute().never();

        let result = use_case(&root, runner)
            .execute(&GetRepositoryConfig::new("https://example.com/a/b").with_vcs("bzr"))
            .await;
        assert!(matches!(result, Err(GroveError::UnknownVcs(ref id)) if id == "bzr"));
    }

    #[tokio::test]
    async fn test_cvs_is_unsupported() {
        let root = TempDir::new().unwrap();
        let mut runner = MockCommandRunner::new();
        runner.expect_execute().never();

        let result = use_case(&root, runner)
            .execute(&GetRepositoryConfig::new("https://example.com/a/b").with_vcs("cvs"))
            .await;
        let err = result.unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(err.to_string(), "CVS clone is not supported");
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let root = TempDir::new().unwrap();
        let runner = MockCommandRunner::new();

        let result = use_case(&root, runner)
            .execute(&GetRepositoryConfig::new("https://github.com/"))
            .await;
        assert!(matches!(result, Err(GroveError::InvalidUrl { .. })));
    }
}
