use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::host_rules::rule_for;
use crate::common::error::GroveError;
use crate::common::result::{GroveResult, OptionExt};
use crate::domain::entities::local_repository::LocalRepository;
use crate::domain::value_objects::remote_url::RemoteUrl;

/// リモートURLとディスク上のパスを [`LocalRepository`] に対応付ける
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    roots: Vec<PathBuf>,
}

impl PathResolver {
    /// 順序付きのルート一覧からリゾルバを作成
    pub fn new(roots: impl Into<Vec<PathBuf>>) -> Self {
        Self {
            roots: roots.into(),
        }
    }

    /// 優先順のルート一覧
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// 新規クローン先のルート
    pub fn primary_root(&self) -> GroveResult<&Path> {
        self.roots
            .first()
            .map(PathBuf::as_path)
            .ok_or_internal_error("no repository roots configured")
    }

    /// いずれかのルート配下にある既存パスを記述する
    ///
    /// `full_path` を前方一致で含む最初のルートを使う。
    /// ルートそのもののパスはリポジトリではない。
    pub fn from_full_path(&self, full_path: impl AsRef<Path>) -> GroveResult<LocalRepository> {
        let full_path = full_path.as_ref();

        match self.roots.iter().find(|root| full_path.starts_with(root)) {
            Some(root) => Self::from_root_and_path(root, full_path),
            None => Err(GroveError::root_mismatch(full_path)),
        }
    }

    /// 指定したルートからの相対位置として `full_path` を記述する
    ///
    /// 走査中のルートが分かっている場合に使う。ルートが入れ子になっていても
    /// 他のルートは参照しない。
    pub fn from_root_and_path(
        root: &Path,
        full_path: impl AsRef<Path>,
    ) -> GroveResult<LocalRepository> {
        let full_path = full_path.as_ref();
        let rest = full_path
            .strip_prefix(root)
            .map_err(|_| GroveError::root_mismatch(full_path))?;

        let mut segments = Vec::new();
        for component in rest.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_string_lossy()),
                Component::CurDir => {}
                _ => {
                    return Err(GroveError::invalid_repository_path(
                        "relative segments are not allowed",
                        full_path,
                    ))
                }
            }
        }

        if segments.is_empty() {
            return Err(GroveError::invalid_repository_path(
                "path is a root directory",
                full_path,
            ));
        }

        Ok(LocalRepository::new(root, segments.join("/")))
    }

    /// `url` のクローン先をプライマリルート配下に求める
    pub fn from_url(&self, url: &RemoteUrl) -> GroveResult<LocalRepository> {
        let root = self.primary_root()?;
        let path = url.path().trim_matches('/');
        let rule = rule_for(url.host(), path);
        let shaped = rule.apply(path);

        debug!(url = %url, rule = rule.name, "resolved host rule");

        Ok(LocalRepository::new(
            root,
            format!("{}/{}", url.host(), shaped),
        ))
    }
}
