use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::value_objects::vcs_type::VcsType;

/// いずれかのルート配下にあるリポジトリの作業コピー
///
/// `rel_path` はプラットフォームに関係なく `/` 区切りで、先頭セグメントは
/// ホスト名（`github.com/motemen/ghq`）。計算で得られるビューであり、
/// 構築後に変更されることはない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalRepository {
    root_path: PathBuf,
    rel_path: String,
    full_path: PathBuf,
}

impl LocalRepository {
    /// ルートと `/` 区切りの相対パスから作成
    pub fn new(root_path: impl Into<PathBuf>, rel_path: impl Into<String>) -> Self {
        let root_path = root_path.into();
        let rel_path = rel_path.into();
        let full_path = rel_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(root_path.clone(), |path, segment| path.join(segment));

        Self {
            root_path,
            rel_path,
            full_path,
        }
    }

    /// リポジトリが属するルートディレクトリ
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// ルートからの相対パス（ホストが先頭）
    pub fn rel_path(&self) -> &str {
        &self.rel_path
    }

    /// 作業コピーのディスク上の場所
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// 相対パスのセグメント
    pub fn path_parts(&self) -> Vec<&str> {
        self.rel_path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// 相対パスのホスト部分
    pub fn host(&self) -> Option<&str> {
        self.path_parts().first().copied()
    }

    /// ホストを除いた相対パス
    pub fn non_host_path(&self) -> String {
        let parts = self.path_parts();
        parts.get(1..).unwrap_or_default().join("/")
    }

    /// 短いものから順に並べたリポジトリの別名
    ///
    /// `github.com/motemen/ghq` なら `ghq`、`motemen/ghq`、`github.com/motemen/ghq`。
    pub fn subpaths(&self) -> Vec<String> {
        let parts = self.path_parts();
        let mut subpaths: Vec<String> = Vec::with_capacity(parts.len());

        for start in (0..parts.len()).rev() {
            let candidate = parts[start..].join("/");
            if !subpaths.contains(&candidate) {
                subpaths.push(candidate);
            }
        }

        subpaths
    }

    /// `query` がこのリポジトリを指すかどうか
    ///
    /// いずれかの別名と一致するか、`/` を含み相対パスの一部に現れる場合に一致とする。
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim_matches('/');
        if query.is_empty() {
            return true;
        }
        if query.contains('/') && self.rel_path.contains(query) {
            return true;
        }
        self.subpaths().iter().any(|subpath| subpath == query)
    }

    /// ディスク上の作業コピーから判定したVCSの種類
    pub fn vcs_type(&self) -> Option<VcsType> {
        VcsType::detect(&self.full_path)
    }

    /// 作業コピーのディレクトリが存在するかどうか
    pub fn exists(&self) -> bool {
        self.full_path.is_dir()
    }
}
