use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::entities::local_repository::LocalRepository;
use crate::domain::services::path_resolver::PathResolver;
use crate::domain::value_objects::vcs_type::VcsType;

/// 全ルート配下の作業コピーを探索する
///
/// VCSのマーカーを直下に持つディレクトリはリポジトリの境界であり、
/// 一度だけ報告され、その中へは降りない。ディレクトリへのシンボリックリンクは
/// 辿るが、走査ごとに訪問済みディレクトリの正規パスを記録し、同じ場所へ二度入らない。
/// 報告されるリポジトリのルートは、常にそのとき走査しているルートになる。
#[derive(Debug, Clone)]
pub struct RepositoryWalker {
    resolver: PathResolver,
}

impl RepositoryWalker {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// 走査対象のルート
    pub fn roots(&self) -> &[PathBuf] {
        self.resolver.roots()
    }

    /// 優先順にルートごとに全リポジトリを訪問
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(LocalRepository),
    {
        for root in self.resolver.roots() {
            walk_root(root, &mut visit);
        }
    }

    /// ルートを並列に走査して全リポジトリを訪問
    ///
    /// 走査状態はルートごとに独立している。`visit` は複数スレッドから同時に呼ばれうる。
    pub fn walk_parallel<F>(&self, visit: F)
    where
        F: Fn(LocalRepository) + Sync,
    {
        self.resolver.roots().par_iter().for_each(|root| {
            walk_root(root, &mut |repo| visit(repo));
        });
    }

    /// 全リポジトリをベクタに集める
    pub fn collect(&self) -> Vec<LocalRepository> {
        let mut repos = Vec::new();
        self.walk(|repo| repos.push(repo));
        repos
    }
}

fn walk_root(root: &Path, visit: &mut dyn FnMut(LocalRepository)) {
    if !root.is_dir() {
        debug!(root = %root.display(), "root does not exist, skipping");
        return;
    }

    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut entries = WalkDir::new(root).follow_links(true).into_iter();

    while let Some(entry) = entries.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // walkdir自身が検出したリンクループもここに来る
                warn!(path = ?err.path(), error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let identity = match path.canonicalize() {
            Ok(identity) => identity,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot resolve directory, skipping");
                entries.skip_current_dir();
                continue;
            }
        };

        if !visited.insert(identity) {
            debug!(path = %path.display(), "already visited, skipping");
            entries.skip_current_dir();
            continue;
        }

        if entry.depth() == 0 || VcsType::detect(path).is_none() {
            continue;
        }

        entries.skip_current_dir();
        match PathResolver::from_root_and_path(root, path) {
            Ok(repo) => visit(repo),
            Err(err) => warn!(path = %path.display(), error = %err, "cannot describe repository"),
        }
    }
}
