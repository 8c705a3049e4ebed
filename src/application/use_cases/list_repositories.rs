use std::collections::HashMap;

use crate::application::use_cases::discover_repositories::RepositoryWalker;
use crate::domain::entities::local_repository::LocalRepository;

/// ローカルリポジトリ一覧の設定
#[derive(Debug, Clone, Default)]
pub struct ListRepositoriesConfig {
    /// このクエリに一致するリポジトリのみ
    pub query: Option<String>,
}

impl ListRepositoriesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// 探索したリポジトリを一覧する（絞り込み可）
pub struct ListRepositoriesUseCase {
    walker: RepositoryWalker,
}

impl ListRepositoriesUseCase {
    pub fn new(walker: RepositoryWalker) -> Self {
        Self { walker }
    }

    /// 一致したリポジトリをルート順、ルート内では相対パス順に返す
    pub fn execute(&self, config: &ListRepositoriesConfig) -> Vec<LocalRepository> {
        let mut repos = Vec::new();
        self.walker.walk(|repo| {
            let keep = config
                .query
                .as_deref()
                .map_or(true, |query| repo.matches(query));
            if keep {
                repos.push(repo);
            }
        });

        // ルートの位置をキーにした安定ソートでルートの優先順を保つ
        let order: HashMap<_, _> = self
            .walker
            .roots()
            .iter()
            .enumerate()
            .map(|(i, root)| (root.clone(), i))
            .collect();
        repos.sort_by(|a, b| {
            let ia = order.get(a.root_path()).copied().unwrap_or(usize::MAX);
            let ib = order.get(b.root_path()).copied().unwrap_or(usize::MAX);
            ia.cmp(&ib).then_with(|| a.rel_path().cmp(b.rel_path()))
        });
        repos
    }
}

/// 他のリポジトリと重複しない最短の別名
///
/// 短い別名がすべて重複する場合は相対パスを使う。
pub fn unique_names(repos: &[LocalRepository]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for repo in repos {
        for subpath in repo.subpaths() {
            *counts.entry(subpath).or_default() += 1;
        }
    }

    repos
        .iter()
        .map(|repo| {
            repo.subpaths()
                .into_iter()
                .find(|subpath| counts.get(subpath) == Some(&1))
                .unwrap_or_else(|| repo.rel_path().to_string())
        })
        .collect()
}
