use anyhow::Result;
use serde::Serialize;

use crate::application::use_cases::discover_repositories::RepositoryWalker;
use crate::application::use_cases::list_repositories::{
    unique_names, ListRepositoriesConfig, ListRepositoriesUseCase,
};
use crate::common::result::GroveResult;
use crate::domain::entities::local_repository::LocalRepository;
use crate::infrastructure::config::RootResolver;
use crate::presentation::cli::OutputFormat;

/// Handler for the list command
pub struct ListCommand {
    pub query: Option<String>,
    pub full_path: bool,
    pub unique: bool,
    pub format: OutputFormat,
}

/// Structured form of one listed repository
#[derive(Debug, Serialize)]
struct ListedRepository<'a> {
    root: &'a std::path::Path,
    rel_path: &'a str,
    full_path: &'a std::path::Path,
    vcs: Option<&'static str>,
    subpaths: Vec<String>,
}

impl<'a> From<&'a LocalRepository> for ListedRepository<'a> {
    fn from(repo: &'a LocalRepository) -> Self {
        Self {
            root: repo.root_path(),
            rel_path: repo.rel_path(),
            full_path: repo.full_path(),
            vcs: repo.vcs_type().map(|vcs| vcs.id()),
            subpaths: repo.subpaths(),
        }
    }
}

impl ListCommand {
    pub fn new(query: Option<String>, full_path: bool, unique: bool, format: OutputFormat) -> Self {
        Self {
            query,
            full_path,
            unique,
            format,
        }
    }

    pub fn execute(&self, resolver: &RootResolver) -> Result<()> {
        let mut config = ListRepositoriesConfig::new();
        if let Some(query) = &self.query {
            config = config.with_query(query.clone());
        }

        let walker = RepositoryWalker::new(resolver.path_resolver());
        let repos = ListRepositoriesUseCase::new(walker).execute(&config);

        print!("{}", self.render(&repos)?);
        Ok(())
    }

    fn render(&self, repos: &[LocalRepository]) -> GroveResult<String> {
        let output = match self.format {
            OutputFormat::Text => {
                let lines: Vec<String> = if self.unique {
                    unique_names(repos)
                } else if self.full_path {
                    repos
                        .iter()
                        .map(|repo| repo.full_path().display().to_string())
                        .collect()
                } else {
                    repos.iter().map(|repo| repo.rel_path().to_string()).collect()
                };
                lines.iter().map(|line| format!("{line}\n")).collect()
            }
            OutputFormat::Json => {
                let listed: Vec<ListedRepository> = repos.iter().map(Into::into).collect();
                format!("{}\n", serde_json::to_string_pretty(&listed)?)
            }
            OutputFormat::Yaml => {
                let listed: Vec<ListedRepository> = repos.iter().map(Into::into).collect();
                serde_yaml::to_string(&listed)?
            }
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos() -> Vec<LocalRepository> {
        vec![
            LocalRepository::new("/repos", "github.com/motemen/ghq"),
            LocalRepository::new("/repos", "github.com/other/ghq"),
        ]
    }

    #[test]
    fn test_render_text() {
        let cmd = ListCommand::new(None, false, false, OutputFormat::Text);
        assert_eq!(
            cmd.render(&repos()).unwrap(),
            "github.com/motemen/ghq\ngithub.com/other/ghq\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_render_full_path() {
        let cmd = ListCommand::new(None, true, false, OutputFormat::Text);
        assert_eq!(
            cmd.render(&repos()).unwrap(),
            "/repos/github.com/motemen/ghq\n/repos/github.com/other/ghq\n"
        );
    }

    #[test]
    fn test_render_unique() {
        let cmd = ListCommand::new(None, false, true, OutputFormat::Text);
        assert_eq!(cmd.render(&repos()).unwrap(), "motemen/ghq\nother/ghq\n");
    }

    #[test]
    fn test_render_json() {
        let cmd = ListCommand::new(None, false, false, OutputFormat::Json);
        let output = cmd.render(&repos()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["rel_path"], "github.com/motemen/ghq");
        assert_eq!(value[1]["subpaths"][0], "ghq");
        assert!(value[0]["vcs"].is_null());
    }

    #[test]
    fn test_render_yaml() {
        let cmd = ListCommand::new(None, false, false, OutputFormat::Yaml);
        let output = cmd.render(&repos()).unwrap();
        assert!(output.contains("rel_path: github.com/other/ghq"));
    }
}
