use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

use crate::application::use_cases::get_repository::{
    GetOutcome, GetRepositoryConfig, GetRepositoryUseCase,
};
use crate::infrastructure::config::RootResolver;
use crate::infrastructure::process::ProcessRunner;

/// Handler for the get command
pub struct GetCommand {
    pub url: String,
    pub update: bool,
    pub shallow: bool,
    pub vcs: Option<String>,
}

impl GetCommand {
    pub fn new(url: String, update: bool, shallow: bool, vcs: Option<String>) -> Self {
        Self {
            url,
            update,
            shallow,
            vcs,
        }
    }

    pub async fn execute(&self, resolver: &RootResolver) -> Result<()> {
        let mut config = GetRepositoryConfig::new(self.url.clone())
            .with_update(self.update)
            .with_shallow(self.shallow);
        if let Some(vcs) = &self.vcs {
            config = config.with_vcs(vcs.clone());
        }

        let use_case = GetRepositoryUseCase::new(resolver.path_resolver(), Arc::new(ProcessRunner::new()));
        let outcome = use_case.execute(&config).await?;

        let path = outcome.repository().full_path().display().to_string();
        match outcome {
            GetOutcome::Cloned(_) => println!("{} cloned {}", "✓".green().bold(), path),
            GetOutcome::Updated(_) => println!("{} updated {}", "✓".green().bold(), path),
            GetOutcome::Skipped(_) => println!("{} exists {}", "::".blue().bold(), path),
        }
        Ok(())
    }
}
