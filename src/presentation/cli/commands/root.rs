use anyhow::Result;

use crate::common::result::GroveResult;
use crate::infrastructure::config::RootResolver;

/// Handler for the root command
pub struct RootCommand {
    pub all: bool,
}

impl RootCommand {
    pub fn new(all: bool) -> Self {
        Self { all }
    }

    pub fn execute(&self, resolver: &RootResolver) -> Result<()> {
        for line in self.lines(resolver)? {
            println!("{line}");
        }
        Ok(())
    }

    fn lines(&self, resolver: &RootResolver) -> GroveResult<Vec<String>> {
        if self.all {
            Ok(resolver
                .roots()
                .iter()
                .map(|root| root.display().to_string())
                .collect())
        } else {
            Ok(vec![resolver.primary()?.display().to_string()])
        }
    }
}
