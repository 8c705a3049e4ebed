//! Mock services for testing
//!
//! A command runner that records invocations instead of spawning processes.

use async_trait::async_trait;
use grove::infrastructure::process::{CommandError, CommandInvocation, CommandRunner};
use std::sync::{Arc, Mutex};

/// Records every invocation; optionally fails those whose program matches
#[derive(Clone, Default)]
pub struct RecordingRunner {
    /// Call history for verification
    calls: Arc<Mutex<Vec<CommandInvocation>>>,
    /// Program name that should exit unsuccessfully
    failing_program: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` fail with exit code 1
    pub fn failing(program: impl Into<String>) -> Self {
        Self {
            calls: Arc::default(),
            failing_program: Some(program.into()),
        }
    }

    /// Get call history for verification
    pub fn calls(&self) -> Vec<CommandInvocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Each call rendered as `program arg...`
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn execute(&self, invocation: CommandInvocation) -> Result<(), CommandError> {
        self.calls.lock().unwrap().push(invocation.clone());

        if self.failing_program.as_deref() == Some(invocation.program.as_str()) {
            return Err(CommandError::NonZeroExit {
                command: invocation.to_string(),
                exit_code: Some(1),
            });
        }
        Ok(())
    }
}
