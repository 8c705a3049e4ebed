pub mod command_runner;

pub use command_runner::{CommandError, CommandInvocation, CommandRunner, ProcessRunner};

#[cfg(test)]
pub use command_runner::MockCommandRunner;
