//! Pure mapping between remote URLs and local paths

pub mod host_rules;
pub mod path_resolver;

pub use host_rules::{rule_for, HostRule, HOST_RULES};
pub use path_resolver::PathResolver;
