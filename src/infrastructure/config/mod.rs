pub mod roots;

pub use roots::{RootResolver, RootsConfig, ROOT_ENV_VAR};
