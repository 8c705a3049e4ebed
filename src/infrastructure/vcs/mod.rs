/// Version control backends
///
/// Each supported system is a variant of [`VcsBackend`] that knows how to
/// invoke its external tool for clone and update. [`VcsRegistry`] maps the
/// public identifiers (`git`, `hg`, ...) onto backends.
pub mod backend;
pub mod registry;

pub use backend::{VcsBackend, VcsError, VcsOperations, FOSSIL_REPO_NAME};
pub use registry::VcsRegistry;
