pub mod remote_url;
pub mod vcs_type;

pub use remote_url::{RemoteUrl, RemoteUrlError};
pub use vcs_type::VcsType;
