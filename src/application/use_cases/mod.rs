pub mod discover_repositories;
pub mod get_repository;
pub mod list_repositories;

pub use discover_repositories::RepositoryWalker;
pub use get_repository::{GetOutcome, GetRepositoryConfig, GetRepositoryUseCase};
pub use list_repositories::{ListRepositoriesConfig, ListRepositoriesUseCase};
