pub mod local_repository;

pub use local_repository::LocalRepository;
