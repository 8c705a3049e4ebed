//! # grove - keep repository clones in a predictable layout
//!
//! `grove` stores every clone under `<root>/<host>/<path>`, derived from the
//! remote URL, and drives the matching version control tool to clone or
//! update it.
//!
//! ## Features
//!
//! - **Path resolution**: Map remote URLs (including the SourceForge, Assembla
//!   and stash-style hosting conventions) onto local paths, and local paths
//!   back onto repository descriptors with short aliases
//! - **Discovery**: Find every working copy below the configured roots,
//!   following symbolic links without looping
//! - **Multiple VCS**: git, Subversion, git-svn, Mercurial, Darcs and Fossil
//! - **Multiple roots**: `GROVE_ROOT` holds a path list; the first entry
//!   receives new clones
//!
//! ## Architecture
//!
//! - [`domain`]: Repository descriptors, URL value objects and the path resolver
//! - [`application`]: Discovery walker and the get/list use cases
//! - [`infrastructure`]: Root configuration, VCS backends and process execution
//! - [`presentation`]: CLI interface
//! - [`common`]: Shared error handling
//!
//! ## Examples
//!
//! ```rust
//! use grove::domain::services::path_resolver::PathResolver;
//! use grove::domain::value_objects::remote_url::RemoteUrl;
//! use std::path::PathBuf;
//!
//! # fn example() -> grove::Result<()> {
//! let resolver = PathResolver::new(vec![PathBuf::from("/repos")]);
//! let url = RemoteUrl::parse("https://github.com/motemen/ghq.git")?;
//! let repo = resolver.from_url(&url)?;
//!
//! assert_eq!(repo.rel_path(), "github.com/motemen/ghq");
//! assert_eq!(repo.subpaths(), vec!["ghq", "motemen/ghq", "github.com/motemen/ghq"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ```rust,no_run
//! use grove::application::use_cases::RepositoryWalker;
//! use grove::infrastructure::config::{RootResolver, RootsConfig};
//!
//! let roots = RootResolver::new(RootsConfig::new());
//! RepositoryWalker::new(roots.path_resolver()).walk(|repo| {
//!     println!("{}", repo.full_path().display());
//! });
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::GroveError;
pub use crate::common::result::GroveResult as Result;
pub use crate::domain::entities::local_repository::LocalRepository;
