use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Version control system kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VcsType {
    /// Git version control system
    Git,
    /// Subversion (SVN) version control system
    Svn,
    /// Subversion repository mirrored through git-svn
    GitSvn,
    /// Mercurial (hg)
    Hg,
    /// Darcs
    Darcs,
    /// Fossil
    Fossil,
    /// CVS, recognized but not supported for clone/update
    Cvs,
}

impl Default for VcsType {
    fn default() -> Self {
        Self::Git
    }
}

impl fmt::Display for VcsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VcsType::Git => "Git",
            VcsType::Svn => "Subversion",
            VcsType::GitSvn => "git-svn",
            VcsType::Hg => "Mercurial",
            VcsType::Darcs => "Darcs",
            VcsType::Fossil => "Fossil",
            VcsType::Cvs => "CVS",
        };
        f.write_str(name)
    }
}

impl FromStr for VcsType {
    type Err = VcsTypeError;

    /// Identifiers are case-sensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git" | "github" => Ok(VcsType::Git),
            "svn" | "subversion" => Ok(VcsType::Svn),
            "git-svn" => Ok(VcsType::GitSvn),
            "hg" | "mercurial" => Ok(VcsType::Hg),
            "darcs" => Ok(VcsType::Darcs),
            "fossil" => Ok(VcsType::Fossil),
            "cvs" => Ok(VcsType::Cvs),
            _ => Err(VcsTypeError::UnknownVcs(s.to_string())),
        }
    }
}

impl VcsType {
    /// Every known system, in marker detection order
    ///
    /// git-svn shares the `.git` marker with Git and is therefore never detected.
    pub const ALL: [VcsType; 7] = [
        VcsType::Git,
        VcsType::Svn,
        VcsType::Hg,
        VcsType::Darcs,
        VcsType::Fossil,
        VcsType::Cvs,
        VcsType::GitSvn,
    ];

    /// Canonical identifier
    pub fn id(&self) -> &'static str {
        match self {
            VcsType::Git => "git",
            VcsType::Svn => "svn",
            VcsType::GitSvn => "git-svn",
            VcsType::Hg => "hg",
            VcsType::Darcs => "darcs",
            VcsType::Fossil => "fossil",
            VcsType::Cvs => "cvs",
        }
    }

    /// Entries whose presence in a directory marks it as a working copy
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            VcsType::Git | VcsType::GitSvn => &[".git"],
            VcsType::Svn => &[".svn"],
            VcsType::Hg => &[".hg"],
            VcsType::Darcs => &["_darcs"],
            VcsType::Fossil => &[".fslckout", "_FOSSIL_"],
            VcsType::Cvs => &["CVS"],
        }
    }

    /// Standard executable name
    pub fn executable_name(&self) -> &'static str {
        match self {
            VcsType::Git | VcsType::GitSvn => "git",
            VcsType::Svn => "svn",
            VcsType::Hg => "hg",
            VcsType::Darcs => "darcs",
            VcsType::Fossil => "fossil",
            VcsType::Cvs => "cvs",
        }
    }

    /// Whether the tool has a shallow or lazy clone mode
    pub fn supports_shallow_clone(&self) -> bool {
        matches!(self, VcsType::Git | VcsType::Svn | VcsType::Darcs)
    }

    /// Detect the working copy kind of `dir` from the markers it directly contains
    pub fn detect(dir: &Path) -> Option<VcsType> {
        Self::ALL.into_iter().find(|vcs| {
            vcs.markers()
                .iter()
                .any(|marker| dir.join(marker).symlink_metadata().is_ok())
        })
    }
}

/// Errors that can occur when working with VCS identifiers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VcsTypeError {
    #[error("Unknown VCS: '{0}'. Supported identifiers are: git, github, svn, subversion, git-svn, hg, mercurial, darcs, fossil")]
    UnknownVcs(String),
}
