use super::backend::VcsBackend;

/// Identifier to backend table; keys are case-sensitive
const REGISTRY: &[(&str, VcsBackend)] = &[
    ("git", VcsBackend::Git),
    ("github", VcsBackend::Git),
    ("svn", VcsBackend::Subversion),
    ("subversion", VcsBackend::Subversion),
    ("git-svn", VcsBackend::GitSvn),
    ("hg", VcsBackend::Mercurial),
    ("mercurial", VcsBackend::Mercurial),
    ("darcs", VcsBackend::Darcs),
    ("fossil", VcsBackend::Fossil),
    ("cvs", VcsBackend::Cvs),
];

/// Static lookup of VCS backends by identifier
pub struct VcsRegistry;

impl VcsRegistry {
    /// Backend registered under `vcs_id`, if any
    pub fn lookup(vcs_id: &str) -> Option<VcsBackend> {
        REGISTRY
            .iter()
            .find(|(id, _)| *id == vcs_id)
            .map(|(_, backend)| *backend)
    }

    /// All registered identifiers, aliases included
    pub fn identifiers() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|(id, _)| *id)
    }
}
