//! Hosting conventions that shape a URL path into a local relative path
//!
//! Rules are evaluated in table order and the first one whose host and path
//! prefix both match wins. The last entry matches everything.

/// Which hosts a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMatcher {
    /// Any host
    Any,
    /// Exact host name equality
    Exact(&'static str),
}

impl HostMatcher {
    fn matches(&self, host: &str) -> bool {
        match self {
            HostMatcher::Any => true,
            HostMatcher::Exact(expected) => *expected == host,
        }
    }
}

/// How the matched path is turned into relative path segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape {
    /// Keep every segment as is
    Verbatim,
    /// Drop a `.git` or `.hg` extension from the final segment
    StripVcsSuffix,
}

/// One hosting convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostRule {
    /// Short name, used in logs and tests
    pub name: &'static str,
    pub host: HostMatcher,
    /// Required prefix of the path with its leading slash removed
    pub path_prefix: &'static str,
    pub shape: PathShape,
}

impl HostRule {
    /// Whether this rule applies to `host` and the slash-trimmed `path`
    pub fn matches(&self, host: &str, path: &str) -> bool {
        self.host.matches(host) && path.starts_with(self.path_prefix)
    }

    /// Shape a slash-trimmed path
    pub fn apply(&self, path: &str) -> String {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut shaped: Vec<String> = segments.iter().map(|s| s.to_string()).collect();

        if self.shape == PathShape::StripVcsSuffix {
            if let Some(last) = shaped.last_mut() {
                *last = strip_vcs_suffix(last).to_string();
            }
        }

        shaped.join("/")
    }
}

/// Drop a `.git` or `.hg` extension, keeping names that are only the extension
fn strip_vcs_suffix(segment: &str) -> &str {
    for suffix in [".git", ".hg"] {
        if let Some(stem) = segment.strip_suffix(suffix) {
            if !stem.is_empty() {
                return stem;
            }
        }
    }
    segment
}

/// Hosting conventions in priority order
pub const HOST_RULES: &[HostRule] = &[
    // Branch paths below `code` (`/trunk`) are kept as part of the location.
    HostRule {
        name: "sourceforge-svn",
        host: HostMatcher::Exact("svn.code.sf.net"),
        path_prefix: "p/",
        shape: PathShape::Verbatim,
    },
    // The single repository of a project is always named `code`.
    HostRule {
        name: "sourceforge-git",
        host: HostMatcher::Exact("git.code.sf.net"),
        path_prefix: "p/",
        shape: PathShape::StripVcsSuffix,
    },
    HostRule {
        name: "sourceforge-jp-svn",
        host: HostMatcher::Exact("scm.sourceforge.jp"),
        path_prefix: "svnroot/",
        shape: PathShape::Verbatim,
    },
    HostRule {
        name: "sourceforge-jp-git",
        host: HostMatcher::Exact("scm.sourceforge.jp"),
        path_prefix: "gitroot/",
        shape: PathShape::StripVcsSuffix,
    },
    HostRule {
        name: "assembla-svn",
        host: HostMatcher::Exact("subversion.assembla.com"),
        path_prefix: "svn/",
        shape: PathShape::Verbatim,
    },
    HostRule {
        name: "assembla-git",
        host: HostMatcher::Exact("git.assembla.com"),
        path_prefix: "",
        shape: PathShape::StripVcsSuffix,
    },
    // Stash-style servers serve repositories below an `scm/` gateway segment.
    HostRule {
        name: "stash",
        host: HostMatcher::Any,
        path_prefix: "scm/",
        shape: PathShape::StripVcsSuffix,
    },
    HostRule {
        name: "default",
        host: HostMatcher::Any,
        path_prefix: "",
        shape: PathShape::StripVcsSuffix,
    },
];

/// First rule matching `host` and the slash-trimmed `path`
pub fn rule_for(host: &str, path: &str) -> &'static HostRule {
    HOST_RULES
        .iter()
        .find(|rule| rule.matches(host, path))
        .unwrap_or(&HOST_RULES[HOST_RULES.len() - 1])
}
