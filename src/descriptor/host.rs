//! Recognition of accepted hosting URLs and their short forms

const GITHUB_PREFIX: &str = "https://github.com/";
const GITLAB_PREFIX: &str = "https://gitlab.com/";
const BITBUCKET_PREFIX: &str = "https://bitbucket.org/";

/// Hosting service a descriptor's `git` link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitHost {
    /// https://github.com/...
    GitHub,
    /// https://gitlab.com/...
    GitLab,
    /// https://bitbucket.org/...
    Bitbucket,
    /// Any link mentioning "svn"
    Svn,
}

impl GitHost {
    /// Detects the host of an accepted link, or `None` for any other value.
    pub fn detect(link: &str) -> Option<GitHost> {
        if link.starts_with(GITHUB_PREFIX) {
            Some(GitHost::GitHub)
        } else if link.starts_with(GITLAB_PREFIX) {
            Some(GitHost::GitLab)
        } else if link.starts_with(BITBUCKET_PREFIX) {
            Some(GitHost::Bitbucket)
        } else if link.contains("svn") {
            Some(GitHost::Svn)
        } else {
            None
        }
    }

    /// Lowercase host name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GitHost::GitHub => "github",
            GitHost::GitLab => "gitlab",
            GitHost::Bitbucket => "bitbucket",
            GitHost::Svn => "svn",
        }
    }

    /// Two-letter tag used in `git_prefixed`, for hosts that have one
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            GitHost::GitHub => Some("gh"),
            GitHost::GitLab => Some("gl"),
            GitHost::Bitbucket | GitHost::Svn => None,
        }
    }

    fn url_prefix(&self) -> Option<&'static str> {
        match self {
            GitHost::GitHub => Some(GITHUB_PREFIX),
            GitHost::GitLab => Some(GITLAB_PREFIX),
            GitHost::Bitbucket => Some(BITBUCKET_PREFIX),
            GitHost::Svn => None,
        }
    }
}

/// Returns true if `link` is one of the accepted hosting patterns.
pub fn is_accepted_link(link: &str) -> bool {
    GitHost::detect(link).is_some()
}

/// Shortens a repository link to its host-specific path.
///
/// A trailing `.git` is removed first; the host prefix is then stripped for
/// hosts that have one. Anything else is returned without the suffix.
pub fn shorten_git_link(link: &str) -> String {
    let link = link.strip_suffix(".git").unwrap_or(link);

    GitHost::detect(link)
        .and_then(|host| host.url_prefix())
        .and_then(|prefix| link.strip_prefix(prefix))
        .unwrap_or(link)
        .to_string()
}

/// Builds the host-tagged short form (`gh:owner/repo`), or "" when the host
/// has no tag.
pub fn prefixed_git_link(link: &str) -> String {
    match GitHost::detect(link).and_then(|host| host.tag()) {
        Some(tag) => format!("{}:{}", tag, shorten_git_link(link)),
        None => String::new(),
    }
}
