//! The version of a dependency to check out: either the head of a branch or a fixed tag.

/// The branch tracked when neither a branch nor a tag is given.
pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, serde::Deserialize, serde::Serialize, PartialEq, Eq, Clone, Hash)]
pub enum GitReference {
    /// Track the tip of a branch.
    #[serde(rename = "branch")]
    Branch(String),
    /// Pin to a tag or commit hash.
    #[serde(rename = "tag")]
    Tag(String),
}

impl Default for GitReference {
    fn default() -> Self {
        GitReference::Branch(DEFAULT_BRANCH.to_string())
    }
}

impl GitReference {
    /// Whether a branch rather than a fixed commit is followed.
    pub fn is_live_at_head(&self) -> bool {
        matches!(self, GitReference::Branch(_))
    }

    /// The selected branch name, if any.
    pub fn branch_name(&self) -> Option<&str> {
        match self {
            GitReference::Branch(name) => Some(name),
            GitReference::Tag(_) => None,
        }
    }

    /// The selected tag or commit hash, if any.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            GitReference::Tag(tag) => Some(tag),
            GitReference::Branch(_) => None,
        }
    }

    /// The value passed as `GIT_TAG`. Branches resolve to their remote-tracking ref.
    pub fn git_tag(&self) -> String {
        match self {
            GitReference::Branch(name) => format!("origin/{name}"),
            GitReference::Tag(tag) => tag.clone(),
        }
    }
}

impl std::fmt::Display for GitReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitReference::Branch(branch) => write!(f, "branch: {branch}"),
            GitReference::Tag(tag) => write!(f, "tag: {tag}"),
        }
    }
}

#[cfg(test)]
mod test_git_reference {
    use super::*;

    #[test]
    fn default_is_master_branch() {
        let reference = GitReference::default();
        assert!(reference.is_live_at_head());
        assert_eq!(reference.branch_name(), Some("master"));
        assert_eq!(reference.git_tag(), "origin/master");
    }

    #[test]
    fn tag_resolves_to_itself() {
        let reference = GitReference::Tag("v1.0".to_string());
        assert!(!reference.is_live_at_head());
        assert_eq!(reference.tag_name(), Some("v1.0"));
        assert_eq!(reference.branch_name(), None);
        assert_eq!(reference.git_tag(), "v1.0");
    }

    #[test]
    fn display_names_the_mode() {
        assert_eq!(GitReference::Branch("dev".into()).to_string(), "branch: dev");
        assert_eq!(GitReference::Tag("abc123".into()).to_string(), "tag: abc123");
    }
}
