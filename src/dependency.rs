//! A single external dependency and its `shacl_FetchContent_Declare` block.

use std::borrow::Cow;

use super::error::ConfigurationError;
use super::reference::GitReference;

/// Namespace prefixed to the library name when it is implied by the remote.
pub const LIBRARY_NAMESPACE: &str = "njoy::";

/// Location, relative to the depending repository, of remotes implied by a name.
pub const DEFAULT_REMOTE_PREFIX: &str = "../../njoy/";

/// The fields a dependency is declared with. Every field is optional, and empty strings count as
/// absent.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
}

/// An external repository to be fetched by the build system.
///
/// The name and remote may each be implied by the other:
///
/// - without a name, the name is the last path component of the remote;
/// - without a remote, the repository is assumed to live next to the depending one under
///   [`DEFAULT_REMOTE_PREFIX`].
///
/// At least one of the two must be given for the remote to resolve.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "DependencyFields", into = "DependencyFields")]
pub struct DependencySpec {
    name: Option<String>,
    remote: Option<String>,
    reference: GitReference,
    setup: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

impl DependencySpec {
    /// Validate `fields` into a dependency. Fails if both a tag and a branch are given; if neither
    /// is, the dependency follows [`DEFAULT_BRANCH`](crate::DEFAULT_BRANCH).
    pub fn new(fields: DependencyFields) -> Result<Self, ConfigurationError> {
        let reference = match (non_empty(fields.tag), non_empty(fields.branch)) {
            (Some(tag), Some(branch)) => {
                return Err(ConfigurationError::TagAndBranch { tag, branch });
            }
            (Some(tag), None) => GitReference::Tag(tag),
            (None, Some(branch)) => GitReference::Branch(branch),
            (None, None) => {
                tracing::debug!(
                    name = ?fields.name,
                    remote = ?fields.remote,
                    "no tag or branch given, following the default branch"
                );
                GitReference::default()
            }
        };
        Ok(Self {
            name: non_empty(fields.name),
            remote: non_empty(fields.remote),
            reference,
            setup: non_empty(fields.setup),
        })
    }

    /// A dependency known only by name, following the default branch.
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: non_empty(Some(name.into())),
            remote: None,
            reference: GitReference::default(),
            setup: None,
        }
    }

    /// The explicit name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The explicit remote, if one was given.
    pub fn remote(&self) -> Option<&str> {
        self.remote.as_deref()
    }

    /// The branch or tag to check out.
    pub fn reference(&self) -> &GitReference {
        &self.reference
    }

    /// Text appended verbatim after the declaration block.
    pub fn setup(&self) -> Option<&str> {
        self.setup.as_deref()
    }

    /// Set the explicit name. An empty name clears it.
    pub fn set_name<S: Into<String>>(&mut self, value: S) {
        self.name = non_empty(Some(value.into()));
    }

    /// Set the explicit remote. An empty remote clears it.
    pub fn set_remote<S: Into<String>>(&mut self, value: S) {
        self.remote = non_empty(Some(value.into()));
    }

    /// Set the text appended after the declaration. Empty text clears it.
    pub fn set_setup<S: Into<String>>(&mut self, value: S) {
        self.setup = non_empty(Some(value.into()));
    }

    /// Follow the head of `value`, dropping any tag. An empty branch follows the default branch.
    pub fn set_branch<S: Into<String>>(&mut self, value: S) {
        self.reference = non_empty(Some(value.into()))
            .map(GitReference::Branch)
            .unwrap_or_default();
    }

    /// Pin to the tag or commit `value`, dropping any branch. An empty tag follows the default
    /// branch, as at construction.
    pub fn set_tag<S: Into<String>>(&mut self, value: S) {
        self.reference = non_empty(Some(value.into()))
            .map(GitReference::Tag)
            .unwrap_or_default();
    }

    fn remote_basename(&self) -> Result<&str, ConfigurationError> {
        self.remote
            .as_deref()
            .map(basename)
            .ok_or(ConfigurationError::RemoteUnresolvable)
    }

    /// The name of the dependency: the explicit name, or else the last component of the remote.
    pub fn resolved_name(&self) -> Result<&str, ConfigurationError> {
        match &self.name {
            Some(name) => Ok(name.as_str()),
            None => self.remote_basename(),
        }
    }

    /// The name used for linking, e.g. `njoy::dimwits`. An implied name gets the
    /// [`LIBRARY_NAMESPACE`] prefix.
    pub fn library_name(&self) -> Result<String, ConfigurationError> {
        match &self.name {
            Some(name) => Ok(name.clone()),
            None => Ok(format!("{LIBRARY_NAMESPACE}{}", self.remote_basename()?)),
        }
    }

    /// The name used by `find_package`, i.e. the library name without its namespace.
    pub fn package_name(&self) -> Result<&str, ConfigurationError> {
        match &self.name {
            Some(name) => Ok(name.rsplit(':').next().unwrap_or(name)),
            None => self.remote_basename(),
        }
    }

    /// The remote URL or path, derived from the package name when not given explicitly.
    pub fn resolved_remote(&self) -> Result<Cow<'_, str>, ConfigurationError> {
        match (&self.remote, &self.name) {
            (Some(remote), _) => Ok(Cow::Borrowed(remote.as_str())),
            (None, Some(_)) => {
                let remote = format!("{DEFAULT_REMOTE_PREFIX}{}", self.package_name()?);
                tracing::debug!(%remote, "derived remote from dependency name");
                Ok(Cow::Owned(remote))
            }
            (None, None) => Err(ConfigurationError::RemoteUnresolvable),
        }
    }

    /// The `GIT_TAG` value: `origin/<branch>` when following a branch, otherwise the tag.
    pub fn resolved_tag(&self) -> String {
        self.reference.git_tag()
    }

    /// Whether a branch rather than a fixed commit is followed.
    pub fn is_live_at_head(&self) -> bool {
        self.reference.is_live_at_head()
    }

    /// Render the `shacl_FetchContent_Declare` block for this dependency, followed by any setup
    /// text. Branches are fetched shallowly.
    pub fn fetchcontent_declare(&self) -> Result<String, ConfigurationError> {
        let package_name = self.package_name()?;
        let remote = self.resolved_remote()?;
        let tag = self.resolved_tag();
        let mut block = format!(
            "shacl_FetchContent_Declare( {package_name}\n    GIT_REPOSITORY  {remote}\n    GIT_TAG         {tag}\n"
        );
        if self.is_live_at_head() {
            block.push_str("    GIT_SHALLOW     TRUE\n");
        }
        block.push_str("    )\n");
        if let Some(setup) = &self.setup {
            block.push_str(setup);
            block.push('\n');
        }
        tracing::trace!(package = package_name, "rendered declaration");
        Ok(block)
    }
}

impl TryFrom<DependencyFields> for DependencySpec {
    type Error = ConfigurationError;

    fn try_from(fields: DependencyFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<DependencySpec> for DependencyFields {
    fn from(spec: DependencySpec) -> Self {
        let (branch, tag) = match spec.reference {
            GitReference::Branch(branch) => (Some(branch), None),
            GitReference::Tag(tag) => (None, Some(tag)),
        };
        Self {
            name: spec.name,
            remote: spec.remote,
            branch,
            tag,
            setup: spec.setup,
        }
    }
}

impl std::fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.name, &self.remote) {
            (Some(name), Some(remote)) => write!(f, "{name} ({remote})")?,
            (Some(name), None) => write!(f, "{name}")?,
            (None, Some(remote)) => write!(f, "{remote}")?,
            (None, None) => write!(f, "<unnamed>")?,
        }
        write!(f, " [{}]", self.reference)
    }
}

#[cfg(test)]
mod test_construction {
    use super::*;

    fn fields(branch: Option<&str>, tag: Option<&str>) -> DependencyFields {
        DependencyFields {
            name: Some("foo".into()),
            branch: branch.map(String::from),
            tag: tag.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn tag_and_branch_together_fails() {
        let result = DependencySpec::new(fields(Some("develop"), Some("v1.0")));
        assert!(matches!(
            result,
            Err(ConfigurationError::TagAndBranch { tag, branch })
                if tag == "v1.0" && branch == "develop"
        ));
    }

    #[test]
    fn neither_tag_nor_branch_follows_master() {
        let dep = DependencySpec::new(fields(None, None)).unwrap();
        assert!(dep.is_live_at_head());
        assert_eq!(dep.resolved_tag(), "origin/master");
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let dep = DependencySpec::new(fields(Some("develop"), Some(""))).unwrap();
        assert_eq!(dep.reference(), &GitReference::Branch("develop".into()));

        let dep = DependencySpec::new(fields(Some(""), Some(""))).unwrap();
        assert_eq!(dep.resolved_tag(), "origin/master");

        let dep = DependencySpec::new(DependencyFields {
            name: Some(String::new()),
            remote: Some("https://github.com/njoy/ENDFtk".into()),
            setup: Some(String::new()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(dep.name(), None);
        assert_eq!(dep.setup(), None);
    }

    #[test]
    fn tag_only_is_pinned() {
        let dep = DependencySpec::new(fields(None, Some("v1.0"))).unwrap();
        assert!(!dep.is_live_at_head());
        assert_eq!(dep.resolved_tag(), "v1.0");
    }

    #[test]
    fn named_follows_default_branch() {
        let dep = DependencySpec::named("foo");
        assert_eq!(dep, DependencySpec::new(fields(None, None)).unwrap());
    }
}

#[cfg(test)]
mod test_mutation {
    use super::*;

    #[test]
    fn set_tag_clears_branch() {
        let mut dep = DependencySpec::named("foo");
        dep.set_branch("develop");
        dep.set_tag("v2.1");
        assert!(!dep.is_live_at_head());
        assert_eq!(dep.reference().branch_name(), None);
        assert_eq!(dep.resolved_tag(), "v2.1");
    }

    #[test]
    fn set_branch_clears_tag() {
        let mut dep = DependencySpec::named("foo");
        dep.set_tag("v2.1");
        dep.set_branch("develop");
        assert!(dep.is_live_at_head());
        assert_eq!(dep.reference().tag_name(), None);
        assert_eq!(dep.resolved_tag(), "origin/develop");
    }

    #[test]
    fn set_remote_makes_nameless_dependency_resolvable() {
        let mut dep = DependencySpec::new(DependencyFields::default()).unwrap();
        assert_eq!(dep.resolved_remote(), Err(ConfigurationError::RemoteUnresolvable));
        dep.set_remote("https://github.com/njoy/ENDFtk");
        assert_eq!(dep.resolved_remote().unwrap(), "https://github.com/njoy/ENDFtk");
        assert_eq!(dep.resolved_name().unwrap(), "ENDFtk");
    }

    #[test]
    fn set_empty_branch_follows_default_branch() {
        let mut dep = DependencySpec::named("foo");
        dep.set_tag("v1.0");
        dep.set_branch("");
        assert_eq!(dep.reference(), &GitReference::default());
        assert_eq!(dep.resolved_tag(), "origin/master");
    }

    #[test]
    fn set_empty_tag_follows_default_branch() {
        let mut dep = DependencySpec::named("foo");
        dep.set_branch("develop");
        dep.set_tag("");
        assert_eq!(dep.reference(), &GitReference::default());
        assert!(dep.is_live_at_head());
    }

    #[test]
    fn set_name_changes_derived_remote() {
        let mut dep = DependencySpec::named("foo");
        dep.set_name("njoy::dimwits");
        assert_eq!(dep.resolved_remote().unwrap(), "../../njoy/dimwits");
    }
}
