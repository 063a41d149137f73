/// A dependency whose fields cannot describe a single fetchable repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Both a tag and a branch were given.
    #[error("must only supply tag or branch, not both (tag '{tag}', branch '{branch}')")]
    TagAndBranch { tag: String, branch: String },

    /// Neither a name nor a remote was given, so the remote cannot be derived.
    #[error("dependency must have name and/or remote defined")]
    RemoteUnresolvable,
}

/// Errors encountered when reading a list of dependencies from a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// A toml deserialisation error occurred.
    #[error(transparent)]
    TomlInvalid(#[from] toml::de::Error),

    /// A json error occurred.
    #[error(transparent)]
    JsonInvalid(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The document has no list of dependencies.
    #[error("required list 'dependency' (toml) or 'dependencies' (json) not found in document")]
    TableNotFound,

    /// An entry of the dependency list was expected to be a table.
    #[error("expected dependency #{index} to be a table")]
    EntryNotTable { index: usize },

    /// An entry of the dependency list is misconfigured.
    #[error("invalid dependency #{index}")]
    Configuration {
        index: usize,
        #[source]
        source: ConfigurationError,
    },

    /// The manifest file extension is neither `.toml` nor `.json`.
    #[error("unknown manifest format for {}: expected a .toml or .json file", path.display())]
    UnknownFormat { path: std::path::PathBuf },
}
