//! Read ordered lists of dependencies from TOML or JSON manifests, and render them together.

use super::dependency::{DependencyFields, DependencySpec};
use super::error::{ConfigurationError, ManifestError};

/// The dependencies declared in a manifest, in declaration order.
pub type Dependencies = Vec<DependencySpec>;

/// Key of the array of tables in a TOML manifest.
const TOML_KEY: &str = "dependency";

/// Key of the array of objects in a JSON manifest, when it is not a bare array.
const JSON_KEY: &str = "dependencies";

fn validate(index: usize, fields: DependencyFields) -> Result<DependencySpec, ManifestError> {
    DependencySpec::new(fields).map_err(|source| ManifestError::Configuration { index, source })
}

/// Parse the `[[dependency]]` array of a TOML document.
pub fn try_parse_toml<S: AsRef<str>>(toml_str: S) -> Result<Dependencies, ManifestError> {
    let table = toml_str.as_ref().parse::<toml::Table>()?;
    let entries = table
        .get(TOML_KEY)
        .and_then(|v| v.as_array())
        .ok_or(ManifestError::TableNotFound)?;
    let dependencies = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry.as_table() {
            Some(t) => validate(index, toml::Value::Table(t.to_owned()).try_into()?),
            None => Err(ManifestError::EntryNotTable { index }),
        })
        .collect::<Result<Dependencies, _>>()?;
    tracing::debug!(count = dependencies.len(), "parsed toml manifest");
    Ok(dependencies)
}

/// Parse a JSON document holding either a bare array of dependencies or an object with a
/// `dependencies` array.
pub fn try_parse_json<S: AsRef<str>>(json_str: S) -> Result<Dependencies, ManifestError> {
    let document: serde_json::Value = serde_json::from_str(json_str.as_ref())?;
    let entries = match &document {
        serde_json::Value::Array(entries) => entries,
        serde_json::Value::Object(object) => object
            .get(JSON_KEY)
            .and_then(|v| v.as_array())
            .ok_or(ManifestError::TableNotFound)?,
        _ => return Err(ManifestError::TableNotFound),
    };
    let dependencies = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if entry.is_object() {
                validate(index, serde_json::from_value(entry.to_owned())?)
            } else {
                Err(ManifestError::EntryNotTable { index })
            }
        })
        .collect::<Result<Dependencies, _>>()?;
    tracing::debug!(count = dependencies.len(), "parsed json manifest");
    Ok(dependencies)
}

/// Read a manifest file, choosing the format from its `.toml` or `.json` extension.
pub fn try_parse_file<P: AsRef<std::path::Path>>(path: P) -> Result<Dependencies, ManifestError> {
    let path = path.as_ref();
    let parse = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => try_parse_toml::<String>,
        Some("json") => try_parse_json::<String>,
        _ => {
            return Err(ManifestError::UnknownFormat {
                path: path.to_path_buf(),
            });
        }
    };
    tracing::debug!(path = %path.display(), "reading manifest");
    parse(std::fs::read_to_string(path)?)
}

/// Render the declaration blocks of all `dependencies`, in order, separated by blank lines.
pub fn render_all(dependencies: &[DependencySpec]) -> Result<String, ConfigurationError> {
    Ok(dependencies
        .iter()
        .map(DependencySpec::fetchcontent_declare)
        .collect::<Result<Vec<_>, _>>()?
        .join("\n"))
}

#[cfg(test)]
use ManifestError::*;
