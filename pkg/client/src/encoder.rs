//! Builds the JSON document sent on create and update.

use std::path::Path;

use pkg_types::configmap::{ConfigMap, LabelSet};
use tracing::debug;

use crate::error::{Error, Result};

/// Read one source file into its `(base name, content)` data entry.
pub fn read_file_entry(path: &Path) -> Result<(String, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::InvalidPath {
            path: path.to_path_buf(),
        })?
        .to_str()
        .ok_or_else(|| Error::NonUtf8FileName {
            path: path.to_path_buf(),
        })?
        .to_string();

    let bytes = std::fs::read(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|source| Error::InvalidUtf8 {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((file_name, content))
}

/// Build the configmap document for `files`, keyed by base file name.
///
/// Name and namespace are copied as given. A later file whose base name
/// collides with an earlier one replaces it.
pub fn build_document<P: AsRef<Path>>(
    namespace: &str,
    name: &str,
    labels: &LabelSet,
    files: &[P],
) -> Result<ConfigMap> {
    let mut cm = ConfigMap::new(namespace, name, labels.clone());
    for path in files {
        let (key, content) = read_file_entry(path.as_ref())?;
        debug!(
            "Adding {} ({} bytes) to configmap {}/{}",
            key,
            content.len(),
            namespace,
            name
        );
        cm.data.insert(key, content);
    }
    Ok(cm)
}

/// Encode the configmap for `files` as a JSON request body.
pub fn encode<P: AsRef<Path>>(
    namespace: &str,
    name: &str,
    labels: &LabelSet,
    files: &[P],
) -> Result<Vec<u8>> {
    let cm = build_document(namespace, name, labels, files)?;
    Ok(serde_json::to_vec(&cm)?)
}
