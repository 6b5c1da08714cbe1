use pkg_constants::api::{CONFIGMAP_API_VERSION, CONFIGMAP_KIND};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label key/value pairs attached to a resource.
pub type LabelSet = BTreeMap<String, String>;

/// Wire form of a configmap as accepted by `POST`/`PUT` on the configmaps endpoints.
///
/// Labels live under `metadata.labels`; there is no top-level `labels` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
    pub kind: String,
    pub api_version: String,
    pub metadata: ObjectMeta,
    /// File name -> file content. Always serialized, even when empty.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: LabelSet,
}

impl ConfigMap {
    pub fn new(namespace: &str, name: &str, labels: LabelSet) -> Self {
        Self {
            kind: CONFIGMAP_KIND.to_string(),
            api_version: CONFIGMAP_API_VERSION.to_string(),
            metadata: ObjectMeta {
                name: name.to_string(),
                namespace: namespace.to_string(),
                labels,
            },
            data: BTreeMap::new(),
        }
    }
}
