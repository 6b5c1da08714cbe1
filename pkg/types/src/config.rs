use serde::{Deserialize, Serialize};

use crate::configmap::LabelSet;

/// `cmsyncctl` configuration file (YAML).
///
/// Example `config.yaml`:
/// ```yaml
/// server: http://localhost:8080
/// namespace: default
/// name: test
/// labels:
///   component: wildfly
/// files:
///   - /opt/wildfly/standalone/configuration/standalone.xml
/// timeout-secs: 30
/// insecure: false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfigFile {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub labels: LabelSet,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default, alias = "timeout-secs")]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub insecure: Option<bool>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}
