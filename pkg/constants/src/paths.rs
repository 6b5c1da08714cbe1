//! Filesystem path constants.

/// Default config file path for `cmsyncctl`.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/cmsync/config.yaml";
