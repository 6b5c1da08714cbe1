//! Network-related constants.

/// Default control-plane API address (HTTP).
pub const DEFAULT_API_ADDR: &str = "http://localhost:8080";

/// Default namespace when none is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// User agent sent by the HTTP transport.
pub const USER_AGENT: &str = concat!("cmsync/", env!("CARGO_PKG_VERSION"));
