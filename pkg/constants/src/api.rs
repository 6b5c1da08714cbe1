//! Control-plane API wire constants.

/// Path prefix of the core API group.
pub const API_PREFIX: &str = "/api/v1";

/// Plural resource segment used in configmap URLs.
pub const CONFIGMAP_RESOURCE: &str = "configmaps";

/// `kind` of every document we send.
pub const CONFIGMAP_KIND: &str = "ConfigMap";

/// `apiVersion` of every document we send.
pub const CONFIGMAP_API_VERSION: &str = "v1";

/// `kind` the API server uses for structured error envelopes.
pub const STATUS_KIND: &str = "Status";

/// Content type for request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// ─── Expected status codes ────────────────────────────────────────────────

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NOT_FOUND: u16 = 404;
