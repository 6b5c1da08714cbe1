use pkg_constants::api::STATUS_KIND;
use serde::Deserialize;

/// Error envelope returned by the API server on failed requests.
///
/// Every field is optional on the wire; only `kind` and `message` decide
/// whether the body is treated as a structured error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub code: Option<u16>,
}

impl Status {
    /// The server message, if this is a `kind: Status` envelope with a non-empty message.
    pub fn failure_message(&self) -> Option<&str> {
        match (self.kind.as_deref(), self.message.as_deref()) {
            (Some(STATUS_KIND), Some(msg)) if !msg.is_empty() => Some(msg),
            _ => None,
        }
    }
}
