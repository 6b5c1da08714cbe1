//! Classifies the body of a rejected request.

use std::io::Read;

use pkg_types::status::Status;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Read `body` to the end and classify it; see [`decode_slice`].
///
/// When no envelope is found the raw body is handed back for reporting.
pub fn decode<R: Read>(mut body: R, status: u16) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    body.read_to_end(&mut buf).map_err(Error::transport)?;
    decode_slice(&buf, status)?;
    Ok(buf)
}

/// Raise [`Error::Api`] if `body` is a `kind: Status` envelope with a non-empty message.
///
/// Anything else, including an empty or non-JSON body, returns `Ok(())`;
/// the caller decides what a failing status without an envelope means.
pub fn decode_slice(body: &[u8], status: u16) -> Result<()> {
    let envelope: Status = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!("Response body ({} bytes) is not a status envelope: {}", body.len(), e);
            return Ok(());
        }
    };

    match envelope.failure_message() {
        Some(message) => {
            warn!(
                "API server rejected request: status={} reason={} message={}",
                status,
                envelope.reason.as_deref().unwrap_or("-"),
                message
            );
            Err(Error::Api {
                status,
                message: message.to_string(),
            })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_envelope_becomes_api_error_with_exact_message() {
        let body = br#"{"kind":"Status","apiVersion":"v1","metadata":{},"status":"Failure","message":"configmaps \"test\" not found","reason":"NotFound","details":{"name":"test","kind":"configmaps"},"code":404}"#;
        let err = decode(&body[..], 404).unwrap_err();
        match err {
            Error::Api { status, ref message } => {
                assert_eq!(status, 404);
                assert_eq!(message, r#"configmaps "test" not found"#);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(err.to_string(), r#"configmaps "test" not found"#);
    }

    #[test]
    fn already_exists_envelope() {
        let body = br#"{"kind":"Status","message":"configmaps \"test\" already exists","reason":"AlreadyExists","code":409}"#;
        let err = decode_slice(body, 409).unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), r#"configmaps "test" already exists"#);
    }

    // A failing response whose body is not an envelope yields no ApiError here.
    #[test]
    fn non_envelope_bodies_surface_nothing() {
        assert!(decode_slice(b"", 500).is_ok());
        assert!(decode_slice(b"Internal Server Error", 500).is_ok());
        assert!(decode_slice(br#"{"error":"boom"}"#, 500).is_ok());
        assert!(decode_slice(br#"{"kind":"Status"}"#, 500).is_ok());
        assert!(decode_slice(br#"{"message":"no kind"}"#, 500).is_ok());
        assert!(decode_slice(br#"{"kind":"ConfigMap","message":"x"}"#, 500).is_ok());
        assert!(decode_slice(br#"{"kind":"Status","message":""}"#, 500).is_ok());
        assert!(decode_slice(b"[1,2,3]", 500).is_ok());
    }

    #[test]
    fn non_envelope_body_is_returned_raw() {
        assert_eq!(decode(&b"upstream exploded"[..], 502).unwrap(), b"upstream exploded");
        assert!(decode(&b""[..], 500).unwrap().is_empty());
    }

    #[test]
    fn unreadable_body_is_a_transport_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"))
            }
        }
        assert!(matches!(decode(Broken, 500), Err(Error::Transport(_))));
    }
}
