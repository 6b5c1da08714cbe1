//! Synchronizes local files into a namespaced configmap on a control-plane API.
//!
//! [`ConfigMapClient`] issues exactly one blocking request per lifecycle
//! operation through a [`Transport`]; [`encoder`] turns files and labels into
//! the request document and [`status`] turns error envelopes into [`Error::Api`].

pub mod client;
pub mod encoder;
pub mod error;
pub mod status;
pub mod transport;

pub use client::ConfigMapClient;
pub use error::{Error, Result};
pub use transport::{HttpTransport, Transport, TransportConfig, TransportRequest, TransportResponse};
