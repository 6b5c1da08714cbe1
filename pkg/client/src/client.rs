use std::path::Path;

use pkg_constants::api::{
    API_PREFIX, CONFIGMAP_RESOURCE, STATUS_CREATED, STATUS_NOT_FOUND, STATUS_OK,
};
use pkg_types::configmap::LabelSet;
use reqwest::{Method, Url};
use tracing::{debug, info, trace, warn};

use crate::encoder;
use crate::error::{Error, Result};
use crate::status;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// Lifecycle operations on configmaps of one API server.
///
/// Holds no per-call state: every operation encodes its own document and
/// issues exactly one request. No retries, no resource-version checks.
pub struct ConfigMapClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> ConfigMapClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Item endpoint when `name` is non-empty, collection endpoint otherwise.
    ///
    /// Namespace and name are percent-encoded as single path segments.
    pub fn resource_url(&self, namespace: &str, name: Option<&str>) -> Result<String> {
        if namespace.is_empty() {
            return Err(Error::InvalidName { kind: "namespace" });
        }
        let invalid = |reason: String| Error::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid("cannot be a base URL".to_string()))?;
            segments
                .pop_if_empty()
                .extend(API_PREFIX.split('/').filter(|s| !s.is_empty()))
                .extend(["namespaces", namespace, CONFIGMAP_RESOURCE]);
            if let Some(name) = name.filter(|n| !n.is_empty()) {
                segments.push(name);
            }
        }
        Ok(url.into())
    }

    /// Item endpoint of `name`; an empty name never falls back to the collection.
    fn item_url(&self, namespace: &str, name: &str) -> Result<String> {
        if name.is_empty() {
            return Err(Error::InvalidName { kind: "configmap" });
        }
        self.resource_url(namespace, Some(name))
    }

    /// `GET` the item endpoint: 200 is `true`, 404 is `false`, anything else is an error.
    pub fn exists(&self, namespace: &str, name: &str) -> Result<bool> {
        let url = self.item_url(namespace, name)?;
        let response = self.send(TransportRequest::new(Method::GET, url))?;
        match response.status {
            STATUS_OK => Ok(true),
            STATUS_NOT_FOUND => {
                debug!("Configmap {}/{} not found", namespace, name);
                Ok(false)
            }
            _ => Err(rejection(response)),
        }
    }

    /// `POST` a new configmap built from `labels` and `files` to the collection endpoint.
    pub fn create<P: AsRef<Path>>(
        &self,
        namespace: &str,
        name: &str,
        labels: &LabelSet,
        files: &[P],
    ) -> Result<()> {
        let url = self.resource_url(namespace, None)?;
        let body = encoder::encode(namespace, name, labels, files)?;
        trace!("Configmap payload: {}", String::from_utf8_lossy(&body));
        let response = self.send(TransportRequest::new(Method::POST, url).json_body(body))?;
        expect_status(response, STATUS_CREATED)?;
        info!("Created configmap {}/{}", namespace, name);
        Ok(())
    }

    /// `PUT` the full document to the item endpoint, replacing labels and data.
    pub fn update<P: AsRef<Path>>(
        &self,
        namespace: &str,
        name: &str,
        labels: &LabelSet,
        files: &[P],
    ) -> Result<()> {
        let url = self.item_url(namespace, name)?;
        let body = encoder::encode(namespace, name, labels, files)?;
        trace!("Configmap payload: {}", String::from_utf8_lossy(&body));
        let response = self.send(TransportRequest::new(Method::PUT, url).json_body(body))?;
        expect_status(response, STATUS_OK)?;
        info!("Updated configmap {}/{}", namespace, name);
        Ok(())
    }

    pub fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        let url = self.item_url(namespace, name)?;
        let response = self.send(TransportRequest::new(Method::DELETE, url))?;
        expect_status(response, STATUS_OK)?;
        info!("Deleted configmap {}/{}", namespace, name);
        Ok(())
    }

    /// Delete the configmap if present, then create it from scratch.
    ///
    /// Check and write are separate requests: another client can create or
    /// delete the same name in between, in which case `create` fails with
    /// the server's conflict message.
    pub fn replace<P: AsRef<Path>>(
        &self,
        namespace: &str,
        name: &str,
        labels: &LabelSet,
        files: &[P],
    ) -> Result<()> {
        if self.exists(namespace, name)? {
            self.delete(namespace, name)?;
        }
        self.create(namespace, name, labels, files)
    }

    fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        debug!("{} {}", request.method, request.url);
        self.transport.execute(request)
    }
}

fn expect_status(response: TransportResponse, expected: u16) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }
    Err(rejection(response))
}

/// Turn a response with an unexpected status into an error, preferring the
/// server's status envelope over the bare code.
fn rejection(response: TransportResponse) -> Error {
    let status = response.status;
    match status::decode(response.body, status) {
        Ok(body) => {
            warn!("Request failed with status {} and no status envelope", status);
            Error::UnexpectedStatus {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }
        }
        Err(e) => e,
    }
}
