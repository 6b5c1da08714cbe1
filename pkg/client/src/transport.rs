use std::io::Read;
use std::time::Duration;

use pkg_constants::api::{CONTENT_TYPE_JSON, REQUEST_ID_HEADER};
use pkg_constants::network::USER_AGENT;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};

/// One HTTP request as the client hands it to a [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Attach a JSON body and the matching `content-type` header.
    pub fn json_body(mut self, body: Vec<u8>) -> Self {
        self.headers
            .push((CONTENT_TYPE.as_str().to_string(), CONTENT_TYPE_JSON.to_string()));
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status code plus the unread response body.
///
/// Dropping the response releases the underlying connection.
pub struct TransportResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Executes a single request and returns the status and body.
///
/// Implementations own connection handling, TLS and timeouts; a failure to
/// get any response at all is reported as [`Error::Transport`].
pub trait Transport {
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        (**self).execute(request)
    }
}

/// Settings passed straight through to the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Option<Duration>,
    /// Accept self-signed certificates (dev clusters only).
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            accept_invalid_certs: false,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// [`Transport`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(Error::transport)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!(
            "api_request",
            request_id = %request_id,
            method = %request.method,
            url = %request.url,
        );
        let _guard = span.enter();

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(REQUEST_ID_HEADER, request_id.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(Error::transport)?;
        let status = response.status().as_u16();
        debug!("{} {} -> {}", request.method, request.url, status);

        Ok(TransportResponse::new(status, response))
    }
}
