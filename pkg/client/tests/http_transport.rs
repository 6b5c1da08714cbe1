//! `HttpTransport` against a live mock API server.

use std::path::PathBuf;
use std::time::Duration;

use pkg_client::{ConfigMapClient, Error, HttpTransport, TransportConfig};
use pkg_types::configmap::LabelSet;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ITEM: &str = "/api/v1/namespaces/default/configmaps/test";
const COLLECTION: &str = "/api/v1/namespaces/default/configmaps";

fn client(uri: String) -> ConfigMapClient<HttpTransport> {
    let transport = HttpTransport::new(&TransportConfig {
        timeout: Some(Duration::from_secs(10)),
        ..TransportConfig::default()
    })
    .unwrap();
    ConfigMapClient::new(uri, transport)
}

fn wildfly_labels() -> LabelSet {
    let mut labels = LabelSet::new();
    labels.insert("component".into(), "wildfly".into());
    labels
}

// The blocking client must not run on an async worker thread.
async fn blocking<F, R>(f: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn create_sends_expected_document() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("standalone.xml");
    std::fs::write(&file, "<config/>").unwrap();

    Mock::given(method("POST"))
        .and(path(COLLECTION))
        .and(header("content-type", "application/json"))
        .and(header_exists("x-request-id"))
        .and(body_json(json!({
            "kind": "ConfigMap",
            "apiVersion": "v1",
            "metadata": {
                "name": "test",
                "namespace": "default",
                "labels": {"component": "wildfly"}
            },
            "data": {"standalone.xml": "<config/>"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"kind": "ConfigMap"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || client(uri).create("default", "test", &wildfly_labels(), &[file])).await;
    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn exists_reports_presence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ITEM))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "ConfigMap"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/namespaces/default/configmaps/absent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "kind": "Status",
            "message": "configmaps \"absent\" not found"
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let (present, absent) = blocking(move || {
        let c = client(uri);
        (c.exists("default", "test"), c.exists("default", "absent"))
    })
    .await;
    assert!(present.unwrap());
    assert!(!absent.unwrap());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_missing_returns_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(ITEM))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "kind": "Status",
            "apiVersion": "v1",
            "status": "Failure",
            "message": "configmaps \"test\" not found",
            "reason": "NotFound",
            "code": 404
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || client(uri).delete("default", "test")).await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "configmaps \"test\" not found");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_plain_error_body_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(ITEM))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let result =
        blocking(move || client(uri).update::<PathBuf>("default", "test", &LabelSet::new(), &[])).await;
    match result {
        Err(Error::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn replace_recreates_existing_configmap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ITEM))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(ITEM))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COLLECTION))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        client(uri).replace::<PathBuf>("default", "test", &wildfly_labels(), &[])
    })
    .await;
    assert!(result.is_ok(), "{result:?}");
}

#[test]
fn connection_refused_is_a_transport_error() {
    let c = client("http://127.0.0.1:1".to_string());
    assert!(matches!(c.exists("default", "test"), Err(Error::Transport(_))));
}
