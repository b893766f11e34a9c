//! Integration tests for the HTTPS transport.
//!
//! A local mock server stands in for the gateway.

use std::time::Duration;

use securepay_client::SecurePayClient;
use securepay_types::{GatewayTransport, TransportError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPLY: &str = "<SecurePayMessage><Status><statusCode>000</statusCode></Status></SecurePayMessage>";

fn client() -> SecurePayClient {
    SecurePayClient::with_timeout(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_posts_xml_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xmlapi/payment"))
        .and(header("content-type", "text/xml"))
        .and(body_string_contains("<SecurePayMessage>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REPLY))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/xmlapi/payment", server.uri());
    let body = client()
        .send(&url, "<SecurePayMessage></SecurePayMessage>".to_string())
        .await
        .unwrap();

    assert_eq!(body, REPLY);
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client().send(&server.uri(), "<x/>".to_string()).await;

    assert_eq!(
        result,
        Err(TransportError::Status {
            status: 503,
            body: "maintenance".to_string()
        })
    );
}

#[tokio::test]
async fn test_slow_gateway_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(REPLY)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = SecurePayClient::with_timeout(Duration::from_millis(200)).unwrap();
    let result = client.send(&server.uri(), "<x/>".to_string()).await;

    assert_eq!(result, Err(TransportError::Timeout));
}

#[tokio::test]
async fn test_unreachable_gateway_is_http_error() {
    let result = client()
        .send("http://127.0.0.1:1/xmlapi/payment", "<x/>".to_string())
        .await;

    assert!(matches!(result, Err(TransportError::Http(_))));
}

#[tokio::test]
async fn test_no_retry_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let _ = client().send(&server.uri(), "<x/>".to_string()).await;

    server.verify().await;
}
