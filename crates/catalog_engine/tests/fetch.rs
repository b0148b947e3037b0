use std::time::Duration;

use catalog_engine::{FailureKind, FetchError, FetchSettings, HttpClient, ReqwestHttpClient};
use url::Url;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(settings: FetchSettings) -> ReqwestHttpClient {
    ReqwestHttpClient::new(settings).expect("client builds")
}

fn url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).unwrap()
}

fn kind(err: &FetchError) -> &FailureKind {
    err.kind().expect("transport error")
}

#[tokio::test]
async fn client_returns_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"docs":[]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let response = client(FetchSettings::default())
        .get(&url(&server, "/search.json"))
        .await
        .expect("fetch ok");

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(&response.body[..], br#"{"docs":[]}"#);
}

#[tokio::test]
async fn client_reports_error_statuses_without_failing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let response = client(FetchSettings::default())
        .get(&url(&server, "/works/missing.json"))
        .await
        .expect("status is not a transport error");

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn client_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };

    let err = client(settings).get(&url(&server, "/slow")).await.unwrap_err();
    assert_eq!(kind(&err), &FailureKind::Timeout);
}

#[tokio::test]
async fn client_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };

    let err = client(settings).get(&url(&server, "/large")).await.unwrap_err();
    assert_eq!(
        kind(&err),
        &FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn client_rejects_non_http_urls() {
    let err = client(FetchSettings::default())
        .get(&Url::parse("file:///etc/hosts").unwrap())
        .await
        .unwrap_err();
    assert_eq!(kind(&err), &FailureKind::InvalidUrl);
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let server = MockServer::start().await;
    let target = url(&server, "/search.json");
    drop(server);

    let err = client(FetchSettings::default()).get(&target).await.unwrap_err();
    assert!(matches!(
        kind(&err),
        FailureKind::Network | FailureKind::Timeout
    ));
}
