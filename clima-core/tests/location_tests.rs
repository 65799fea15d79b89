//! IP geolocation lookup against a mock server.

use clima_core::{
    Config, LocationError, LocationMode,
    location::{IpLocation, LocationSource, location_from_config},
    model::Coordinates,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn ip_lookup_returns_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": -8.0476,
            "lon": -34.877
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = IpLocation::with_base_url(&server.uri());
    let coords = source.current_position().await.expect("lookup should succeed");

    assert_eq!(coords, Coordinates::new(-8.0476, -34.877));
}

#[tokio::test]
async fn ip_lookup_failure_status_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&server)
        .await;

    let source = IpLocation::with_base_url(&server.uri());
    let err = source.current_position().await.unwrap_err();

    match err {
        LocationError::Unavailable(msg) => assert_eq!(msg, "private range"),
        other => panic!("expected unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn ip_lookup_http_error_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let source = IpLocation::with_base_url(&server.uri());
    let err = source.current_position().await.unwrap_err();
    assert!(matches!(err, LocationError::Unavailable(_)));
}

#[tokio::test]
async fn config_selects_ip_lookup_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 1.0,
            "lon": 2.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cfg = Config::default();
    cfg.location.mode = LocationMode::Ip;
    cfg.location.lookup_url = Some(server.uri());

    let source = location_from_config(&cfg);
    assert_eq!(
        source.current_position().await.expect("lookup"),
        Coordinates::new(1.0, 2.0)
    );
}

#[tokio::test]
async fn disabled_mode_never_resolves() {
    let mut cfg = Config::default();
    cfg.location.mode = LocationMode::Disabled;

    let err = location_from_config(&cfg).current_position().await.unwrap_err();
    assert!(matches!(err, LocationError::Disabled));
}
