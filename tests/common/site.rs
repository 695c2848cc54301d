//! Mock contest site backed by wiremock

use atcoder_cli::Client;
use atcoder_cli::config::HttpConfig;
use atcoder_cli::contests::ContestFamily;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Spacing used by test clients; short enough to keep tests fast
pub const TEST_INTERVAL: Duration = Duration::from_millis(5);

/// HTTP settings pointing at `server`
pub fn http_config(server: &MockServer) -> HttpConfig {
    HttpConfig {
        base_url: server.uri(),
        request_interval: TEST_INTERVAL,
        timeout: Duration::from_secs(5),
        ..HttpConfig::default()
    }
}

/// Client for `family` against `server`
pub fn client_for(server: &MockServer, family: Arc<dyn ContestFamily>) -> Client {
    Client::new(family, &http_config(server)).expect("client should build")
}

/// Serve `body` for GET `route`
pub async fn serve_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Answer GET `route` with `status`
pub async fn serve_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
