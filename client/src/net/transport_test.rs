#![cfg(not(feature = "csr"))]

use super::*;
use portal::http::HttpClient;

#[test]
fn base_url_is_kept_verbatim() {
    assert_eq!(GlooTransport::new("http://api.test").base_url(), "http://api.test");
}

#[test]
fn native_build_reports_transport_error_with_url() {
    let client = HttpClient::new(GlooTransport::new("http://api.test"));
    let err = futures::executor::block_on(client.send(&ApiRequest::get("/api/user"))).unwrap_err();
    match err {
        ApiError::Transport(message) => assert!(message.contains("GET http://api.test/api/user")),
        other => panic!("unexpected error: {other:?}"),
    }
}
