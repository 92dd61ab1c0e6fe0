use futures::executor::block_on;

use super::*;
use crate::net::http::ApiError;
use crate::net::test_helpers::{TOKEN_42, harness, response};

// =============================================================
// DefaultHeaders
// =============================================================

#[test]
fn default_headers_are_case_insensitive() {
    let headers = DefaultHeaders::default();
    headers.set("X-CSRF-Token", "a");
    assert_eq!(headers.get("x-csrf-token").as_deref(), Some("a"));
    headers.set("x-csrf-token", "b");
    assert_eq!(headers.snapshot(), vec![("x-csrf-token".to_owned(), "b".to_owned())]);
}

#[test]
fn new_interceptor_seeds_request_id() {
    let h = harness();
    let id = h.client.interceptor().headers().get(REQUEST_ID_HEADER);
    assert!(id.is_some_and(|id| !id.is_empty()));
}

// =============================================================
// before_send
// =============================================================

#[test]
fn before_send_applies_defaults_without_overriding() {
    let h = harness();
    let interceptor = h.client.interceptor();
    interceptor.headers().set(CSRF_HEADER, "default");

    let mut request = ApiRequest::get("/api/posts").with_header("X-CSRF-Token", "explicit");
    interceptor.before_send(&mut request);

    assert_eq!(request.header(CSRF_HEADER), Some("explicit"));
    assert!(request.header(REQUEST_ID_HEADER).is_some());
}

// =============================================================
// after_exchange: identity
// =============================================================

#[test]
fn well_formed_cookie_sets_user_id() {
    let h = harness();
    h.cookies.insert(AUTH_COOKIE, TOKEN_42);
    block_on(h.client.interceptor().after_exchange(Some(&response(200, &[], ""))));
    assert_eq!(h.session.user_untracked(), "42");
}

#[test]
fn missing_cookie_clears_user_id() {
    let h = harness();
    block_on(h.session.update_user("stale")).expect("update");
    block_on(h.client.interceptor().after_exchange(Some(&response(200, &[], ""))));
    assert_eq!(h.session.user_untracked(), "");
}

#[test]
fn malformed_cookie_forces_logged_out() {
    let h = harness();
    block_on(h.session.update_user("stale")).expect("update");
    h.cookies.insert(AUTH_COOKIE, "not-a-token");
    block_on(h.client.interceptor().after_exchange(Some(&response(200, &[], ""))));
    assert_eq!(h.session.user_untracked(), "");
}

#[test]
fn identity_refresh_runs_without_response() {
    let h = harness();
    h.cookies.insert(AUTH_COOKIE, TOKEN_42);
    block_on(h.client.interceptor().after_exchange(None));
    assert_eq!(h.session.user_untracked(), "42");
}

// =============================================================
// after_exchange: csrf
// =============================================================

#[test]
fn csrf_header_becomes_default() {
    let h = harness();
    let interceptor = h.client.interceptor();
    block_on(interceptor.after_exchange(Some(&response(200, &[("x-csrf-token", "abc123")], ""))));
    assert_eq!(interceptor.headers().get(CSRF_HEADER).as_deref(), Some("abc123"));
}

#[test]
fn empty_or_missing_csrf_keeps_previous_token() {
    let h = harness();
    let interceptor = h.client.interceptor();
    interceptor.headers().set(CSRF_HEADER, "abc123");

    block_on(interceptor.after_exchange(Some(&response(200, &[("x-csrf-token", "")], ""))));
    assert_eq!(interceptor.headers().get(CSRF_HEADER).as_deref(), Some("abc123"));

    block_on(interceptor.after_exchange(Some(&response(200, &[], ""))));
    assert_eq!(interceptor.headers().get(CSRF_HEADER).as_deref(), Some("abc123"));
}

#[test]
fn csrf_is_read_from_error_responses() {
    let h = harness();
    let interceptor = h.client.interceptor();
    let err = ApiError::Status(response(403, &[("X-CSRF-Token", "rotated")], "CSRF token invalid"));
    block_on(interceptor.after_exchange(err.response()));
    assert_eq!(interceptor.headers().get(CSRF_HEADER).as_deref(), Some("rotated"));
}

#[test]
fn network_failure_skips_csrf_but_rotates_request_id() {
    let h = harness();
    let interceptor = h.client.interceptor();
    interceptor.headers().set(CSRF_HEADER, "abc123");
    let before = interceptor.headers().get(REQUEST_ID_HEADER);

    block_on(interceptor.after_exchange(None));

    assert_eq!(interceptor.headers().get(CSRF_HEADER).as_deref(), Some("abc123"));
    assert_ne!(interceptor.headers().get(REQUEST_ID_HEADER), before);
}

// =============================================================
// after_exchange: request id
// =============================================================

#[test]
fn request_id_rotates_after_each_exchange() {
    let h = harness();
    let interceptor = h.client.interceptor();
    let first = interceptor.headers().get(REQUEST_ID_HEADER);
    block_on(interceptor.after_exchange(Some(&response(200, &[], ""))));
    let second = interceptor.headers().get(REQUEST_ID_HEADER);
    block_on(interceptor.after_exchange(Some(&response(500, &[], ""))));
    let third = interceptor.headers().get(REQUEST_ID_HEADER);

    assert_ne!(first, second);
    assert_ne!(second, third);
}
