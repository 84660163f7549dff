use std::sync::Arc;

use cookie_session::{
    parse_cookie_header, Cookie, CookieError, CookieOptions, CryptoError, HttpIntegration,
    InMemoryHttp, SET_COOKIE,
};
use serde_json::json;

fn setup() -> (Arc<InMemoryHttp>, Cookie) {
    let options: CookieOptions = serde_json::from_str(
        r#"{
            "path": "/app",
            "session": { "key": "sid", "secret": "integration secret", "iterations": 10 }
        }"#,
    )
    .unwrap();
    let http = Arc::new(InMemoryHttp::new("req-1"));
    let cookie = Cookie::new(
        options,
        HttpIntegration::new(http.clone()).with_response(http.clone()),
    )
    .unwrap();
    (http, cookie)
}

/// The `Cookie` header a browser would send back after the last `Set-Cookie`.
fn echo_cookie(http: &InMemoryHttp) -> Option<String> {
    let set_cookie = http.header(SET_COOKIE)?;
    let value = parse_cookie_header(&set_cookie, "sid")?;
    Some(format!("sid={value}"))
}

#[test]
fn test_session_survives_across_requests() {
    let (http, cookie) = setup();
    let session = cookie.session().unwrap();

    session.write("user", Some(json!({ "id": 7 }))).unwrap();
    session.write("theme", Some(json!("dark"))).unwrap();

    http.begin_request("req-2", echo_cookie(&http));

    assert_eq!(session.read("user").unwrap(), Some(json!({ "id": 7 })));
    assert_eq!(session.read("theme").unwrap(), Some(json!("dark")));
}

#[test]
fn test_new_request_does_not_see_unsent_state() {
    let (http, cookie) = setup();
    let session = cookie.session().unwrap();

    session.write("user", Some(json!(7))).unwrap();

    // The client never sent the cookie back
    http.begin_request("req-2", None);

    assert_eq!(session.read("user").unwrap(), None);
}

#[test]
fn test_session_cookie_uses_configured_attributes() {
    let (http, cookie) = setup();

    cookie.session().unwrap().write("a", Some(json!(1))).unwrap();

    let header = http.header(SET_COOKIE).unwrap();
    assert!(header.starts_with("sid="));
    assert!(header.ends_with(";max-age=31536000;path=/app;Secure;HttpOnly;"));
}

#[test]
fn test_tampered_cookie_is_rejected_on_next_request() {
    let (http, cookie) = setup();
    let session = cookie.session().unwrap();
    session.write("role", Some(json!("user"))).unwrap();

    let tampered = echo_cookie(&http).unwrap().replacen("sid=", "sid=A", 1);
    http.begin_request("req-2", Some(tampered));

    assert!(matches!(
        session.read("role"),
        Err(CookieError::Crypto(CryptoError::InvalidMac))
    ));
}

#[test]
fn test_cookie_from_other_secret_is_rejected() {
    let (http, cookie) = setup();
    cookie
        .session()
        .unwrap()
        .write("a", Some(json!(1)))
        .unwrap();
    let sent = echo_cookie(&http);

    let options: CookieOptions = serde_json::from_str(
        r#"{ "session": { "key": "sid", "secret": "another secret", "iterations": 10 } }"#,
    )
    .unwrap();
    let other_http = Arc::new(InMemoryHttp::new("req-9"));
    other_http.set_cookie_header(sent);
    let other = Cookie::new(
        options,
        HttpIntegration::new(other_http.clone()).with_response(other_http),
    )
    .unwrap();

    assert!(matches!(
        other.session().unwrap().read("a"),
        Err(CookieError::Crypto(CryptoError::InvalidMac))
    ));
}

#[test]
fn test_destroy_clears_across_requests() {
    let (http, cookie) = setup();
    let session = cookie.session().unwrap();
    session.write("a", Some(json!(1))).unwrap();
    http.begin_request("req-2", echo_cookie(&http));

    session.destroy().unwrap();

    assert_eq!(session.read("a").unwrap(), None);
    // Deletion cookies carry an empty value, which reads as absent
    http.begin_request("req-3", echo_cookie(&http));
    assert_eq!(echo_cookie(&http), None);
    assert_eq!(session.read("a").unwrap(), None);
}

#[test]
fn test_plain_cookies_coexist_with_session() {
    let (http, cookie) = setup();
    cookie.write("theme", Some("light")).unwrap();
    cookie.session().unwrap().write("a", Some(json!(1))).unwrap();

    let headers = http.headers();
    assert_eq!(headers.len(), 2);
    assert_eq!(
        headers[0].1,
        "theme=light;max-age=31536000;path=/app;Secure;HttpOnly;"
    );
    assert!(headers[1].1.starts_with("sid="));
}
