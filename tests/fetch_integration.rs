//! Integration tests for the fetch pipeline.
//!
//! These tests drive the public `Client` against a mock HTTP server.
//! They do not make real network requests.

mod helpers;

use httptest::{matchers::*, responders::*, Expectation, Server};

use docfetch::{Browser, ErrorCategory, FetchError, FetchErrorKind, InfoType, Method};
use helpers::{gzip, page, test_client};

#[tokio::test]
async fn test_fetch_simple_page() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(
            status_code(200)
                .insert_header("Content-Type", "text/html")
                .body(page("Hello", "<p>World</p>")),
        ),
    );

    let client = test_client();
    let result = client
        .fetch(&server.url_str("/"), None, None)
        .await
        .expect("Fetch should succeed");

    assert_eq!(result.response.status_code(), 200);
    assert_eq!(result.document.title().as_deref(), Some("Hello"));
    assert_eq!(result.document.encoding(), Some("utf-8"));
    assert_eq!(result.document.url().as_str(), server.url_str("/"));
    assert!(result.body.contains("<p>World</p>"));
}

#[tokio::test]
async fn test_get_params_become_query_string() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/search"),
            request::query(url_decoded(contains(("q", "rust lang")))),
        ])
        .respond_with(status_code(200).body(page("Results", ""))),
    );

    let client = test_client();
    let params = vec![("q".to_string(), "rust lang".to_string())];
    let result = client
        .fetch(&server.url_str("/search"), Some(params), None)
        .await
        .expect("Fetch should succeed");
    assert_eq!(result.document.title().as_deref(), Some("Results"));
}

#[tokio::test]
async fn test_relative_redirect_resolves_to_final_url() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/start"))
            .respond_with(status_code(301).insert_header("Location", "/next")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/next"))
            .respond_with(status_code(200).body(page("Next", ""))),
    );

    let client = test_client();
    let result = client
        .fetch(&server.url_str("/start"), None, None)
        .await
        .expect("Fetch should succeed");

    assert_eq!(result.document.url().as_str(), server.url_str("/next"));
    assert_eq!(result.response.url, *result.document.url());
    assert_eq!(client.stats().get_info_count(InfoType::HttpRedirect), 1);
}

#[tokio::test]
async fn test_post_redirect_becomes_parameterless_get() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/login"),
            request::body(url_decoded(contains(("user", "alice")))),
        ])
        .respond_with(status_code(302).insert_header("Location", "/home")),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/home"),
            request::body(""),
        ])
        .respond_with(status_code(200).body(page("Home", ""))),
    );

    let client = test_client();
    let params = vec![("user".to_string(), "alice".to_string())];
    let result = client
        .post(&server.url_str("/login"), Some(params), None)
        .await
        .expect("Fetch should succeed");
    assert_eq!(result.document.title().as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_redirect_limit() {
    let server = Server::run();
    for hop in 0..6 {
        server.expect(
            Expectation::matching(request::method_path("GET", eq(format!("/r{hop}"))))
                .respond_with(
                    status_code(302).insert_header("Location", format!("/r{}", hop + 1)),
                ),
        );
    }
    // The seventh location is never requested.
    server.expect(
        Expectation::matching(request::method_path("GET", "/r6"))
            .times(0)
            .respond_with(status_code(200)),
    );

    let client = test_client();
    let err = client
        .fetch(&server.url_str("/r0"), None, None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "redirect limit over");
    assert!(matches!(err.kind(), FetchErrorKind::RedirectLimit { .. }));
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert_eq!(err.url(), Some(server.url_str("/r0").as_str()));
}

#[tokio::test]
async fn test_redirect_chain_within_limit() {
    let server = Server::run();
    for hop in 0..5 {
        server.expect(
            Expectation::matching(request::method_path("GET", eq(format!("/r{hop}"))))
                .respond_with(
                    status_code(302).insert_header("Location", format!("/r{}", hop + 1)),
                ),
        );
    }
    server.expect(
        Expectation::matching(request::method_path("GET", "/r5"))
            .respond_with(status_code(200).body(page("Arrived", ""))),
    );

    let client = test_client();
    let result = client
        .fetch(&server.url_str("/r0"), None, None)
        .await
        .expect("Five redirects are allowed");
    assert_eq!(result.document.url().path(), "/r5");
}

#[tokio::test]
async fn test_gzip_body_is_inflated() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/gz"),
            request::headers(contains(("accept-encoding", "gzip, deflate"))),
        ])
        .respond_with(
            status_code(200)
                .insert_header("Content-Encoding", "GZIP")
                .body(gzip(page("Packed", "").as_bytes())),
        ),
    );

    let client = test_client();
    let result = client
        .fetch(&server.url_str("/gz"), None, None)
        .await
        .expect("Fetch should succeed");
    assert_eq!(result.document.title().as_deref(), Some("Packed"));
    assert_eq!(result.document.encoding(), Some("utf-8"));
}

#[tokio::test]
async fn test_gzip_disabled_sends_no_accept_encoding() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/"),
            not(request::headers(contains(key("accept-encoding")))),
        ])
        .respond_with(status_code(200).body(page("Plain", ""))),
    );

    let client = test_client();
    client.settings().write().expect("settings lock").gzip = false;
    client
        .fetch(&server.url_str("/"), None, None)
        .await
        .expect("Fetch should succeed");
}

#[tokio::test]
async fn test_corrupt_gzip_fails() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/bad")).respond_with(
            status_code(200)
                .insert_header("Content-Encoding", "gzip")
                .body("this is not compressed"),
        ),
    );

    let client = test_client();
    let err = client
        .fetch(&server.url_str("/bad"), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), FetchErrorKind::Decompression(_)));
    assert_eq!(err.response().map(|r| r.status_code()), Some(200));
    assert!(err.document().is_none());
}

#[tokio::test]
async fn test_not_found_still_parses_document() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/missing"))
            .respond_with(status_code(404).body(page("Not Found", "<p>gone</p>"))),
    );

    let client = test_client();
    let err = client
        .fetch(&server.url_str("/missing"), None, None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "server status");
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.category(), ErrorCategory::Status);
    assert_eq!(err.response().map(|r| r.status_code()), Some(404));
    assert!(err.body().is_some_and(|b| b.contains("gone")));
    assert_eq!(
        err.document().and_then(|d| d.title()).as_deref(),
        Some("Not Found")
    );
}

#[tokio::test]
async fn test_empty_body_is_no_content() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/empty")).respond_with(status_code(200)),
    );

    let client = test_client();
    let err = client
        .fetch(&server.url_str("/empty"), None, None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "no content");
    assert_eq!(err.status_code(), Some(200));
    assert!(err.body().is_none());
}

#[tokio::test]
async fn test_content_length_too_large() {
    let server = Server::run();
    let big = vec![b'a'; 5_000_001];
    server.expect(
        Expectation::matching(request::method_path("GET", "/big"))
            .respond_with(status_code(200).body(big)),
    );

    let client = test_client();
    let err = client
        .fetch(&server.url_str("/big"), None, None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "content-length is too large");
    assert_eq!(err.content_length(), Some(5_000_001));
    assert_eq!(err.category(), ErrorCategory::Content);
    // Rejected before charset conversion and parsing.
    assert!(err.body().is_none());
    assert!(err.document().is_none());
    assert_eq!(err.response().map(|r| r.status_code()), Some(200));
}

#[tokio::test]
async fn test_meta_utf16_declaration_is_read_as_utf8() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/utf16")).respond_with(
            status_code(200)
                .body(r#"<html><head><meta charset="utf-16"><title>Hello</title></head></html>"#),
        ),
    );

    let client = test_client();
    let result = client
        .fetch(&server.url_str("/utf16"), None, None)
        .await
        .expect("Fetch should succeed");
    assert_eq!(result.document.title().as_deref(), Some("Hello"));
    assert_eq!(result.document.encoding(), Some("utf-8"));
}

#[tokio::test]
async fn test_fetch_runs_on_spawned_task() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/missing"))
            .respond_with(status_code(404).body(page("Gone", ""))),
    );

    let client = test_client();
    let url = server.url_str("/missing");
    let handle = tokio::spawn(async move { client.fetch(&url, None, None).await });
    let err = handle
        .await
        .expect("Task should not panic")
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.document().and_then(|d| d.title()).as_deref(), Some("Gone"));
}

#[tokio::test]
async fn test_shift_jis_page_is_converted() {
    let (title, _, _) = encoding_rs::SHIFT_JIS.encode("日本語のページ");
    let mut body = br#"<html><head><meta charset="Shift_JIS"><title>"#.to_vec();
    body.extend_from_slice(&title);
    body.extend_from_slice(b"</title></head><body></body></html>");

    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/sjis"))
            .respond_with(status_code(200).body(body)),
    );

    let client = test_client();
    let result = client
        .fetch(&server.url_str("/sjis"), None, None)
        .await
        .expect("Fetch should succeed");
    assert_eq!(result.document.encoding(), Some("shift_jis"));
    assert_eq!(result.document.title().as_deref(), Some("日本語のページ"));
}

#[tokio::test]
async fn test_encoding_hint_overrides_declaration() {
    // Declares UTF-8 but is actually windows-1252.
    let body = b"<html><head><meta charset=\"utf-8\"><title>caf\xe9</title></head></html>".to_vec();

    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/latin"))
            .times(2)
            .respond_with(status_code(200).body(body)),
    );

    let client = test_client();
    let url = server.url_str("/latin");

    let err = client.fetch(&url, None, None).await.unwrap_err();
    assert!(matches!(err.kind(), FetchErrorKind::Decode { .. }));
    assert_eq!(err.charset(), Some("utf-8"));

    let result = client
        .fetch(&url, None, Some("Windows-1252"))
        .await
        .expect("Hinted fetch should succeed");
    assert_eq!(result.document.encoding(), Some("windows-1252"));
    assert_eq!(result.document.title().as_deref(), Some("café"));
}

#[tokio::test]
async fn test_callback_mode_reports_partial_result() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/missing"))
            .respond_with(status_code(404).body(page("Missing", ""))),
    );

    let client = test_client();
    let mut seen = None;
    client
        .run_with_callback(
            Method::GET,
            &server.url_str("/missing"),
            None,
            None,
            |err, doc, resp, body| {
                seen = Some((err, doc, resp, body));
            },
        )
        .await;

    let (err, doc, resp, body) = seen.expect("callback should be invoked");
    let err: FetchError = err.expect("error should be passed");
    assert_eq!(err.to_string(), "server status");
    // The partial result travels as arguments, not on the error.
    assert!(err.document().is_none());
    assert!(err.body().is_none());
    assert_eq!(doc.and_then(|d| d.title()).as_deref(), Some("Missing"));
    assert_eq!(resp.map(|r| r.status_code()), Some(404));
    assert!(body.is_some());
}

#[tokio::test]
async fn test_callback_mode_success() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(status_code(200).body(page("Ok", ""))),
    );

    let client = test_client();
    let mut seen = None;
    client
        .run_with_callback(Method::GET, &server.url_str("/"), None, None, |err, doc, resp, body| {
            seen = Some((err.is_none(), doc.and_then(|d| d.title()), resp.is_some(), body.is_some()));
        })
        .await;

    assert_eq!(seen, Some((true, Some("Ok".to_string()), true, true)));
}

#[tokio::test]
async fn test_referer_chains_between_fetches() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/one"),
            not(request::headers(contains(key("referer")))),
        ])
        .respond_with(status_code(200).body(page("One", ""))),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/two"),
            request::headers(contains(key("referer"))),
        ])
        .respond_with(status_code(200).body(page("Two", ""))),
    );

    let client = test_client();
    let one = server.url_str("/one");
    client.fetch(&one, None, None).await.expect("First fetch should succeed");
    assert_eq!(
        client
            .settings()
            .read()
            .expect("settings lock")
            .headers
            .get("referer")
            .and_then(|v| v.to_str().ok()),
        Some(one.as_str())
    );
    client
        .fetch(&server.url_str("/two"), None, None)
        .await
        .expect("Second fetch should succeed");
}

#[tokio::test]
async fn test_cookies_persist_across_fetches() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/set"))
            .respond_with(
                status_code(302)
                    .insert_header("Set-Cookie", "session=abc; Path=/")
                    .insert_header("Location", "/landing"),
            ),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/landing"),
            request::headers(contains(("cookie", "session=abc"))),
        ])
        .times(2)
        .respond_with(status_code(200).body(page("Landing", ""))),
    );

    let client = test_client();
    let result = client
        .fetch(&server.url_str("/set"), None, None)
        .await
        .expect("Fetch should succeed");
    assert_eq!(result.cookies().get("session").map(String::as_str), Some("abc"));

    let again = client
        .fetch(&server.url_str("/landing"), None, None)
        .await
        .expect("Cookie should be resent");
    assert_eq!(again.cookies().len(), 1);
}

#[tokio::test]
async fn test_browser_identity_is_sent() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/"),
            request::headers(contains(("user-agent", Browser::Firefox.user_agent()))),
        ])
        .respond_with(status_code(200).body(page("UA", ""))),
    );

    let client = test_client();
    assert!(client.set_browser("firefox"));
    assert!(!client.set_browser("netscape"));
    client
        .fetch(&server.url_str("/"), None, None)
        .await
        .expect("Fetch should succeed");
}

#[tokio::test]
async fn test_default_identity_is_internet_explorer() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/"),
            request::headers(contains(("user-agent", Browser::Ie.user_agent()))),
        ])
        .respond_with(status_code(200).body(page("UA", ""))),
    );

    let client = test_client();
    client
        .fetch(&server.url_str("/"), None, None)
        .await
        .expect("Fetch should succeed");
    assert_eq!(
        client.settings().read().expect("settings lock").browser(),
        Some(Browser::Ie)
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = test_client();
    let err = client
        .fetch("http://127.0.0.1:9/", None, None)
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert!(err.response().is_none());
    assert_eq!(client.stats().get_error_count(ErrorCategory::Transport), 1);
}
