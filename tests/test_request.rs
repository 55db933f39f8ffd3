use docserve::http::parser::parse_http_request;
use docserve::http::request::Method;

fn parse(raw: &str) -> docserve::http::request::Request {
    let (req, _) = parse_http_request(raw.as_bytes()).unwrap();
    req
}

#[test]
fn test_http11_defaults_to_keep_alive() {
    let req = parse("GET / HTTP/1.1\r\nHost: a\r\n\r\n");
    assert!(req.keep_alive());
}

#[test]
fn test_explicit_close_disables_keep_alive() {
    let req = parse("GET / HTTP/1.1\r\nConnection: close\r\n\r\n");
    assert!(!req.keep_alive());

    let req = parse("GET / HTTP/1.1\r\nConnection: CLOSE\r\n\r\n");
    assert!(!req.keep_alive());
}

#[test]
fn test_http10_without_keep_alive_closes() {
    let req = parse("GET / HTTP/1.0\r\nHost: a\r\n\r\n");
    assert!(!req.keep_alive());
}

#[test]
fn test_http10_with_explicit_keep_alive_stays_open() {
    let req = parse("GET / HTTP/1.0\r\nConnection: keep-alive\r\n\r\n");
    assert!(req.keep_alive());
}

#[test]
fn test_method_tokens() {
    assert_eq!(Method::from_token("GET"), Method::Get);
    assert_eq!(Method::from_token("HEAD"), Method::Head);
    assert_eq!(
        Method::from_token("PATCH"),
        Method::Other("PATCH".to_string())
    );
    // Methods are case-sensitive tokens
    assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
}

#[test]
fn test_absolute_url_uses_host_header() {
    let req = parse("GET /docs/index.html HTTP/1.1\r\nHost: example.com:8080\r\n\r\n");
    assert_eq!(req.absolute_url(), "http://example.com:8080/docs/index.html");
}

#[test]
fn test_absolute_url_without_host_falls_back() {
    let req = parse("GET /x HTTP/1.1\r\n\r\n");
    assert_eq!(req.absolute_url(), "http://localhost/x");
}
