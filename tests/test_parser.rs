use beacon::http::parser::{MAX_BODY_LEN, ParseError, parse_request_head};
use beacon::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (head, consumed) = parse_request_head(req).unwrap();

    assert_eq!(head.method, Method::GET);
    assert_eq!(head.path, "/");
    assert_eq!(head.version, "HTTP/1.1");
    assert_eq!(head.headers.get("Host").unwrap(), "example.com");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_leaves_body_in_buffer() {
    let req = b"POST /api HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let (head, consumed) = parse_request_head(req).unwrap();

    assert_eq!(head.method, Method::POST);
    assert_eq!(head.path, "/api");
    assert_eq!(head.content_length(), 5);
    // Body bytes are not consumed; they belong to the body reader
    assert_eq!(&req[consumed..], b"hello");
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let (head, _) = parse_request_head(req).unwrap();

    assert_eq!(head.headers.get("Host").unwrap(), "example.com");
    assert_eq!(head.headers.get("User-Agent").unwrap(), "test-client");
    assert_eq!(head.headers.get("Accept").unwrap(), "*/*");
}

#[test]
fn test_parse_repeated_headers_are_merged() {
    let req = b"GET / HTTP/1.1\r\nAccept: text/html\r\nAccept: application/json\r\n\r\n";
    let (head, _) = parse_request_head(req).unwrap();

    assert_eq!(
        head.headers.get("Accept").unwrap(),
        "text/html, application/json"
    );
}

#[test]
fn test_parse_header_lookup_ignores_client_casing() {
    let req = b"GET / HTTP/1.1\r\nCONTENT-TYPE: application/json\r\n\r\n";
    let (head, _) = parse_request_head(req).unwrap();

    assert_eq!(head.headers.get("content-type"), Some("application/json"));
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let req = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (head, _) = parse_request_head(req).unwrap();

    assert_eq!(head.path, "/search?q=rust");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_request_head(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_invalid_http_method() {
    let req = b"INVALID / HTTP/1.1\r\n\r\n";
    let result = parse_request_head(req);

    assert!(matches!(result, Err(ParseError::InvalidMethod)));
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    let result = parse_request_head(req);

    assert!(matches!(result, Err(ParseError::InvalidHeader)));
}

#[test]
fn test_parse_bad_content_length() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: lots\r\n\r\n";
    let result = parse_request_head(req);

    assert!(matches!(result, Err(ParseError::InvalidContentLength)));
}

#[test]
fn test_parse_rejects_oversized_content_length() {
    // usize::MAX parses as a number but must not reach the body reader
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 18446744073709551615\r\n\r\n";
    assert!(matches!(
        parse_request_head(req),
        Err(ParseError::InvalidContentLength)
    ));

    let req = format!("POST /api HTTP/1.1\r\nContent-Length: {}\r\n\r\n", MAX_BODY_LEN + 1);
    assert!(matches!(
        parse_request_head(req.as_bytes()),
        Err(ParseError::InvalidContentLength)
    ));

    // The limit itself is still accepted
    let req = format!("POST /api HTTP/1.1\r\nContent-Length: {}\r\n\r\n", MAX_BODY_LEN);
    let (head, _) = parse_request_head(req.as_bytes()).unwrap();
    assert_eq!(head.content_length(), MAX_BODY_LEN);
}

#[test]
fn test_parse_skips_leading_empty_lines() {
    // A stray CRLF ahead of the request line is ignored (RFC 9112 §2.2)
    let req = b"\r\nGET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (head, consumed) = parse_request_head(req).unwrap();

    assert_eq!(head.method, Method::GET);
    assert_eq!(head.path, "/");
    assert_eq!(consumed, req.len());

    let req = b"\r\n\r\nGET / HTTP/1.1\r\n\r\n";
    let (head, consumed) = parse_request_head(req).unwrap();
    assert_eq!(head.path, "/");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_various_http_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
    ];

    for (method_str, expected_method) in methods {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let (head, _) = parse_request_head(req.as_bytes()).unwrap();
        assert_eq!(head.method, expected_method);
    }
}

#[test]
fn test_parse_request_without_content_length() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (head, _) = parse_request_head(req).unwrap();

    assert_eq!(head.content_length(), 0);
}
