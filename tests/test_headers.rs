use beacon::http::headers::HeaderMap;

#[test]
fn test_lookup_is_case_insensitive() {
    let mut headers = HeaderMap::new();
    headers.set("Content-Type", "application/json");

    assert_eq!(headers.get("content-type"), Some("application/json"));
    assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
    assert_eq!(headers.get("Content-Type"), Some("application/json"));
}

#[test]
fn test_missing_header_is_none() {
    let headers = HeaderMap::new();

    assert_eq!(headers.get("Host"), None);
    assert!(!headers.contains("Host"));
    assert!(headers.is_empty());
}

#[test]
fn test_set_replaces_existing_value() {
    let mut headers = HeaderMap::new();
    headers.set("X-Powered-By", "bacon");
    headers.set("x-powered-by", "tofu");

    // Last write wins; no duplicate entry under a different casing
    assert_eq!(headers.get("X-Powered-By"), Some("tofu"));
    assert_eq!(headers.len(), 1);
}

#[test]
fn test_append_joins_as_comma_separated() {
    let mut headers = HeaderMap::new();
    headers.append("Accept-Encoding", "gzip");
    headers.append("accept-encoding", "br");

    assert_eq!(headers.get("Accept-Encoding"), Some("gzip, br"));
    assert_eq!(headers.len(), 1);
}

#[test]
fn test_append_set_cookie_preserves_list() {
    let mut headers = HeaderMap::new();
    headers.append("Set-Cookie", "session=abc");
    headers.append("Set-Cookie", "theme=dark");

    assert_eq!(
        headers.get_all("set-cookie"),
        vec!["session=abc", "theme=dark"]
    );
    // First value is what a single-value lookup sees
    assert_eq!(headers.get("Set-Cookie"), Some("session=abc"));
}

#[test]
fn test_no_two_entries_share_a_lowercase_key() {
    let mut headers = HeaderMap::new();
    headers.append("Host", "a.example");
    headers.set("HOST", "b.example");
    headers.append("host", "c.example");

    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("Host"), Some("b.example, c.example"));
}

#[test]
fn test_insertion_order_is_preserved_for_serialization() {
    let mut headers = HeaderMap::new();
    headers.set("Content-Type", "text/plain");
    headers.set("X-First", "1");
    headers.set("X-Second", "2");

    let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Content-Type", "X-First", "X-Second"]);
}

#[test]
fn test_original_name_casing_survives() {
    let mut headers = HeaderMap::new();
    headers.append("Content-Type", "text/html");

    let (name, _) = headers.iter().next().unwrap();
    assert_eq!(name, "Content-Type");
}

#[test]
fn test_remove_drops_all_values() {
    let mut headers = HeaderMap::new();
    headers.append("Set-Cookie", "a=1");
    headers.append("Set-Cookie", "b=2");
    headers.set("Host", "example.com");

    assert!(headers.remove("set-cookie"));
    assert!(!headers.contains("Set-Cookie"));
    assert!(!headers.remove("set-cookie"));
    assert_eq!(headers.len(), 1);
}
