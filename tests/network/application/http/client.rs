use super::mock::RecordingTransport;
use libhttp::network::Read;
use libhttp::network::application::http::{Client, Credentials, HeaderMap};
use libhttp::network::error::Error;

fn client() -> Client<RecordingTransport> {
    Client::new(RecordingTransport::new())
}

fn read_to_string(mut body: impl Read<Error = Error>) -> String {
    let mut out = Vec::new();
    let mut buf = [0u8; 4];
    loop {
        let n = body.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    String::from_utf8(out).unwrap()
}

#[test]
fn test_get_forms_correct_request_without_basic_auth() {
    let mut client = client();
    client
        .transport_mut()
        .add_pending_response(200, "OK");

    client.get("www.example.com", &HeaderMap::new(), None).unwrap();

    let sent = client.transport().sent_request(0);
    assert_eq!(sent.target, "www.example.com");
    assert!(!sent.had_store);
    assert_eq!(sent.any_credentials, None);
}

#[test]
fn test_get_passes_target_through_verbatim() {
    let mut client = client();
    for target in ["http://Example.COM:8080/a/../b?q=1 2", "", "not a url"] {
        client.get(target, &HeaderMap::new(), None).unwrap();
    }
    let transport = client.transport();
    assert_eq!(transport.sent_request(0).target, "http://Example.COM:8080/a/../b?q=1 2");
    assert_eq!(transport.sent_request(1).target, "");
    assert_eq!(transport.sent_request(2).target, "not a url");
}

#[test]
fn test_get_should_apply_correct_headers() {
    let mut client = client();
    let headers = HeaderMap::from_pairs(&[("foo", "bar"), ("X-Device", "sensor-01")]).unwrap();

    client.get("www.example.com", &headers, None).unwrap();

    let sent = client.transport().sent_request(0);
    assert_eq!(sent.header("foo"), Some("bar"));
    assert_eq!(sent.header("X-Device"), Some("sensor-01"));
    assert_eq!(sent.headers.len(), 2);
}

#[test]
fn test_get_should_use_correct_http_method() {
    let mut client = client();
    client.get("www.example.com", &HeaderMap::new(), None).unwrap();
    let sent = client.transport().sent_request(0);
    assert_eq!(sent.method, "GET");
    assert_eq!(sent.entity, None);
}

#[test]
fn test_get_forms_correct_request_with_basic_auth() {
    let mut client = client();
    client
        .transport_mut()
        .add_pending_response(200, "OK");
    let credentials = Credentials::new("username", "password").unwrap();

    client
        .get("www.example.com", &HeaderMap::new(), Some(&credentials))
        .unwrap();

    let sent = client.transport().sent_request(0);
    assert!(sent.had_store);
    assert_eq!(
        sent.any_credentials,
        Some(("username".to_string(), "password".to_string()))
    );
}

#[test]
fn test_should_return_correct_response() {
    let mut client = client();
    client
        .transport_mut()
        .add_pending_response(666, "it's all cool");

    let response = client.get("www.example.com", &HeaderMap::new(), None).unwrap();

    assert_eq!(response.status_code(), 666);
    assert_eq!(read_to_string(response.into_body()), "it's all cool");
}

#[test]
fn test_default_response_when_nothing_pending() {
    let mut client = client();
    let response = client.get("www.example.com", &HeaderMap::new(), None).unwrap();
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body().as_bytes(), b"OK");
}

#[test]
fn test_post_should_use_correct_method() {
    let mut client = client();
    client
        .post("www.example.com", &HeaderMap::new(), Some("a post body"), None)
        .unwrap();
    assert_eq!(client.transport().sent_request(0).method, "POST");
}

#[test]
fn test_post_should_include_post_body() {
    let mut client = client();
    client
        .post("www.example.com", &HeaderMap::new(), Some("a post body"), None)
        .unwrap();

    let (content, content_type) = client.transport().sent_request(0).entity.clone().unwrap();
    assert_eq!(content, b"a post body");
    assert_eq!(content_type, "text/plain; charset=UTF-8");
}

#[test]
fn test_post_without_body_has_no_entity() {
    let mut client = client();
    client
        .post("www.example.com", &HeaderMap::new(), None, None)
        .unwrap();
    let sent = client.transport().sent_request(0);
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.entity, None);
}

#[test]
fn test_post_with_empty_body_still_has_entity() {
    let mut client = client();
    client
        .post("www.example.com", &HeaderMap::new(), Some(""), None)
        .unwrap();
    let (content, _) = client.transport().sent_request(0).entity.clone().unwrap();
    assert!(content.is_empty());
}

#[test]
fn test_post_applies_headers_and_credentials_like_get() {
    let mut client = client();
    let headers = HeaderMap::from_pairs(&[("foo", "bar")]).unwrap();
    let credentials = Credentials::new("alice", "secret").unwrap();

    client
        .post("www.example.com", &headers, Some("{}"), Some(&credentials))
        .unwrap();

    let sent = client.transport().sent_request(0);
    assert_eq!(sent.header("foo"), Some("bar"));
    assert_eq!(
        sent.any_credentials,
        Some(("alice".to_string(), "secret".to_string()))
    );
}

#[test]
fn test_transport_failure_is_returned_unmodified() {
    let mut client = client();
    client.transport_mut().fail_with(Error::ConnectionRefused);

    let result = client.get("www.example.com", &HeaderMap::new(), None);
    assert_eq!(result, Err(Error::ConnectionRefused));

    let result = client.post("www.example.com", &HeaderMap::new(), Some("x"), None);
    assert_eq!(result, Err(Error::ConnectionRefused));

    // no retry: one attempt per call
    assert_eq!(client.transport().sent_count(), 2);
}

#[test]
fn test_each_call_sends_exactly_one_independent_request() {
    let mut client = client();
    let credentials = Credentials::new("alice", "secret").unwrap();
    let headers = HeaderMap::from_pairs(&[("foo", "bar")]).unwrap();
    client.transport_mut().add_pending_response(201, "first");
    client.transport_mut().add_pending_response(202, "second");

    let first = client
        .get("www.example.com/one", &headers, Some(&credentials))
        .unwrap();
    let second = client
        .get("www.example.com/two", &HeaderMap::new(), None)
        .unwrap();

    assert_eq!(first.status_code(), 201);
    assert_eq!(second.status_code(), 202);
    assert_eq!(client.transport().sent_count(), 2);

    // nothing from the first call leaks into the second
    let sent = client.transport().sent_request(1);
    assert!(sent.headers.is_empty());
    assert!(!sent.had_store);
}

#[test]
fn test_half_credentials_are_rejected_before_sending() {
    assert_eq!(
        Credentials::from_parts(Some("alice"), None),
        Err(Error::IncompleteCredentials)
    );

    let mut client = client();
    let credentials = Credentials::from_parts(None, None).unwrap();
    client
        .get("www.example.com", &HeaderMap::new(), credentials.as_ref())
        .unwrap();
    assert!(!client.transport().sent_request(0).had_store);
}

#[test]
fn test_client_over_borrowed_transport() {
    let mut transport = RecordingTransport::new();
    {
        let mut client = Client::new(&mut transport);
        client.get("www.example.com", &HeaderMap::new(), None).unwrap();
    }
    assert_eq!(transport.sent_count(), 1);
}
