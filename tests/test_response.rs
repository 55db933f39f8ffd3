use docserve::http::response::{
    ResponseState, ResponseWriter, StatusCode, WriteError, PROBE_SIZE,
};

fn header_block(raw: &[u8]) -> (String, usize) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("header terminator missing");
    (
        String::from_utf8(raw[..end].to_vec()).unwrap(),
        end + 4,
    )
}

#[test]
fn test_status_codes() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NotModified.as_u16(), 304);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);

    assert_eq!(StatusCode::NotModified.reason_phrase(), "Not Modified");
    assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
}

#[tokio::test]
async fn test_small_body_uses_content_length() {
    let body = vec![b'a'; PROBE_SIZE - 1];
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&mut out, StatusCode::Ok, false);
    writer.write_body(body.as_slice()).await.unwrap();
    assert_eq!(writer.state(), ResponseState::Done);

    let (headers, body_start) = header_block(&out);
    assert!(headers.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(headers.contains("Server: "));
    assert!(headers.contains(&format!("Content-Length: {}", PROBE_SIZE - 1)));
    assert!(!headers.contains("Transfer-Encoding"));
    assert_eq!(out.len() - body_start, PROBE_SIZE - 1);
}

#[tokio::test]
async fn test_probe_sized_body_is_chunked() {
    let body = vec![b'b'; PROBE_SIZE];
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&mut out, StatusCode::Ok, false);
    writer.write_body(body.as_slice()).await.unwrap();

    let (headers, body_start) = header_block(&out);
    assert!(headers.contains("Transfer-Encoding: chunked"));
    assert!(!headers.contains("Content-Length"));

    // One full probe chunk, then the zero-length terminator.
    let framed = &out[body_start..];
    assert!(framed.starts_with(format!("{:x}\r\n", PROBE_SIZE).as_bytes()));
    assert!(framed.ends_with(b"0\r\n\r\n"));
}

#[tokio::test]
async fn test_body_one_past_probe_gets_two_chunks() {
    let body = vec![b'c'; PROBE_SIZE + 1];
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&mut out, StatusCode::Ok, false);
    writer.write_body(body.as_slice()).await.unwrap();

    let (_, body_start) = header_block(&out);
    let mut expected = Vec::new();
    expected.extend_from_slice(format!("{:x}\r\n", PROBE_SIZE).as_bytes());
    expected.extend_from_slice(&body[..PROBE_SIZE]);
    expected.extend_from_slice(b"\r\n1\r\nc\r\n0\r\n\r\n");
    assert_eq!(&out[body_start..], expected.as_slice());
}

#[tokio::test]
async fn test_head_suppresses_body_but_keeps_framing_headers() {
    let body = b"hello".to_vec();
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&mut out, StatusCode::Ok, true);
    writer.header("Content-Type", "text/plain").unwrap();
    writer.write_body(body.as_slice()).await.unwrap();

    let (headers, body_start) = header_block(&out);
    assert!(headers.contains("Content-Length: 5"));
    assert_eq!(out.len(), body_start, "HEAD response must carry no body bytes");
}

#[tokio::test]
async fn test_head_chunked_framing_headers_without_chunks() {
    let body = vec![b'd'; PROBE_SIZE];
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&mut out, StatusCode::Ok, true);
    writer.write_body(body.as_slice()).await.unwrap();

    let (headers, body_start) = header_block(&out);
    assert!(headers.contains("Transfer-Encoding: chunked"));
    assert_eq!(out.len(), body_start);
}

#[tokio::test]
async fn test_close_from_header_is_empty_body_without_framing() {
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&mut out, StatusCode::NotModified, false);
    writer.header("ETag", "\"abc\"").unwrap();
    writer.close().await.unwrap();
    assert_eq!(writer.state(), ResponseState::Done);

    let (headers, body_start) = header_block(&out);
    assert!(headers.starts_with("HTTP/1.1 304 Not Modified\r\n"));
    assert!(headers.contains("ETag: \"abc\""));
    assert!(!headers.contains("Content-Length"));
    assert!(!headers.contains("Transfer-Encoding"));
    assert_eq!(out.len(), body_start);
}

#[tokio::test]
async fn test_header_after_body_is_illegal() {
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&mut out, StatusCode::Ok, false);
    writer.write_body(&b"x"[..]).await.unwrap();

    let err = writer.header("Too", "late").unwrap_err();
    assert!(matches!(
        err,
        WriteError::IllegalState {
            op: "header",
            state: ResponseState::Done,
        }
    ));
}

#[tokio::test]
async fn test_second_write_body_is_illegal() {
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&mut out, StatusCode::Ok, false);
    writer.write_body(&b"first"[..]).await.unwrap();

    let err = writer.write_body(&b"second"[..]).await.unwrap_err();
    assert!(matches!(err, WriteError::IllegalState { .. }));
}

#[tokio::test]
async fn test_write_body_after_close_is_illegal() {
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&mut out, StatusCode::NotModified, false);
    writer.close().await.unwrap();

    let err = writer.write_body(&b"late"[..]).await.unwrap_err();
    assert!(matches!(err, WriteError::IllegalState { .. }));
}

#[tokio::test]
async fn test_close_after_done_writes_nothing_more() {
    let mut out: Vec<u8> = Vec::new();
    {
        let mut writer = ResponseWriter::new(&mut out, StatusCode::Ok, false);
        writer.write_body(&b"x"[..]).await.unwrap();
        writer.close().await.unwrap();
    }

    let (headers, body_start) = header_block(&out);
    assert!(headers.contains("Content-Length: 1"));
    assert_eq!(out.len(), body_start + 1);
}
