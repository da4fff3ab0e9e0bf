// The negative checks compare the reason phrase the server actually sent.
// wiremock always writes the canonical phrase, so these tests answer from a
// bare TCP listener with hand-written status lines.

use bookcheck_booking::{BookingError, BookingSession, BookingWorkflow, Operation};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

mod fixtures;

const CREATED: &str = r#"{"bookingid":1}"#;

/// Serves every POST with a created booking and every other request with
/// `status_line` and an empty body.
async fn start_raw_server(status_line: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let request = read_request(&mut socket).await;
                let response = if request.starts_with("POST ") {
                    format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                        CREATED.len(),
                        CREATED
                    )
                } else {
                    format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                };
                socket.write_all(response.as_bytes()).await.ok();
                socket.shutdown().await.ok();
            });
        }
    });

    addr
}

/// Reads one request: headers plus a `Content-Length` body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let body_len = text[..end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn workflow_at(addr: SocketAddr) -> BookingWorkflow {
    bookcheck_common::logging::init();
    fixtures::workflow_with(fixtures::test_profile(&format!("http://{addr}")))
}

#[tokio::test]
async fn read_deleted_rejects_a_non_standard_phrase() {
    let addr = start_raw_server("HTTP/1.1 404 Gone Fishing").await;
    let workflow = workflow_at(addr);
    let mut session = BookingSession::new();
    workflow.create(&mut session).await.unwrap();

    let err = workflow.read_deleted(&mut session).await.unwrap_err();
    match err {
        BookingError::UnexpectedPhrase { operation, expected, actual } => {
            assert_eq!(operation, Operation::ReadDeleted);
            assert_eq!(expected, "Not Found");
            assert_eq!(actual.as_deref(), Some("Gone Fishing"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn read_deleted_accepts_the_standard_phrase() {
    let addr = start_raw_server("HTTP/1.1 404 Not Found").await;
    let workflow = workflow_at(addr);
    let mut session = BookingSession::new();
    workflow.create(&mut session).await.unwrap();

    workflow.read_deleted(&mut session).await.unwrap();
}

#[tokio::test]
async fn update_without_token_rejects_a_non_standard_phrase() {
    let addr = start_raw_server("HTTP/1.1 403 Go Away").await;
    let workflow = workflow_at(addr);
    let mut session = BookingSession::new();
    workflow.create(&mut session).await.unwrap();

    let err = workflow.update_without_token(&mut session).await.unwrap_err();
    assert!(matches!(
        err,
        BookingError::UnexpectedPhrase { operation: Operation::UpdateWithoutToken, .. }
    ));
}
