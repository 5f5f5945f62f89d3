//! End-to-end tests for the advice request flow.
//!
//! The Gemini client is exercised against a throwaway local HTTP listener so
//! the real request/response path runs without network access.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use voltsafe::{
    ChatWidget, FailureKind, GeminiClient, GenerateAdviceUseCase, Role, ScriptedChatClient,
    APOLOGY_TEXT, FALLBACK_TEXT, GREETING_TEXT,
};

/// Serve one HTTP response, returning the raw request it answered.
async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("addr"));

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        request
    });

    (base_url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.expect("read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn gemini_advisor(base_url: &str) -> GenerateAdviceUseCase {
    let client = GeminiClient::new("test-key", "gemini-test", base_url, Duration::from_secs(5))
        .expect("client");
    GenerateAdviceUseCase::new(Arc::new(client))
}

#[tokio::test]
async fn gemini_reply_text_is_returned() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "- Yes, we install switchboards."}]}}]}"#,
    )
    .await;
    let advisor = gemini_advisor(&base_url);

    let text = advisor.generate_advice("Do you install switchboards?").await;
    assert_eq!(text, "- Yes, we install switchboards.");

    let request = server.await.expect("server");
    assert!(request.starts_with("POST /v1beta/models/gemini-test:generateContent"));
    assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    assert!(request.contains("\"systemInstruction\""));
    assert!(request.contains("Do you install switchboards?"));
}

#[tokio::test]
async fn gemini_empty_text_returns_apology() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": ""}]}}]}"#,
    )
    .await;
    let advisor = gemini_advisor(&base_url);

    let reply = advisor.execute("hello").await;
    assert_eq!(reply.text(), APOLOGY_TEXT);
    assert_eq!(reply.failure(), Some(FailureKind::EmptyResponse));
    server.await.expect("server");
}

#[tokio::test]
async fn gemini_error_status_returns_fallback() {
    let (base_url, server) = serve_once(
        "503 Service Unavailable",
        r#"{"error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}}"#,
    )
    .await;
    let advisor = gemini_advisor(&base_url);

    let err = advisor.try_generate("hello").await.unwrap_err();
    assert!(err.is_service());
    assert_eq!(err.to_string(), "Service returned 503: The model is overloaded.");
    server.await.expect("server");
}

#[tokio::test]
async fn gemini_malformed_body_returns_fallback() {
    let (base_url, server) = serve_once("200 OK", "<html>not json</html>").await;
    let advisor = gemini_advisor(&base_url);

    let reply = advisor.execute("hello").await;
    assert_eq!(reply.text(), FALLBACK_TEXT);
    assert_eq!(reply.failure(), Some(FailureKind::Malformed));
    server.await.expect("server");
}

#[tokio::test]
async fn unreachable_service_returns_exact_fallback() {
    let advisor = gemini_advisor("http://127.0.0.1:1");

    let text = advisor.generate_advice("Is my wiring safe?").await;
    assert_eq!(text, FALLBACK_TEXT);
}

#[tokio::test]
async fn every_query_gets_non_empty_text() {
    let advisors = [
        GenerateAdviceUseCase::new(Arc::new(ScriptedChatClient::new().with_reply("answer"))),
        GenerateAdviceUseCase::new(Arc::new(ScriptedChatClient::new().with_reply(""))),
        gemini_advisor("http://127.0.0.1:1"),
    ];

    for advisor in &advisors {
        for query in ["a", "How much for a new power point?", "smoke from the switchboard!"] {
            assert!(!advisor.generate_advice(query).await.is_empty());
        }
    }
}

#[tokio::test]
async fn widget_conversation_over_unreachable_service() {
    let advisor = gemini_advisor("http://127.0.0.1:1");
    let mut widget = ChatWidget::new();

    assert!(widget.send(&advisor, "Do you install switchboards?").await);

    let messages = widget.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].text(), GREETING_TEXT);
    assert_eq!(messages[1].role(), Role::User);
    assert_eq!(messages[2].role(), Role::Model);
    assert_eq!(messages[2].text(), FALLBACK_TEXT);
    assert_eq!(messages[2].failure(), Some(FailureKind::Network));
    assert!(!widget.is_loading());
}
