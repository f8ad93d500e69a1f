use std::future::Future;

use log::{debug, error};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::{error::SubmitError, model::Transcript};

/// Status and undecoded body of a parse response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait ParseProvider {
    fn display_name(&self) -> &str;

    /// Sends one transcript to the parser. Only transport failures are
    /// errors here; non-2xx statuses come back as a `RawResponse`.
    fn parse(
        &self,
        transcript: &Transcript,
    ) -> impl Future<Output = Result<RawResponse, SubmitError>> + Send;
}

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    transcript: &'a str,
}

pub struct HttpParseProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpParseProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl ParseProvider for HttpParseProvider {
    fn display_name(&self) -> &str {
        &self.url
    }

    fn parse(
        &self,
        transcript: &Transcript,
    ) -> impl Future<Output = Result<RawResponse, SubmitError>> + Send {
        let request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&ParseRequest {
                transcript: transcript.as_str(),
            });
        let url = self.url.clone();

        async move {
            debug!("Posting transcript to {}", url);

            let response = request.send().await.map_err(|e| {
                error!("Failed to send parse request: {}", e);
                SubmitError::Network(e.to_string())
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| SubmitError::Network(e.to_string()))?;

            debug!("Parse response {}: {}", status, body);
            Ok(RawResponse { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    struct CapturedRequest {
        head: String,
        body: String,
    }

    /// Serves exactly one request with the given status and body.
    fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
                head.push_str(&line);
            }

            let mut body_bytes = vec![0u8; content_length];
            reader.read_exact(&mut body_bytes).unwrap();

            let mut stream = stream;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();

            CapturedRequest {
                head,
                body: String::from_utf8(body_bytes).unwrap(),
            }
        });

        (format!("http://{}/api/parse", addr), handle)
    }

    #[tokio::test]
    async fn posts_json_transcript() {
        let (url, handle) = serve_once("200 OK", r#"{"raw_transcript":"hello"}"#);
        let provider = HttpParseProvider::new(url);
        let transcript = Transcript::parse("  hello  ").unwrap();

        let response = provider.parse(&transcript).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"raw_transcript":"hello"}"#);

        let captured = handle.join().unwrap();
        assert!(captured.head.starts_with("POST /api/parse HTTP/1.1"));
        assert!(captured
            .head
            .to_ascii_lowercase()
            .contains("content-type: application/json"));
        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(body, serde_json::json!({ "transcript": "hello" }));
    }

    #[tokio::test]
    async fn non_success_status_is_not_a_transport_error() {
        let (url, handle) = serve_once("422 Unprocessable Entity", r#"{"error":"bad format"}"#);
        let provider = HttpParseProvider::new(url);
        let transcript = Transcript::parse("x").unwrap();

        let response = provider.parse(&transcript).await.unwrap();
        assert_eq!(response.status, 422);
        assert!(!response.is_success());
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let provider = HttpParseProvider::new(format!("http://127.0.0.1:{}/api/parse", port));
        let transcript = Transcript::parse("x").unwrap();

        let err = provider.parse(&transcript).await.unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
    }
}
