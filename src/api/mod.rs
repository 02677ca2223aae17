//! Blocking client for the local generate endpoint.
//!
//! One request per submitted message, single attempt, whole-request
//! timeout. The caller always gets displayable text back: any transport or
//! payload failure is converted into a human-readable fallback line
//! instead of an error.

pub mod payload;

use std::error::Error;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::core::constants::REQUEST_TIMEOUT;
use self::payload::{escape_json, extract_response};

pub struct CompletionClient {
    http: Client,
    endpoint: String,
    model: String,
}

impl CompletionClient {
    pub fn new(base_url: &str, model: &str) -> Result<Self, Box<dyn Error>> {
        Self::with_timeout(base_url, model, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error>> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/generate", base_url.trim_end_matches('/')),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` to the model and return the reply text. Blocks the
    /// calling thread for up to the full request timeout. Never fails:
    /// transport errors, bad statuses, and unreadable replies all come
    /// back as fallback text for the transcript.
    pub fn complete(&self, prompt: &str) -> String {
        let body = format!(
            r#"{{"model":"{}","prompt":"{}","stream":false}}"#,
            escape_json(&self.model),
            escape_json(prompt)
        );
        tracing::debug!(endpoint = %self.endpoint, bytes = body.len(), "sending completion request");

        let sent = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send();

        match sent {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    tracing::warn!(%status, "model server returned an error status");
                    return format!("Error: model server returned HTTP {}.", status.as_u16());
                }
                match response.text() {
                    Ok(text) => match extract_response(&text) {
                        Some(reply) => {
                            tracing::debug!(bytes = reply.len(), "completion received");
                            reply
                        }
                        None => {
                            tracing::warn!("reply carried no response field");
                            "Error: malformed reply from the model server.".to_string()
                        }
                    },
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to read reply body");
                        "Error: could not read the model server reply.".to_string()
                    }
                }
            }
            Err(err) if err.is_timeout() => {
                tracing::warn!("completion request timed out");
                "Error: request to the model server timed out.".to_string()
            }
            Err(err) if err.is_connect() => {
                tracing::warn!(error = %err, "could not connect to the model server");
                "Error: could not connect to the model server.".to_string()
            }
            Err(err) => {
                tracing::warn!(error = %err, "completion request failed");
                "Error: request to the model server failed.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    /// Read a full HTTP request (headers plus content-length body).
    fn read_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let text = String::from_utf8_lossy(&data).into_owned();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    return text;
                }
            }
            match stream.read(&mut buf) {
                Ok(0) => return String::from_utf8_lossy(&data).into_owned(),
                Ok(n) => data.extend_from_slice(&buf[..n]),
                Err(_) => return String::from_utf8_lossy(&data).into_owned(),
            }
        }
    }

    fn respond(stream: &mut TcpStream, status_line: &str, body: &str) {
        let reply = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(reply.as_bytes()).unwrap();
    }

    /// One-shot server answering the next request with a fixed response.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                read_request(&mut stream);
                respond(&mut stream, status_line, body);
            }
        });
        format!("http://{addr}")
    }

    #[test]
    fn returns_the_response_field_on_success() {
        let base = serve_once("200 OK", r#"{"model":"m","response":"hi there","done":true}"#);
        let client = CompletionClient::new(&base, "m").unwrap();
        assert_eq!(client.complete("hello"), "hi there");
    }

    #[test]
    fn round_trips_escaped_text_through_an_echo_server() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let body_start = request.find("\r\n\r\n").unwrap() + 4;
            // Echo the still-escaped prompt back in the response field.
            let prompt = payload::extract_field(&request[body_start..], "prompt")
                .expect("prompt field in request body");
            let body = format!(r#"{{"model":"m","response":"{prompt}","done":true}}"#);
            respond(&mut stream, "200 OK", &body);
        });

        let client = CompletionClient::new(&format!("http://{addr}"), "m").unwrap();
        let reply = client.complete("He said \"hi\"\n");
        handle.join().unwrap();
        // Escaped quotes stay escaped on the way out; nothing from the
        // surrounding fields leaks into the reply.
        assert_eq!(reply, "He said \\\"hi\\\"\\n");
    }

    #[test]
    fn connection_refused_becomes_fallback_text() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CompletionClient::new(&format!("http://{addr}"), "m").unwrap();
        let reply = client.complete("hello");
        assert!(!reply.is_empty());
        assert!(reply.starts_with("Error:"));
        assert!(reply.chars().all(|c| !c.is_control()));
    }

    #[test]
    fn stalled_server_times_out_into_fallback_text() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            if let Ok((_stream, _)) = listener.accept() {
                thread::sleep(Duration::from_millis(800));
            }
        });

        let client = CompletionClient::with_timeout(
            &format!("http://{addr}"),
            "m",
            Duration::from_millis(100),
        )
        .unwrap();
        let reply = client.complete("hello");
        handle.join().unwrap();
        assert!(reply.contains("timed out"), "got: {reply}");
    }

    #[test]
    fn error_status_names_the_code() {
        let base = serve_once("500 Internal Server Error", "");
        let client = CompletionClient::new(&base, "m").unwrap();
        let reply = client.complete("hello");
        assert!(reply.contains("HTTP 500"), "got: {reply}");
    }

    #[test]
    fn body_without_response_field_is_malformed() {
        let base = serve_once("200 OK", r#"{"done":true}"#);
        let client = CompletionClient::new(&base, "m").unwrap();
        let reply = client.complete("hello");
        assert!(reply.contains("malformed"), "got: {reply}");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = CompletionClient::new("http://localhost:11434/", "m").unwrap();
        assert_eq!(client.endpoint, "http://localhost:11434/api/generate");
    }
}
