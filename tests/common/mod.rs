//! Shared test utilities: a local HTTP server serving one canned response.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use aaio::{AaioClient, AaioConfig};

/// A request as received by [`MockServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Decodes a form-encoded body into ordered pairs.
    pub fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

struct CannedResponse {
    status: u16,
    content_type: String,
    body: String,
}

/// Serves the same response to every request and records what it received.
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Starts a server answering `200` with a JSON body.
    pub async fn json(body: &str) -> Self {
        Self::start(200, "application/json", body).await
    }

    /// Starts a server answering with an arbitrary status and content type.
    pub async fn start(status: u16, content_type: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let addr = listener.local_addr().expect("no local address");

        let response = Arc::new(CannedResponse {
            status,
            content_type: content_type.to_string(),
            body: body.to_string(),
        });
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let requests = Arc::clone(&requests);
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let response = Arc::clone(&response);
                    let requests = Arc::clone(&requests);
                    tokio::spawn(async move {
                        let _ = handle_connection(stream, &response, &requests).await;
                    });
                }
            })
        };

        Self {
            base_url: format!("http://{addr}"),
            requests,
            handle,
        }
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("poisoned").clone()
    }

    /// Returns the single request received, panicking otherwise.
    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().expect("checked above")
    }

    /// Builds a client for this server with every credential set.
    pub fn client(&self) -> AaioClient {
        self.client_with(
            AaioConfig::new("test-api-key")
                .with_shop_id("shop-1")
                .with_secret_key("test-secret"),
        )
    }

    /// Builds a client for this server from `config`, overriding its base URL.
    pub fn client_with(&self, config: AaioConfig) -> AaioClient {
        AaioClient::new(config.with_base_url(&self.base_url)).expect("failed to build client")
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_connection(
    stream: TcpStream,
    response: &CannedResponse,
    requests: &Mutex<Vec<RecordedRequest>>,
) -> std::io::Result<()> {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let content_length = headers
        .iter()
        .find(|(name, _)| name == "content-length")
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(0);
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).await?;

    requests.lock().expect("poisoned").push(RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let reply = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.content_type,
        response.body.len(),
        response.body
    );
    write.write_all(reply.as_bytes()).await?;
    write.shutdown().await
}
