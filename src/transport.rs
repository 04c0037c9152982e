//! HTTPS transport and response envelope handling.
//!
//! Every call is a single request/response round trip. The underlying
//! client keeps no idle connections, so the connection opened for a call
//! is released once its body has been read.

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::params::Params;
use crate::{AaioError, Result};

/// Value of `type` on a successful response.
const SUCCESS: &str = "success";

/// Issues requests against the aaio API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport using the given TLS configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Tls`] if the HTTP client cannot be built.
    pub fn new(tls_config: rustls::ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .use_preconfigured_tls(tls_config)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| AaioError::Tls(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Sends one request and returns the decoded success payload.
    ///
    /// `params` are sent as a form body for `POST` and as the query string
    /// otherwise.
    ///
    /// # Errors
    ///
    /// - [`AaioError::Transport`] if the request or body read fails
    /// - [`AaioError::Parse`] if the body is not a JSON object served as JSON
    /// - [`AaioError::Remote`] if the server reports a failure
    /// - [`AaioError::Validation`] if the `type` discriminator is missing
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        params: Option<&Params>,
        headers: HeaderMap,
    ) -> Result<Map<String, Value>> {
        debug!(%method, path = url.path(), "sending request");

        let mut builder = self.client.request(method.clone(), url).headers(headers);
        if let Some(params) = params {
            builder = if method == Method::POST {
                builder.form(params.as_slice())
            } else {
                builder.query(params.as_slice())
            };
        }

        let response = builder.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;

        debug!(%status, bytes = body.len(), "received response");
        decode_envelope(status, content_type.as_deref(), &body)
    }
}

/// Parses a response body and checks its `type` discriminator.
///
/// The HTTP status is only used for error context: aaio reports failures
/// in the body, often alongside a 4xx status.
///
/// # Errors
///
/// See [`HttpTransport::request`].
pub fn decode_envelope(
    status: StatusCode,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Map<String, Value>> {
    if !is_json(content_type) {
        return Err(AaioError::Parse(format!(
            "expected application/json, got {} (HTTP {status})",
            content_type.unwrap_or("no content type")
        )));
    }

    let payload = match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(AaioError::Parse(format!(
                "expected a JSON object, got {} (HTTP {status})",
                kind(&other)
            )));
        }
        Err(e) => {
            return Err(AaioError::Parse(format!(
                "invalid JSON body (HTTP {status}): {e}"
            )));
        }
    };

    match payload.get("type") {
        Some(Value::String(tpe)) if tpe == SUCCESS => Ok(payload),
        Some(_) => {
            let message = match payload.get("message") {
                Some(Value::String(message)) => message.clone(),
                Some(Value::Null) | None => format!("request failed with HTTP {status}"),
                Some(other) => other.to_string(),
            };
            warn!(%status, %message, "aaio reported an error");
            Err(AaioError::Remote { message })
        }
        None => Err(AaioError::Validation(
            "response is missing the `type` field".to_string(),
        )),
    }
}

/// Returns `true` for `application/json`, ignoring parameters like `charset`.
fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
