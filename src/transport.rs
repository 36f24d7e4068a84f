//! HTTP transport and the send / dry-run dispatch seam

use std::future::Future;
use std::time::Duration;
use log::{debug, error, trace};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type: application/json";

// ===== Headers =====

/// Ordered header lines in `Name: value` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet
{   lines: Vec<String>
}

impl HeaderSet
{   /// Content type followed by a single bearer Authorization header
    pub fn with_bearer(token: &str) -> Self
    {   HeaderSet
        {   lines: vec![
              CONTENT_TYPE_HEADER.to_string()
            , format!("Authorization: Bearer {}", token)
            ]
        }
    }

    pub fn lines(&self) -> &[String]
    {   &self.lines
    }

    /// Split each line into a name/value pair
    pub fn to_header_map(&self) -> Result<HeaderMap, Error>
    {   let mut map = HeaderMap::new();
        for line in &self.lines
        {   let (name, value) = line.split_once(':')
              .ok_or_else(|| {
                Error::Transport(format!("Malformed header: {}", line))
              })?;
            let name = HeaderName::from_bytes(name.trim().as_bytes())
              .map_err(|e| Error::Transport(e.to_string()))?;
            let value = HeaderValue::from_str(value.trim())
              .map_err(|e| Error::Transport(e.to_string()))?;
            map.append(name, value);
        }
        Ok(map)
    }
}

// ===== Request =====

/// A fully built POST request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest
{   pub endpoint: String
  , pub headers: HeaderSet
  , pub body: String
}

impl PostRequest
{   /// Endpoint, each header and the body, one per line
    pub fn to_dry_run_string(&self) -> String
    {   let mut out = self.endpoint.clone();
        for header in self.headers.lines()
        {   out.push('\n');
            out.push_str(header);
        }
        out.push('\n');
        out.push_str(&self.body);
        out
    }
}

// ===== Transport =====

/// Sends one POST and returns the response body.
/// A single attempt; non-2xx statuses are errors.
pub trait Transport: Send + Sync
{   fn post(
      &self
    , request: &PostRequest
    , timeout: Duration
    ) -> impl Future<Output = Result<String, Error>> + Send;
}

/// reqwest-backed transport, one client reused across calls
#[derive(Debug, Clone)]
pub struct HttpTransport
{   http_client: reqwest::Client
}

impl HttpTransport
{   pub fn new() -> Self
    {   debug!("Creating HttpTransport");
        HttpTransport
        {   http_client: reqwest::Client::new()
        }
    }

    /// Use a preconfigured client (proxy, TLS roots, ...)
    pub fn with_client(http_client: reqwest::Client) -> Self
    {   HttpTransport
        {   http_client
        }
    }
}

impl Default for HttpTransport
{   fn default() -> Self
    {   HttpTransport::new()
    }
}

impl Transport for HttpTransport
{   async fn post(
      &self
    , request: &PostRequest
    , timeout: Duration
    ) -> Result<String, Error>
    {   let headers = request.headers.to_header_map()?;
        let response = self.http_client
          .post(&request.endpoint)
          .headers(headers)
          .timeout(timeout)
          .body(request.body.clone())
          .send()
          .await
          .and_then(|r| r.error_for_status())
          .map_err(|e| {
            error!("HTTP error: {}", e);
            Error::from(e)
          })?;

        trace!("AI Generate Text: response status: {}", response.status());

        let body = response.text().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          Error::from(e)
        })?;
        trace!("AI Generate Text: original response: {}", body);
        Ok(body)
    }
}

// ===== Dispatch =====

/// What the engine got back from the dispatch step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery
{   /// Raw response body from the API
    Response(String)
  , /// The request that would have been sent
    Serialized(String)
}

/// Either send the request or serialize it without any network I/O
pub enum Dispatch<'a, T>
{   Send(&'a T)
  , DryRun
}

impl<'a, T: Transport> Dispatch<'a, T>
{   pub fn select(transport: &'a T, dry_run: bool) -> Self
    {   if dry_run { Dispatch::DryRun } else { Dispatch::Send(transport) }
    }

    pub async fn dispatch(
      &self
    , request: &PostRequest
    , timeout: Duration
    ) -> Result<Delivery, Error>
    {   match self
        {   Dispatch::Send(transport) => {
              transport.post(request, timeout).await
                .map(Delivery::Response)
            }
          , Dispatch::DryRun => {
              debug!("Dry run, not sending request to {}", request.endpoint);
              Ok(Delivery::Serialized(request.to_dry_run_string()))
            }
        }
    }
}
