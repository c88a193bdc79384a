use std::fmt;

use url::Url;

use super::TransportError;

/// Fixed logical path the chat hub serves its socket on.
pub const DEFAULT_PATH: &str = "/ws";

/// A validated `ws://` URL for the hub socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Derive the endpoint from a host (with optional port) and a path.
    /// A missing leading `/` on the path is added.
    pub fn new(host: &str, path: &str) -> Result<Self, TransportError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(TransportError::InvalidEndpoint("empty host".to_string()));
        }

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let raw = format!("ws://{host}{path}");
        let url = Url::parse(&raw)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{raw}: {e}")))?;

        // A host containing '/' or '@' parses, but not as the host we were given
        if url.host_str().is_none() || url.path() != path {
            return Err(TransportError::InvalidEndpoint(raw));
        }

        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
