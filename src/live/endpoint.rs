//! Push endpoint resolution
//!
//! Precedence: explicit URL from the caller, then the configured URL, then a
//! same-origin URL built from the page origin and the endpoint path. The
//! same-origin URL uses `wss` exactly when the origin is `https`.

use url::Url;

use super::error::{LiveError, LiveResult};

/// `true` when a configured value actually carries a URL.
///
/// Build tooling commonly leaves unset variables as an empty string or the
/// literal `undefined`.
pub fn is_configured(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != "undefined"
}

/// Where the dashboard should connect, re-resolved on every (re)connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    explicit: Option<String>,
    configured: Option<String>,
    origin: String,
    path: String,
}

impl Endpoint {
    /// Same-origin endpoint on `origin` at `path`
    pub fn new(origin: &str, path: &str) -> Self {
        Self {
            explicit: None,
            configured: None,
            origin: origin.to_string(),
            path: path.to_string(),
        }
    }

    /// URL passed by the caller; takes precedence over everything
    pub fn explicit(mut self, url: Option<String>) -> Self {
        self.explicit = url.filter(|u| is_configured(u));
        self
    }

    /// URL from the environment or config file
    pub fn configured(mut self, url: Option<String>) -> Self {
        self.configured = url.filter(|u| is_configured(u));
        self
    }

    /// Resolve to a `ws://` or `wss://` URL
    pub fn resolve(&self) -> LiveResult<Url> {
        if let Some(url) = self.explicit.as_deref().or(self.configured.as_deref()) {
            return socket_url(url);
        }
        self.same_origin()
    }

    fn same_origin(&self) -> LiveResult<Url> {
        let origin = parse(&self.origin)?;
        let scheme = if origin.scheme() == "https" { "wss" } else { "ws" };
        let host = origin.host_str().ok_or_else(|| LiveError::InvalidUrl {
            url: self.origin.clone(),
            error: "origin has no host".to_string(),
        })?;
        let authority = match origin.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        parse(&format!("{}://{}{}", scheme, authority, path))
    }
}

fn parse(raw: &str) -> LiveResult<Url> {
    Url::parse(raw.trim()).map_err(|e| LiveError::InvalidUrl {
        url: raw.to_string(),
        error: e.to_string(),
    })
}

/// Accept ws(s) URLs as-is and upgrade http(s) ones to their socket scheme
fn socket_url(raw: &str) -> LiveResult<Url> {
    let mut url = parse(raw)?;
    let upgraded = match url.scheme() {
        "ws" | "wss" => return Ok(url),
        "http" => "ws",
        "https" => "wss",
        other => return Err(LiveError::UnsupportedScheme(other.to_string())),
    };
    url.set_scheme(upgraded)
        .map_err(|_| LiveError::UnsupportedScheme(url.scheme().to_string()))?;
    Ok(url)
}
