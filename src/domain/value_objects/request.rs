use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Resource kind hinted by the platform for a subresource fetch, mirroring
/// the `destination` field of an intercepted request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceDestination {
    Document,
    Image,
    Style,
    Script,
    Font,
    Other,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Head => "HEAD",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One intercepted outgoing request as seen by the fetch proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub method: RequestMethod,
    pub url: Url,
    pub destination: ResourceDestination,
    pub is_navigation: bool,
}

impl PageRequest {
    pub fn new(
        method: RequestMethod,
        url: Url,
        destination: ResourceDestination,
        is_navigation: bool,
    ) -> Self {
        Self {
            method,
            url,
            destination,
            is_navigation,
        }
    }

    /// A plain GET subresource fetch.
    pub fn get(url: Url, destination: ResourceDestination) -> Self {
        Self::new(RequestMethod::Get, url, destination, false)
    }

    /// A top-level document load.
    pub fn navigation(url: Url) -> Self {
        Self::new(RequestMethod::Get, url, ResourceDestination::Document, true)
    }

    pub fn is_get(&self) -> bool {
        self.method == RequestMethod::Get
    }

    pub fn key(&self) -> RequestKey {
        RequestKey::from_parts(self.method, &self.url)
    }
}

/// Cache lookup key: method plus the normalized absolute URL. Fragments
/// never reach the network, so they are stripped before keying.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestKey(String);

impl RequestKey {
    pub fn from_parts(method: RequestMethod, url: &Url) -> Self {
        let mut normalized = url.clone();
        normalized.set_fragment(None);
        Self(format!("{method} {normalized}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RequestKey> for String {
    fn from(key: RequestKey) -> Self {
        key.0
    }
}

impl From<String> for RequestKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}
