use super::ApiRoot;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
#[cfg(feature = "unstable-raw")]
use std::borrow::Cow;
use std::time::Duration;

#[cfg(feature = "unstable-raw")]
use http::HeaderName;

#[derive(Clone, Debug)]
pub struct RequestBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<HeaderValue>,
}

impl RequestBody {
    #[must_use]
    #[cfg(feature = "unstable-raw")]
    pub fn bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: None,
        }
    }

    #[must_use]
    pub fn bytes_with_content_type(bytes: Vec<u8>, content_type: HeaderValue) -> Self {
        Self {
            bytes,
            content_type: Some(content_type),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Request {
    pub method: Method,
    pub root: ApiRoot,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
    pub timeout_override: Option<Duration>,
}

impl Request {
    #[must_use]
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            root: ApiRoot::Developer,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            form: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            timeout_override: None,
        }
    }

    #[must_use]
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    /// The typed services are read-only; write endpoints (annotations,
    /// account management) go through `send_api` with a request built here.
    #[must_use]
    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    /// Target the public (unauthenticated) API root.
    #[must_use]
    pub fn public(mut self) -> Self {
        self.root = ApiRoot::Public;
        self
    }

    /// Select the root from a caller-supplied `public_api` flag.
    #[must_use]
    pub fn root_for(mut self, public_api: bool) -> Self {
        self.root = if public_api {
            ApiRoot::Public
        } else {
            ApiRoot::Developer
        };
        self
    }

    #[must_use]
    pub fn query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    #[cfg(feature = "unstable-raw")]
    pub fn form_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body = None;
        self.form
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    #[cfg(feature = "unstable-raw")]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    #[cfg(feature = "unstable-raw")]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.form.clear();
        self.body = Some(body);
        self
    }

    #[must_use]
    #[cfg(feature = "unstable-raw")]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_override = Some(timeout);
        self
    }
}

#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    #[must_use]
    #[cfg(feature = "unstable-raw")]
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Outcome of a successful API call.
///
/// The Genius API wraps payloads in `{"response": {...}}` on 200 and sends an
/// empty body on 204; the two cases get distinct variants instead of sharing
/// one return slot.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiContent {
    /// 200 with the envelope already unwrapped (or the bare body when no
    /// `response` key was present).
    Payload(Value),
    /// 204, no body.
    NoContent,
}

impl ApiContent {
    #[must_use]
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }

    /// The unwrapped payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Payload(value) => Some(value),
            Self::NoContent => None,
        }
    }

    #[must_use]
    pub fn into_payload(self) -> Option<Value> {
        match self {
            Self::Payload(value) => Some(value),
            Self::NoContent => None,
        }
    }
}
