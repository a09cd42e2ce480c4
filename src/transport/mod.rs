//! Transport layer: request/response envelopes shared by every HTTP backend.

use http::{HeaderMap, HeaderValue, Method, StatusCode};
use std::time::Duration;
use url::Url;

#[cfg(feature = "async")]
pub mod async_transport;
#[cfg(feature = "blocking")]
pub mod blocking_transport;

pub mod middleware;
pub mod request;

#[cfg(feature = "metrics")]
pub(crate) mod metrics;

pub use request::ApiContent;

/// Which API root a request targets.
///
/// The developer root carries the bearer `Authorization` header; the public
/// root must never carry it (the public endpoint misbehaves when one is
/// present). Header assembly is per-request, so no restoration is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApiRoot {
    #[default]
    Developer,
    Public,
}

#[derive(Clone, Debug)]
pub struct TransportBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<HeaderValue>,
}

#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub method: Method,
    /// Which root the client resolved `url` against. Transports ignore it;
    /// middleware (hooks) can use it to tell public calls from developer ones.
    pub root: ApiRoot,
    pub url: Url,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
    pub body: Option<TransportBody>,
    pub timeout: Duration,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseMeta {
    /// Extra wall-clock delay added by the throttle layer.
    pub throttled: Option<Duration>,
}

#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    pub meta: ResponseMeta,
}
