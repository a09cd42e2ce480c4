use crate::Error;
use crate::auth::PublicFallback;
use crate::transport::request::Request;
use serde_json::Value;

/// Genius search APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct SearchService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl SearchService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl SearchService {
    /// `GET /search?q=` (public fallback supported)
    pub async fn songs(&self, query: &str, public_api: bool) -> Result<Value, Error> {
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req = Request::get(["search"])
            .root_for(public_api)
            .query_pair("q", query);
        self.client.send_json(req).await
    }

    /// `GET /search/multi?q=` on the public root; searches every document
    /// type (songs, artists, albums, lyric snippets) at once. Needs no token.
    pub async fn multi(&self, query: &str) -> Result<Value, Error> {
        let req = Request::get(["search", "multi"])
            .public()
            .query_pair("q", query);
        self.client.send_json(req).await
    }
}

/// Genius search APIs (blocking).
#[derive(Clone)]
#[cfg(feature = "blocking")]
pub struct BlockingSearchService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingSearchService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingSearchService {
    /// `GET /search?q=` (public fallback supported)
    pub fn songs(&self, query: &str, public_api: bool) -> Result<Value, Error> {
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req = Request::get(["search"])
            .root_for(public_api)
            .query_pair("q", query);
        self.client.send_json(req)
    }

    /// `GET /search/multi?q=` on the public root; needs no token.
    pub fn multi(&self, query: &str) -> Result<Value, Error> {
        let req = Request::get(["search", "multi"])
            .public()
            .query_pair("q", query);
        self.client.send_json(req)
    }
}
