use crate::Error;
use crate::transport::request::Request;
use serde_json::Value;

/// Genius web page APIs. Public-root only; no token involved.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct WebPagesService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl WebPagesService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl WebPagesService {
    /// `GET /web_pages/lookup?raw_annotatable_url=`
    pub async fn lookup(&self, raw_annotatable_url: &str) -> Result<Value, Error> {
        let req = Request::get(["web_pages", "lookup"])
            .public()
            .query_pair("raw_annotatable_url", raw_annotatable_url);
        self.client.send_json(req).await
    }
}

/// Genius web page APIs (blocking). Public-root only; no token involved.
#[derive(Clone)]
#[cfg(feature = "blocking")]
pub struct BlockingWebPagesService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingWebPagesService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingWebPagesService {
    /// `GET /web_pages/lookup?raw_annotatable_url=`
    pub fn lookup(&self, raw_annotatable_url: &str) -> Result<Value, Error> {
        let req = Request::get(["web_pages", "lookup"])
            .public()
            .query_pair("raw_annotatable_url", raw_annotatable_url);
        self.client.send_json(req)
    }
}
