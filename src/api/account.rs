use crate::Error;
use crate::auth::PublicFallback;
use crate::transport::request::Request;
use serde_json::Value;

/// Genius account APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct AccountService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl AccountService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl AccountService {
    /// `GET /account` (token required, no public fallback)
    pub async fn me(&self) -> Result<Value, Error> {
        self.client.require_token(PublicFallback::Unsupported, false)?;
        let req = Request::get(["account"])
            .query_pair("text_format", self.client.text_format().as_str());
        self.client.send_json(req).await
    }
}

/// Genius account APIs (blocking).
#[derive(Clone)]
#[cfg(feature = "blocking")]
pub struct BlockingAccountService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingAccountService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingAccountService {
    /// `GET /account` (token required, no public fallback)
    pub fn me(&self) -> Result<Value, Error> {
        self.client.require_token(PublicFallback::Unsupported, false)?;
        let req = Request::get(["account"])
            .query_pair("text_format", self.client.text_format().as_str());
        self.client.send_json(req)
    }
}
