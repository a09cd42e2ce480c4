use crate::Error;
use crate::auth::PublicFallback;
use crate::transport::request::Request;
use crate::types::{AnnotationId, SongId};
use serde_json::Value;

/// Target filter for a referents listing. The API accepts a song or a web
/// page, never both; a creator id may be combined with either.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferentsQuery {
    pub song_id: Option<SongId>,
    pub web_page_id: Option<u64>,
    pub created_by_id: Option<u64>,
}

impl ReferentsQuery {
    #[must_use]
    pub fn for_song(id: impl Into<SongId>) -> Self {
        Self {
            song_id: Some(id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_web_page(id: u64) -> Self {
        Self {
            web_page_id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn created_by(mut self, id: u64) -> Self {
        self.created_by_id = Some(id);
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if self.song_id.is_some() && self.web_page_id.is_some() {
            return Err(Error::InvalidConfig {
                message: "referents accept a song id or a web page id, not both".into(),
                source: None,
            });
        }
        if self.song_id.is_none() && self.web_page_id.is_none() && self.created_by_id.is_none() {
            return Err(Error::InvalidConfig {
                message: "referents need a song id, web page id, or creator id".into(),
                source: None,
            });
        }
        Ok(())
    }
}

fn referents_request(
    query: &ReferentsQuery,
    per_page: Option<u8>,
    page: Option<u32>,
    text_format: crate::types::TextFormat,
    public_api: bool,
) -> Request {
    let mut req = Request::get(["referents"])
        .root_for(public_api)
        .query_pair("text_format", text_format.as_str());
    if let Some(id) = query.song_id {
        req = req.query_pair("song_id", id.to_string());
    }
    if let Some(id) = query.web_page_id {
        req = req.query_pair("web_page_id", id.to_string());
    }
    if let Some(id) = query.created_by_id {
        req = req.query_pair("created_by_id", id.to_string());
    }
    if let Some(per_page) = per_page {
        req = req.query_pair("per_page", per_page.to_string());
    }
    if let Some(page) = page {
        req = req.query_pair("page", page.to_string());
    }
    req
}

/// Genius annotation APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct AnnotationsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl AnnotationsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl AnnotationsService {
    /// `GET /annotations/{id}` (public fallback supported)
    pub async fn get(&self, id: impl Into<AnnotationId>, public_api: bool) -> Result<Value, Error> {
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req = Request::get(["annotations".to_owned(), id.into().to_string()])
            .root_for(public_api)
            .query_pair("text_format", self.client.text_format().as_str());
        self.client.send_json(req).await
    }

    /// `GET /referents` (public fallback supported)
    pub async fn referents(
        &self,
        query: ReferentsQuery,
        per_page: Option<u8>,
        page: Option<u32>,
        public_api: bool,
    ) -> Result<Value, Error> {
        query.validate()?;
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req =
            referents_request(&query, per_page, page, self.client.text_format(), public_api);
        self.client.send_json(req).await
    }
}

/// Genius annotation APIs (blocking).
#[derive(Clone)]
#[cfg(feature = "blocking")]
pub struct BlockingAnnotationsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingAnnotationsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingAnnotationsService {
    /// `GET /annotations/{id}` (public fallback supported)
    pub fn get(&self, id: impl Into<AnnotationId>, public_api: bool) -> Result<Value, Error> {
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req = Request::get(["annotations".to_owned(), id.into().to_string()])
            .root_for(public_api)
            .query_pair("text_format", self.client.text_format().as_str());
        self.client.send_json(req)
    }

    /// `GET /referents` (public fallback supported)
    pub fn referents(
        &self,
        query: ReferentsQuery,
        per_page: Option<u8>,
        page: Option<u32>,
        public_api: bool,
    ) -> Result<Value, Error> {
        query.validate()?;
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req =
            referents_request(&query, per_page, page, self.client.text_format(), public_api);
        self.client.send_json(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referents_reject_song_and_web_page_together() {
        let query = ReferentsQuery::for_song(378195u64);
        assert!(query.validate().is_ok());

        let both = ReferentsQuery {
            web_page_id: Some(10347),
            ..ReferentsQuery::for_song(378195u64)
        };
        assert!(matches!(
            both.validate().unwrap_err(),
            Error::InvalidConfig { .. }
        ));
    }

    #[test]
    fn referents_need_at_least_one_filter() {
        assert!(matches!(
            ReferentsQuery::default().validate().unwrap_err(),
            Error::InvalidConfig { .. }
        ));
        assert!(ReferentsQuery::default().created_by(42).validate().is_ok());
    }
}
