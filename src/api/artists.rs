use crate::Error;
use crate::auth::PublicFallback;
use crate::transport::request::Request;
use crate::types::{Artist, ArtistId, SongSort};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct ArtistEnvelope {
    artist: Artist,
}

fn songs_request(
    id: ArtistId,
    per_page: Option<u8>,
    page: Option<u32>,
    sort: SongSort,
    public_api: bool,
) -> Request {
    let mut req = Request::get(["artists".to_owned(), id.to_string(), "songs".to_owned()])
        .root_for(public_api)
        .query_pair("sort", sort.as_str());
    if let Some(per_page) = per_page {
        req = req.query_pair("per_page", per_page.to_string());
    }
    if let Some(page) = page {
        req = req.query_pair("page", page.to_string());
    }
    req
}

/// Genius artist APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct ArtistsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl ArtistsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl ArtistsService {
    /// `GET /artists/{id}` (public fallback supported)
    pub async fn get(&self, id: impl Into<ArtistId>, public_api: bool) -> Result<Artist, Error> {
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req = Request::get(["artists".to_owned(), id.into().to_string()])
            .root_for(public_api)
            .query_pair("text_format", self.client.text_format().as_str());
        let envelope: ArtistEnvelope = self.client.send_json(req).await?;
        Ok(envelope.artist)
    }

    /// `GET /artists/{id}/songs` (public fallback supported)
    pub async fn songs(
        &self,
        id: impl Into<ArtistId>,
        per_page: Option<u8>,
        page: Option<u32>,
        sort: SongSort,
        public_api: bool,
    ) -> Result<Value, Error> {
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req = songs_request(id.into(), per_page, page, sort, public_api);
        self.client.send_json(req).await
    }
}

/// Genius artist APIs (blocking).
#[derive(Clone)]
#[cfg(feature = "blocking")]
pub struct BlockingArtistsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingArtistsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingArtistsService {
    /// `GET /artists/{id}` (public fallback supported)
    pub fn get(&self, id: impl Into<ArtistId>, public_api: bool) -> Result<Artist, Error> {
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req = Request::get(["artists".to_owned(), id.into().to_string()])
            .root_for(public_api)
            .query_pair("text_format", self.client.text_format().as_str());
        let envelope: ArtistEnvelope = self.client.send_json(req)?;
        Ok(envelope.artist)
    }

    /// `GET /artists/{id}/songs` (public fallback supported)
    pub fn songs(
        &self,
        id: impl Into<ArtistId>,
        per_page: Option<u8>,
        page: Option<u32>,
        sort: SongSort,
        public_api: bool,
    ) -> Result<Value, Error> {
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req = songs_request(id.into(), per_page, page, sort, public_api);
        self.client.send_json(req)
    }
}
