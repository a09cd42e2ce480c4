use crate::Error;
use crate::auth::PublicFallback;
use crate::transport::request::Request;
use crate::types::{Song, SongId};
use serde::Deserialize;

#[derive(Deserialize)]
struct SongEnvelope {
    song: Song,
}

/// Genius song APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct SongsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl SongsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl SongsService {
    /// `GET /songs/{id}` (public fallback supported)
    pub async fn get(&self, id: impl Into<SongId>, public_api: bool) -> Result<Song, Error> {
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req = Request::get(["songs".to_owned(), id.into().to_string()])
            .root_for(public_api)
            .query_pair("text_format", self.client.text_format().as_str());
        let envelope: SongEnvelope = self.client.send_json(req).await?;
        Ok(envelope.song)
    }
}

/// Genius song APIs (blocking).
#[derive(Clone)]
#[cfg(feature = "blocking")]
pub struct BlockingSongsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingSongsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingSongsService {
    /// `GET /songs/{id}` (public fallback supported)
    pub fn get(&self, id: impl Into<SongId>, public_api: bool) -> Result<Song, Error> {
        self.client.require_token(PublicFallback::Supported, public_api)?;
        let req = Request::get(["songs".to_owned(), id.into().to_string()])
            .root_for(public_api)
            .query_pair("text_format", self.client.text_format().as_str());
        let envelope: SongEnvelope = self.client.send_json(req)?;
        Ok(envelope.song)
    }
}
