use super::common::ArtistId;
use serde::{Deserialize, Serialize};

/// An artist from the Genius database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    #[serde(default)]
    pub api_path: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub header_image_url: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_meme_verified: bool,
    /// Community IQ; absent for most artists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iq: Option<i64>,
}
