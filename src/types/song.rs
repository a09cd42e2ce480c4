use super::{artist::Artist, common::SongId};
use crate::{Error, util::filename};
use serde::{Deserialize, Serialize};
use std::{fmt, fs, io, path::Path};

/// Engagement statistics attached to a song.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Stats {
    #[serde(default)]
    pub unreviewed_annotations: u64,
    #[serde(default)]
    pub hot: bool,
    /// Only present once a song passes the pageview threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pageviews: Option<u64>,
}

/// A song from the Genius database, optionally carrying fetched lyrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Song {
    pub id: SongId,
    pub title: String,
    #[serde(default)]
    pub full_title: String,
    #[serde(default)]
    pub title_with_featured: String,
    pub primary_artist: Artist,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub api_path: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub header_image_thumbnail_url: String,
    #[serde(default)]
    pub header_image_url: String,
    #[serde(default)]
    pub song_art_image_thumbnail_url: String,
    #[serde(default)]
    pub song_art_image_url: String,
    #[serde(default)]
    pub annotation_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics_owner_id: Option<u64>,
    #[serde(default)]
    pub lyrics_state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pyongs_count: Option<u64>,
    /// Not part of the API payload; attached by the caller.
    #[serde(default)]
    pub lyrics: String,
}

/// Output format for [`Song::save_lyrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LyricsFormat {
    /// Lyrics alongside the song metadata.
    #[default]
    Json,
    /// Lyrics only.
    Text,
}

impl LyricsFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

impl Song {
    /// Primary artist's name.
    #[must_use]
    pub fn artist(&self) -> &str {
        &self.primary_artist.name
    }

    /// Song and metadata as a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|source| Error::InvalidConfig {
            message: "failed to serialize song".into(),
            source: Some(Box::new(source)),
        })
    }

    /// Lyrics as plain text.
    #[must_use]
    pub fn to_text(&self) -> &str {
        &self.lyrics
    }

    /// Default filename for saved lyrics: `lyrics_<artist>_<title>.<ext>`,
    /// lowercased, spaces removed, sanitized for the filesystem.
    #[must_use]
    pub fn default_filename(&self, format: LyricsFormat) -> String {
        let name = format!(
            "lyrics_{}_{}.{}",
            self.artist().replace(' ', ""),
            self.title.replace(' ', ""),
            format.extension()
        )
        .to_lowercase();
        filename::sanitize(&name)
    }

    /// Save lyrics (and, for JSON, metadata) under `dir` using the default
    /// filename. Returns the written path.
    ///
    /// Refuses to clobber an existing file unless `overwrite` is set; the
    /// caller decides whether to prompt.
    pub fn save_lyrics(
        &self,
        dir: impl AsRef<Path>,
        format: LyricsFormat,
        overwrite: bool,
    ) -> Result<std::path::PathBuf, Error> {
        let path = dir.as_ref().join(self.default_filename(format));
        self.save_lyrics_to(&path, format, overwrite)?;
        Ok(path)
    }

    /// Save lyrics to an explicit path.
    pub fn save_lyrics_to(
        &self,
        path: impl AsRef<Path>,
        format: LyricsFormat,
        overwrite: bool,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        if !overwrite && path.exists() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }

        let contents = match format {
            LyricsFormat::Json => self.to_json()?,
            LyricsFormat::Text => self.lyrics.clone(),
        };
        fs::write(path, contents)?;
        Ok(())
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lyrics: String = self.lyrics.chars().take(100).collect();
        if self.lyrics.chars().count() > 100 {
            lyrics.push_str("...");
        }
        write!(
            f,
            "\"{}\" by {}:\n    {}",
            self.title,
            self.artist(),
            lyrics.replace('\n', "\n    ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Song {
        serde_json::from_value(json!({
            "id": 378195,
            "title": "The Magician",
            "full_title": "The Magician by Andy Shauf",
            "primary_artist": {"id": 2358, "name": "Andy Shauf"},
            "stats": {"unreviewed_annotations": 0, "hot": false, "pageviews": 12345},
            "annotation_count": 4,
            "lyrics_state": "complete"
        }))
        .unwrap()
    }

    #[test]
    fn artist_is_primary_artist_name() {
        assert_eq!(sample().artist(), "Andy Shauf");
    }

    #[test]
    fn default_filename_is_lowercased_and_sanitized() {
        let song = sample();
        assert_eq!(
            song.default_filename(LyricsFormat::Json),
            "lyrics_andyshauf_themagician.json"
        );
        assert_eq!(
            song.default_filename(LyricsFormat::Text),
            "lyrics_andyshauf_themagician.txt"
        );
    }

    #[test]
    fn display_truncates_long_lyrics() {
        let mut song = sample();
        song.lyrics = "la ".repeat(100);
        let shown = song.to_string();
        assert!(shown.starts_with("\"The Magician\" by Andy Shauf:"));
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn save_refuses_to_clobber_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut song = sample();
        song.lyrics = "first".into();

        let path = song.save_lyrics(dir.path(), LyricsFormat::Text, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        song.lyrics = "second".into();
        let err = song
            .save_lyrics(dir.path(), LyricsFormat::Text, false)
            .unwrap_err();
        assert!(matches!(err, Error::Io(ref io) if io.kind() == io::ErrorKind::AlreadyExists));

        song.save_lyrics(dir.path(), LyricsFormat::Text, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn json_round_trips_lyrics_field() {
        let mut song = sample();
        song.lyrics = "Oh oh".into();
        let text = song.to_json().unwrap();
        let parsed: Song = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.lyrics, "Oh oh");
        assert_eq!(parsed.id, song.id);
    }
}
