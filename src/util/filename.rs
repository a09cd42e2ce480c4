//! Filesystem-safe filenames for saved lyrics.

const KEEP: [char; 3] = [' ', '.', '_'];

/// Strip characters that are unsafe in filenames, keeping alphanumerics,
/// spaces, dots and underscores, and trim trailing whitespace.
#[must_use]
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || KEEP.contains(c))
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_path_separators_and_punctuation() {
        assert_eq!(sanitize("lyrics/andy*shauf?_the_party.json"), "lyricsandyshauf_the_party.json");
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(sanitize("lyrics_Beyoncé_Halo.txt"), "lyrics_Beyoncé_Halo.txt");
    }

    #[test]
    fn trims_trailing_whitespace() {
        assert_eq!(sanitize("song name  "), "song name");
    }
}
