use crate::{Auth, BodySnippetConfig};
use http::HeaderMap;
use std::time::{Duration, SystemTime};

/// Replace every configured secret with `<redacted>`. Covers both the raw
/// token and the `Bearer <token>` header form, since replacement works on any
/// occurrence of the token bytes.
pub(crate) fn redact_text(mut text: String, auth: Option<&Auth>) -> String {
    let Some(auth) = auth else {
        return text;
    };

    for secret in auth.secrets() {
        if !secret.is_empty() {
            text = text.replace(secret, "<redacted>");
        }
    }
    text
}

fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes.min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

pub(crate) fn request_id(headers: &HeaderMap) -> Option<Box<str>> {
    for name in ["x-request-id", "x-correlation-id"] {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string().into_boxed_str());
            }
        }
    }
    None
}

/// Extract the human-readable description from a Genius error body.
///
/// The developer API nests it under `meta.message`; OAuth-style failures use a
/// top-level `error_description`. Unparsable bodies yield `None`.
pub(crate) fn extract_message(body: &[u8]) -> Option<Box<str>> {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return None;
    };

    let message = value
        .get("meta")
        .and_then(|meta| meta.get("message"))
        .and_then(|v| v.as_str())
        .or_else(|| value.get("error_description").and_then(|v| v.as_str()))?;

    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    Some(message.to_string().into_boxed_str())
}

pub(crate) fn body_snippet(
    body: &[u8],
    config: BodySnippetConfig,
    auth: Option<&Auth>,
) -> Option<Box<str>> {
    if !config.enabled {
        return None;
    }

    let body = String::from_utf8_lossy(body);
    let snippet = truncate_utf8(&body, config.max_bytes).to_string();
    Some(redact_text(snippet, auth).into_boxed_str())
}

/// Parse a `Retry-After` header (seconds or HTTP-date) into a delay.
///
/// The SDK never retries; the value is surfaced on `Error::RateLimited` for
/// callers that do.
pub(crate) fn parse_retry_after(headers: &HeaderMap, now: SystemTime) -> Option<Duration> {
    let value = headers.get(http::header::RETRY_AFTER)?;
    let text = value.to_str().ok()?.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(secs) = text.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let at = httpdate::parse_http_date(text).ok()?;
    let delay = at.duration_since(now).unwrap_or(Duration::ZERO);
    Some(delay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use std::time::UNIX_EPOCH;

    #[test]
    fn extract_message_prefers_meta_message() {
        let body = br#"{"meta": {"status": 403, "message": "invalid token"}, "error_description": "other"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("invalid token"));
    }

    #[test]
    fn extract_message_falls_back_to_error_description() {
        let body = br#"{"error": "invalid_grant", "error_description": "token expired"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("token expired"));
    }

    #[test]
    fn extract_message_tolerates_missing_fields_and_garbage() {
        assert!(extract_message(br#"{"meta": {"status": 500}}"#).is_none());
        assert!(extract_message(b"<html>gateway timeout</html>").is_none());
        assert!(extract_message(b"").is_none());
    }

    #[test]
    fn redact_text_masks_token_in_any_position() {
        let auth = crate::Auth::bearer("sekrit123");
        let text = "Authorization: Bearer sekrit123; token=sekrit123".to_string();
        let redacted = redact_text(text, Some(&auth));
        assert!(!redacted.contains("sekrit123"));
        assert_eq!(
            redacted,
            "Authorization: Bearer <redacted>; token=<redacted>"
        );
    }

    #[test]
    fn body_snippet_truncates_on_char_boundaries_and_redacts() {
        let auth = crate::Auth::bearer("sekrit123");
        let body = "héllo sekrit123".as_bytes();

        let snippet = body_snippet(body, BodySnippetConfig::default(), Some(&auth)).unwrap();
        assert_eq!(&*snippet, "héllo <redacted>");

        // 'é' is two bytes; a 2-byte budget must not split it.
        let config = BodySnippetConfig {
            enabled: true,
            max_bytes: 2,
        };
        let snippet = body_snippet(body, config, None).unwrap();
        assert_eq!(&*snippet, "h");

        let disabled = BodySnippetConfig {
            enabled: false,
            max_bytes: 4096,
        };
        assert!(body_snippet(body, disabled, None).is_none());
    }

    #[test]
    fn retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::RETRY_AFTER, HeaderValue::from_static("7"));
        let delay = parse_retry_after(&headers, UNIX_EPOCH).unwrap();
        assert_eq!(delay, Duration::from_secs(7));
    }

    #[test]
    fn retry_after_http_date() {
        let mut headers = HeaderMap::new();
        let now = UNIX_EPOCH + Duration::from_secs(100);
        let at = UNIX_EPOCH + Duration::from_secs(130);
        let value = httpdate::fmt_http_date(at);
        headers.insert(
            http::header::RETRY_AFTER,
            HeaderValue::from_str(&value).unwrap(),
        );
        let delay = parse_retry_after(&headers, now).unwrap();
        assert_eq!(delay, Duration::from_secs(30));
    }
}
