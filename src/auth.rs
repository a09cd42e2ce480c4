use crate::Error;
use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use std::fmt;

#[derive(Clone, Default, Eq, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Genius developer-API authentication: a bearer access token.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Auth {
    Bearer { token: SecretString },
}

impl Auth {
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: SecretString::new(token),
        }
    }

    pub(crate) fn secrets(&self) -> Vec<&str> {
        match self {
            Self::Bearer { token } => vec![token.expose()],
        }
    }

    pub(crate) fn apply(&self, headers: &mut HeaderMap) -> Result<(), Error> {
        let value = match self {
            Self::Bearer { token } => {
                let raw = format!("Bearer {}", token.expose());
                HeaderValue::from_str(&raw).map_err(|err| Error::InvalidConfig {
                    message: "invalid Authorization header value".into(),
                    source: Some(Box::new(err)),
                })?
            }
        };

        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Whether an endpoint method can be served by the public (unauthenticated)
/// API root. Declared statically at each endpoint definition; the guard never
/// inspects runtime arguments to discover the capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublicFallback {
    Supported,
    Unsupported,
}

const FALLBACK_MSG: &str = "This method needs an access token for the developer API. \
     Get an access token or use the public API by passing public_api = true.";

const NO_FALLBACK_MSG: &str = "This method needs an access token for the developer API.";

/// Call-time token check, run before any request is constructed.
///
/// A present token always passes, regardless of `public_api`. Without a token
/// the call may proceed only when the endpoint supports the public fallback
/// and the caller explicitly opted in.
pub(crate) fn require_token(
    auth: Option<&Auth>,
    fallback: PublicFallback,
    public_api: bool,
) -> Result<(), Error> {
    if auth.is_some() {
        return Ok(());
    }

    match fallback {
        PublicFallback::Supported if public_api => Ok(()),
        PublicFallback::Supported => Err(Error::TokenRequired {
            message: FALLBACK_MSG.into(),
        }),
        PublicFallback::Unsupported => Err(Error::TokenRequired {
            message: NO_FALLBACK_MSG.into(),
        }),
    }
}
