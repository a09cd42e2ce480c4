// compile-time guard: enable at least one client kind.
#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("Enable at least one of: `async` (default) or `blocking`.");

/// Genius-SDK – choose **async** *or* **blocking** at compile time.
pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;
pub mod util;

mod request_hook;

#[cfg(feature = "unstable-raw")]
pub mod raw;

/// Authenticated developer API root.
pub const API_ROOT: &str = "https://api.genius.com/";
/// Unauthenticated public API root.
pub const PUBLIC_API_ROOT: &str = "https://genius.com/api/";

pub use auth::{Auth, PublicFallback, SecretString};
#[cfg(feature = "blocking")]
pub use client::{BlockingClient, BlockingClientBuilder};
#[cfg(feature = "async")]
pub use client::{Client, ClientBuilder};
pub use error::{BodySnippetConfig, Error, ErrorKind, HttpError, Result, TransportErrorKind};
pub use request_hook::{RequestHook, RequestHookContext};
pub use transport::middleware::ThrottleConfig;
pub use transport::{ApiContent, ApiRoot};
pub use types::*;
