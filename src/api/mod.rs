//! High-level Genius API services.
//!
//! The primary SDK surface is exposed via service accessors on clients:
//! - `Client::search()` / `BlockingClient::search()`
//! - `Client::songs()` / `BlockingClient::songs()`
//! - `Client::artists()` / `BlockingClient::artists()`

pub mod account;
pub mod annotations;
pub mod artists;
pub mod search;
pub mod songs;
pub mod web_pages;

pub use account::*;
pub use annotations::*;
pub use artists::*;
pub use search::*;
pub use songs::*;
pub use web_pages::*;
