//! Data structures returned by the Genius API.

pub mod artist;
pub mod common;
pub mod song;

pub use artist::*;
pub use common::*;
pub use song::*;
