//! Internal helpers shared by both clients.

pub(crate) mod diagnostics;
pub mod filename;
pub(crate) mod url;
