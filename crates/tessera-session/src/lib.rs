//! Tessera Session - message protocol between a front end and the linter
//!
//! A [`Session`] owns a document and answers [`Request`]s with
//! [`Response`]s. Messages are JSON objects tagged by `type`.

mod messages;
mod session;

pub use messages::{Request, Response};
pub use session::Session;
