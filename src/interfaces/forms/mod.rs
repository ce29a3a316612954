//! Form vocabulary shared between the engine and its callers.
//!
//! A [`schema::FormSchema`] describes the fields a client should render; it
//! serializes to JSON so frontends can build markup from it. A
//! [`submission::FormData`] carries the raw values posted back.

pub mod schema;
pub mod submission;
