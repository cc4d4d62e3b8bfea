//! # Folio Client
//!
//! Typed access to the Folio blog API for frontends.
//!
//! - [`BlogClient`] wraps the HTTP calls and turns transport failures into
//!   messages fit for display.
//! - [`BlogStore`] keeps the post list, a loading flag and the last error,
//!   updating the list locally after each successful mutation.

mod client;
mod error;
mod store;

pub use client::{BlogClient, ClientConfig};
pub use error::ClientError;
pub use store::{BlogState, BlogStore};

#[cfg(test)]
mod test_server;
