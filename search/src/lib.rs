//! Search collaborators for the notification front end.
//!
//! The delivery core treats search as an external concern: anything that can
//! turn an operator's query string into an ordered list of links can drive
//! notifications. This crate defines that boundary ([`SearchProvider`]) and
//! ships one implementation backed by DuckDuckGo's plain-HTML endpoint.

use async_trait::async_trait;
use events::LinkEntry;

pub mod duckduckgo;
pub mod error;

pub use duckduckgo::DuckDuckGoProvider;
pub use error::{Error, ErrorKind};

/// A source of result links for an operator query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns up to `limit` result links for `query`, best first.
    ///
    /// An empty result list is not an error; it means the provider answered
    /// and found nothing.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<LinkEntry>, Error>;
}
