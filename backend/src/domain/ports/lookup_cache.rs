//! Port for the read-through cache in front of lookup endpoints.
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{LookupCacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by lookup cache adapters.
    pub enum LookupCacheError {
        /// Cache backend is unavailable.
        Backend { message: String } => "lookup cache backend failure: {message}",
    }
}

/// Shared store of decoded lookup responses keyed by endpoint.
///
/// Services treat the cache as best effort: a failing cache degrades to a
/// direct backend call rather than failing the lookup.
#[async_trait]
pub trait LookupCache: Send + Sync {
    /// Read the cached response for `key`, if one is live.
    async fn get(&self, key: &LookupCacheKey) -> Result<Option<Arc<Value>>, LookupCacheError>;

    /// Store `value` as the response for `key`.
    async fn put(&self, key: &LookupCacheKey, value: Arc<Value>) -> Result<(), LookupCacheError>;
}
