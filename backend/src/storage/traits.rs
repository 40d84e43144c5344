//! # Storage Traits
//!
//! Abstraction over the device key-value store that keeps the signed-in
//! staff profile between launches. The session layer only depends on this
//! trait, so the backing store can be swapped without touching it.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Store a value, overwriting any existing value for the same key
    async fn put_value(&self, key: &str, value: &str) -> Result<()>;

    /// Retrieve a value by its key
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Delete a value by its key
    /// Returns true if the key was present
    async fn delete_value(&self, key: &str) -> Result<bool>;

    /// List all stored keys
    async fn list_keys(&self) -> Result<Vec<String>>;
}
