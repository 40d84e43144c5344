//! # Storage Module
//!
//! Holds the in-memory state behind the desk:
//!
//! - **store_data**: the record collections the stats store reads and writes,
//!   plus fixture and demo data
//! - **traits**: the key-value abstraction the staff session persists through
//! - **memory**: an in-process key-value implementation
//!
//! Nothing here is durable; a real device store can be plugged in through
//! [`KeyValueStorage`].

pub mod memory;
pub mod store_data;
pub mod traits;

pub use memory::InMemoryKeyValueStore;
pub use store_data::StoreData;
pub use traits::KeyValueStorage;
