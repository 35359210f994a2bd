/// Translation between game state and the remote row shape.
pub mod codec;
/// Local fallback snapshot storage.
pub mod local_store;
/// Data model shared by every storage tier.
pub mod models;
/// Remote authoritative store abstraction and backends.
pub mod progress_store;
/// Remote storage error taxonomy.
pub mod storage;
