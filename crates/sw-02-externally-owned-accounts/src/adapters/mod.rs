//! # Adapters Layer

mod key_store;

pub use key_store::InMemoryKeyStore;
