// Adapters layer: concrete implementations of the domain ports (storage, http, terminal).

pub mod document;
pub mod json_store;
pub mod memory_store;
pub mod omdb;
pub mod terminal;
