//! In-memory storage for development and testing

pub mod memory;

pub use memory::InMemoryRepositoryProvider;
