//! Ready-made [`DealSource`](crate::traits::DealSource) implementations.
mod json_file;
mod memory;

pub use json_file::JsonFileDealSource;
pub use memory::InMemoryDealSource;
