// Adapters layer: concrete implementations for external systems (scholar index, storage).

pub mod scholar;
pub mod storage;

pub use scholar::HttpScholarSource;
pub use storage::LocalStorage;
