//! Core business logic abstractions

pub mod client;
pub mod config;
pub mod conversion;
pub mod history;
pub mod loading;
pub mod log;
pub mod storage;

// Re-export main types for cleaner imports
pub use client::ConversionClient;
pub use conversion::{ConversionApi, ConversionQuote, ConversionRecord, CurrencyCode, CurrencyInfo};
pub use history::{ConversionHistory, ConversionHistoryStore, HISTORY_CAPACITY};
pub use loading::LoadingState;
pub use storage::LocalStorage;
