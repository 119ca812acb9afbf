//! Core conversion logic: currencies, rates, caching and the two-way session

pub mod cache;
pub mod config;
pub mod convert;
pub mod currency;
pub mod log;
pub mod rates;
pub mod session;

// Re-export main types for cleaner imports
pub use currency::CurrencyCode;
pub use rates::{FetchError, RateProvider, RateSnapshot, RateTable};
pub use session::{Amount, ConversionState, Event, Notice, Side, SyncController, Update};
