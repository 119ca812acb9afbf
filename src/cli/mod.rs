//! Terminal presentation of the converter

pub mod convert;
pub mod rates;
pub mod session;
pub mod setup;
pub mod ui;
