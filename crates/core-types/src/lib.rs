pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{InvestmentRating, Trend};
pub use error::CoreError;
pub use structs::{CardQuery, RawSale, SaleObservation, SaleRecord, SALE_DATE_FORMAT};
