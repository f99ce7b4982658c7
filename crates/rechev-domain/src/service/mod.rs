//! Merge rules for registry rows

pub mod merge;
pub mod price;

pub use merge::{disability_status, join_codes, technical_overlay, JoinCodes, TECHNICAL_FIELDS};
pub use price::{backfill_importer, parse_price, price_range};
