//! Material wear-limit policy.

pub mod wear;

pub use wear::{WearLimitError, WearLimitTable, DEFAULT_WEAR_LIMIT};
