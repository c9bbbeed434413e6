//! Booster data validation and audit.
//!
//! Validates a dataset of booster-content JSON documents (per-slot
//! collector-number pools for each set and booster type), reconciles the
//! index manifest against the files on disk, and audits declared ranges
//! against Scryfall's booster-flagged card data.

pub mod audit;
pub mod booster;
pub mod error;
pub mod range;
pub mod reconcile;
pub mod report;
pub mod schema;
pub mod scryfall;
pub mod validate;

pub use error::{AuditError, Result};
pub use range::CnRange;
pub use report::Report;
