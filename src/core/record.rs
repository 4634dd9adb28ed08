//! The inspection record value.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One food-inspection record.
///
/// Records are immutable values: a loader creates them, the machine carries
/// them inside a `Loaded` state, and a later load discards them wholesale.
/// The inspection date is optional because some open-data rows omit it.
///
/// # Example
///
/// ```rust
/// use foodwatch::Record;
///
/// let record = Record {
///     title: "Corner Bakery".to_string(),
///     address: "1 N State St".to_string(),
///     inspection_date: None,
/// };
/// assert!(record.inspection_date.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Business name as published by the inspecting authority
    pub title: String,
    /// Street address of the inspected premises
    pub address: String,
    /// When the inspection took place, if the source recorded it
    pub inspection_date: Option<NaiveDateTime>,
}
