//! Parsers for the two docket pages of a case.
//!
//! Tables are located by their `summary` attribute; a missing table is not
//! an error, it simply leaves the corresponding fields unset.

pub mod additional;
mod error;
pub mod recorded;
mod table;

pub use additional::parse_additional_info;
pub use error::ParseError;
pub use recorded::parse_recorded_entries;

use docket_core::{CaseRecord, merge};

/// Parse both pages of one case and merge the results.
pub fn parse_case(recorded_html: &str, additional_html: &str) -> Result<CaseRecord, ParseError> {
    let recorded = parse_recorded_entries(recorded_html)?;
    let additional = parse_additional_info(additional_html)?;
    Ok(merge(recorded, additional))
}
