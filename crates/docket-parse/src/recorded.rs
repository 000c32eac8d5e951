//! Parser for the "recorded entries" docket page.

use docket_core::{CaseRecord, RecordedEntry};
use scraper::Html;

use crate::error::ParseError;
use crate::table::Selectors;

pub const COURT_NUMBER_TABLE: &str = "Table listing court number details";
pub const RECORDED_ENTRIES_TABLE: &str = "Table listing the recorded entry(ies)";

/// Extract the case header and the recorded entries from a recorded-entries page.
///
/// The header table holds one value per row: court number, style of cause
/// (`name`), and proceeding category. Entry cells are kept verbatim,
/// `date_filed` included.
pub fn parse_recorded_entries(html: &str) -> Result<CaseRecord, ParseError> {
    let document = Html::parse_document(html);
    let sel = Selectors::get();
    let mut record = CaseRecord::default();

    if let Some(table) = sel.find_table(&document, COURT_NUMBER_TABLE) {
        let rows = sel.rows(table);
        // An empty header table carries nothing to report.
        if !rows.is_empty() {
            if rows.len() < 3 {
                return Err(ParseError::MissingRows {
                    table: COURT_NUMBER_TABLE,
                    expected: 3,
                    found: rows.len(),
                });
            }
            let [court_number] = sel.fixed_cells::<1>(COURT_NUMBER_TABLE, 0, rows[0])?;
            let [name] = sel.fixed_cells::<1>(COURT_NUMBER_TABLE, 1, rows[1])?;
            let [category] = sel.fixed_cells::<1>(COURT_NUMBER_TABLE, 2, rows[2])?;
            record.court_number = Some(court_number);
            record.name = Some(name);
            record.proceeding_category = Some(category);
        }
    }

    record.recorded_entries = sel.list(
        &document,
        RECORDED_ENTRIES_TABLE,
        |[doc, date_filed, office, summary]: [String; 4]| RecordedEntry {
            doc,
            date_filed,
            office,
            summary,
        },
    )?;

    Ok(record)
}
