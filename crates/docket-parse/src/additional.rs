//! Parser for the "additional information" docket page.
//!
//! The page carries up to four tables: case metadata, parties, related cases,
//! and intellectual property. Each is optional; a missing table leaves its
//! fields unset. Related-case court numbers and the filing date are
//! normalised because the site renders both inconsistently.

use docket_core::{CaseRecord, IpItem, Party, RelatedCase, normalize_case_number, normalize_date};
use scraper::Html;

use crate::error::ParseError;
use crate::table::Selectors;

pub const ADDITIONAL_INFO_TABLE: &str = "Table listing additional information";
pub const PARTIES_TABLE: &str = "Table listing party information";
pub const RELATED_CASES_TABLE: &str = "Table listing related cases information";
pub const IP_TABLE: &str = "Table listing intellectual property information";

/// Extract case metadata, parties, related cases, and IP references.
pub fn parse_additional_info(html: &str) -> Result<CaseRecord, ParseError> {
    let document = Html::parse_document(html);
    let sel = Selectors::get();
    let mut record = CaseRecord::default();

    if let Some(table) = sel.find_table(&document, ADDITIONAL_INFO_TABLE) {
        let rows = sel.rows(table);
        // Row 0 holds the column headings.
        let Some(values) = rows.get(1) else {
            return Err(ParseError::MissingRows {
                table: ADDITIONAL_INFO_TABLE,
                expected: 2,
                found: rows.len(),
            });
        };
        let [court_type, nature, office, language, action_type, filing_date] =
            sel.fixed_cells::<6>(ADDITIONAL_INFO_TABLE, 1, *values)?;

        record.court_type = Some(court_type);
        record.proceeding_nature = Some(nature);
        record.office = Some(office);
        record.language = Some(language);
        record.action_type = Some(action_type);
        record.filing_date = Some(normalize_date(&filing_date)?);
    }

    record.parties = sel.list(
        &document,
        PARTIES_TABLE,
        |[name, solicitor, lawyer]: [String; 3]| Party {
            name,
            solicitor,
            lawyer,
        },
    )?;

    record.related_cases = sel.list(
        &document,
        RELATED_CASES_TABLE,
        |[court_number, name, proceeding_type]: [String; 3]| RelatedCase {
            court_number: normalize_case_number(&court_number),
            name,
            proceeding_type,
        },
    )?;

    record.ip = sel.list(
        &document,
        IP_TABLE,
        |[ip_name, ip_number]: [String; 2]| IpItem { ip_name, ip_number },
    )?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!("<html><head><title>Additional information</title></head><body>{body}</body></html>")
    }

    fn info_table(filing_date: &str) -> String {
        format!(
            r#"<table summary="Table listing additional information">
                 <tr><th>Type</th><th>Nature</th><th>Office</th><th>Language</th><th>Type of Action</th><th>Filing Date</th></tr>
                 <tr><td>Federal Court</td><td>Patent Infringement</td><td>Toronto</td><td>English</td><td>Action</td><td>{filing_date}</td></tr>
               </table>"#
        )
    }

    #[test]
    fn info_table_fields_in_column_order() {
        let record = parse_additional_info(&page(&info_table("2014-01-02"))).unwrap();
        assert_eq!(record.court_type.as_deref(), Some("Federal Court"));
        assert_eq!(record.proceeding_nature.as_deref(), Some("Patent Infringement"));
        assert_eq!(record.office.as_deref(), Some("Toronto"));
        assert_eq!(record.language.as_deref(), Some("English"));
        assert_eq!(record.action_type.as_deref(), Some("Action"));
        assert_eq!(record.filing_date.as_deref(), Some("2014-01-02"));
    }

    #[test]
    fn short_filing_date_normalised() {
        let record = parse_additional_info(&page(&info_table("27-MAR-92"))).unwrap();
        assert_eq!(record.filing_date.as_deref(), Some("1992-03-27"));
    }

    #[test]
    fn unparseable_filing_date_is_an_error() {
        let err = parse_additional_info(&page(&info_table("sometime"))).unwrap_err();
        assert!(matches!(err, ParseError::Normalize(_)));
    }

    #[test]
    fn missing_info_table_leaves_fields_unset() {
        let record = parse_additional_info(&page("")).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn info_table_without_values_row_is_an_error() {
        let html = page(
            r#"<table summary="Table listing additional information">
                 <tr><th>Type</th><th>Nature</th></tr>
               </table>"#,
        );
        let err = parse_additional_info(&html).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingRows { expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn info_table_with_short_values_row_is_an_error() {
        let html = page(
            r#"<table summary="Table listing additional information">
                 <tr><th>Type</th></tr>
                 <tr><td>Federal Court</td><td>Patent</td></tr>
               </table>"#,
        );
        let err = parse_additional_info(&html).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedRow { row: 1, expected: 6, found: 2, .. }
        ));
    }

    #[test]
    fn single_party() {
        let html = page(
            r#"<table summary="Table listing party information">
                 <tr><th class="heading">Name</th><th class="heading">Solicitor</th><th class="heading">Lawyer</th></tr>
                 <tr><td>Jane Doe</td><td>Smith LLP</td><td>J. Smith</td></tr>
               </table>"#,
        );
        let record = parse_additional_info(&html).unwrap();
        assert_eq!(
            record.parties,
            Some(vec![Party {
                name: "Jane Doe".into(),
                solicitor: "Smith LLP".into(),
                lawyer: "J. Smith".into(),
            }])
        );
    }

    #[test]
    fn heading_only_tables_are_empty() {
        let html = page(
            r#"<table summary="Table listing party information"><tr><th>Name</th></tr></table>
               <table summary="Table listing related cases information"><tr><th>Court Number</th></tr></table>
               <table summary="Table listing intellectual property information"><tr><th>IP</th></tr></table>"#,
        );
        let record = parse_additional_info(&html).unwrap();
        assert_eq!(record.parties, Some(vec![]));
        assert_eq!(record.related_cases, Some(vec![]));
        assert_eq!(record.ip, Some(vec![]));
        assert!(record.court_type.is_none());
    }

    #[test]
    fn related_case_numbers_normalised() {
        let html = page(
            r#"<table summary="Table listing related cases information">
                 <tr><th>Court Number</th><th>Name</th><th>Type</th></tr>
                 <tr><td>13-T-2042</td><td>ACME CORP. v. JANE DOE</td><td>Action</td></tr>
                 <tr><td>A-55-14</td><td>JANE DOE v. ACME CORP.</td><td>Appeal</td></tr>
               </table>"#,
        );
        let related = parse_additional_info(&html).unwrap().related_cases.unwrap();
        let numbers: Vec<&str> = related.iter().map(|r| r.court_number.as_str()).collect();
        assert_eq!(numbers, ["T-2042-13", "A-55-14"]);
        assert_eq!(related[1].proceeding_type, "Appeal");
    }

    #[test]
    fn ip_rows() {
        let html = page(
            r#"<table summary="Table listing intellectual property information">
                 <tr><th>Name</th><th>Number</th></tr>
                 <tr><td>WIDGET</td><td>TMA123456</td></tr>
                 <tr><td>Widget assembly</td><td>2,123,456</td></tr>
               </table>"#,
        );
        let ip = parse_additional_info(&html).unwrap().ip.unwrap();
        assert_eq!(ip.len(), 2);
        assert_eq!(ip[0].ip_name, "WIDGET");
        assert_eq!(ip[1].ip_number, "2,123,456");
    }
}
