//! Table access helpers shared by both page parsers.
//!
//! Docket tables carry no ids or classes; the only stable marker is the
//! `summary` attribute. Heading rows use `th` cells and the recorded-entries
//! table interleaves empty rows, so a "data row" is any row with at least
//! one `td`.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::ParseError;

pub(crate) struct Selectors {
    table: Selector,
    row: Selector,
    cell: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    table: Selector::parse("table").expect("valid selector"),
    row: Selector::parse("tr").expect("valid selector"),
    cell: Selector::parse("td").expect("valid selector"),
});

impl Selectors {
    /// Shared selectors, parsed on first use.
    pub(crate) fn get() -> &'static Self {
        &SELECTORS
    }

    /// First table whose `summary` attribute equals `summary`.
    pub(crate) fn find_table<'a>(&self, doc: &'a Html, summary: &str) -> Option<ElementRef<'a>> {
        let found = doc
            .select(&self.table)
            .find(|t| t.value().attr("summary") == Some(summary));
        if found.is_none() {
            debug!(table = summary, "table absent");
        }
        found
    }

    /// All rows of `table`, heading and blank rows included.
    pub(crate) fn rows<'a>(&self, table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        table.select(&self.row).collect()
    }

    /// Text of the first `limit` `td` cells of `row`.
    pub(crate) fn cells(&self, row: ElementRef<'_>, limit: usize) -> Vec<String> {
        row.select(&self.cell).take(limit).map(cell_text).collect()
    }

    /// Read exactly `N` cells from `row`.
    pub(crate) fn fixed_cells<const N: usize>(
        &self,
        table: &'static str,
        index: usize,
        row: ElementRef<'_>,
    ) -> Result<[String; N], ParseError> {
        exactly(table, index, self.cells(row, N))
    }

    /// Parse a list table into records.
    ///
    /// Returns `None` when the table is absent and `Some(vec![])` when it has
    /// no data rows. Rows without `td` cells are dropped before any record
    /// is built, so the first data row always becomes element 0.
    pub(crate) fn list<T, const N: usize>(
        &self,
        doc: &Html,
        table: &'static str,
        build: impl Fn([String; N]) -> T,
    ) -> Result<Option<Vec<T>>, ParseError> {
        let Some(element) = self.find_table(doc, table) else {
            return Ok(None);
        };

        let data_rows = self
            .rows(element)
            .into_iter()
            .enumerate()
            .map(|(index, row)| (index, self.cells(row, N)))
            .filter(|(_, cells)| !cells.is_empty());

        let mut out = Vec::new();
        for (index, cells) in data_rows {
            out.push(build(exactly(table, index, cells)?));
        }
        debug!(table, rows = out.len(), "parsed table");
        Ok(Some(out))
    }
}

fn exactly<const N: usize>(
    table: &'static str,
    row: usize,
    cells: Vec<String>,
) -> Result<[String; N], ParseError> {
    let found = cells.len();
    <[String; N]>::try_from(cells).map_err(|_| ParseError::MalformedRow {
        table,
        row,
        expected: N,
        found,
    })
}

/// Cell text with surrounding whitespace (including `&nbsp;`) trimmed.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        <html><body>
        <table summary="Other"><tr><td>x</td></tr></table>
        <table summary="Target">
          <tr><th>A</th><th>B</th></tr>
          <tr><td> one&nbsp;</td><td><a href="#">two</a></td><td>extra</td></tr>
          <tr></tr>
          <tr><td>three</td><td>four</td></tr>
        </table>
        </body></html>"##;

    fn pairs(doc: &Html) -> Option<Vec<(String, String)>> {
        let sel = Selectors::get();
        sel.list(doc, "Target", |[a, b]: [String; 2]| (a, b))
            .unwrap()
    }

    #[test]
    fn finds_table_by_summary() {
        let doc = Html::parse_document(PAGE);
        let sel = Selectors::get();
        let table = sel.find_table(&doc, "Target").unwrap();
        assert_eq!(sel.rows(table).len(), 4);
        assert!(sel.find_table(&doc, "Missing").is_none());
    }

    #[test]
    fn summary_must_match_exactly() {
        let doc = Html::parse_document(PAGE);
        let sel = Selectors::get();
        assert!(sel.find_table(&doc, "target").is_none());
        assert!(sel.find_table(&doc, "Targ").is_none());
    }

    #[test]
    fn list_skips_heading_and_blank_rows() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(
            pairs(&doc).unwrap(),
            vec![
                ("one".to_string(), "two".to_string()),
                ("three".to_string(), "four".to_string()),
            ]
        );
    }

    #[test]
    fn absent_table_is_none() {
        let doc = Html::parse_document("<html><body><p>nothing</p></body></html>");
        assert!(pairs(&doc).is_none());
    }

    #[test]
    fn short_row_is_malformed() {
        let doc = Html::parse_document(
            r#"<table summary="Target"><tr><th>A</th></tr><tr><td>only</td></tr></table>"#,
        );
        let sel = Selectors::get();
        let err = sel.list(&doc, "Target", |[a, b]: [String; 2]| (a, b)).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedRow {
                table: "Target",
                row: 1,
                expected: 2,
                found: 1,
            }
        ));
    }

    #[test]
    fn selectors_are_shared() {
        assert!(std::ptr::eq(Selectors::get(), Selectors::get()));
    }

    #[test]
    fn fixed_cells_reads_prefix() {
        let doc = Html::parse_document(PAGE);
        let sel = Selectors::get();
        let table = sel.find_table(&doc, "Target").unwrap();
        let row = sel.rows(table)[1];
        let [a] = sel.fixed_cells::<1>("Target", 1, row).unwrap();
        assert_eq!(a, "one");
    }
}
