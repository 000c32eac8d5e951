//! Case record types shared by the parsers, the merger, and the batch driver.
//!
//! Every field of [`CaseRecord`] is optional because each field comes from a
//! table that may be missing from the docket page. `None` means the source
//! table was absent; `Some(vec![])` means it was present with no data rows.

use serde::{Deserialize, Serialize};

/// One logged filing or event in a case's docket history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEntry {
    pub doc: String,
    /// Verbatim from the page; not normalised.
    pub date_filed: String,
    pub office: String,
    #[serde(rename = "recorded_entry_summary")]
    pub summary: String,
}

/// A party to the proceeding and its representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub solicitor: String,
    pub lawyer: String,
}

/// A case the docket lists as related.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedCase {
    /// Canonical `{T|A}-NNN-YY` form.
    pub court_number: String,
    pub name: String,
    pub proceeding_type: String,
}

/// An intellectual-property reference (patent, trade-mark, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpItem {
    pub ip_name: String,
    pub ip_number: String,
}

/// Parsed docket information for one case identifier.
///
/// Each parser fills only the fields of its own page; [`crate::merge`]
/// combines the two partial records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    // ── Recorded entries page ──
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proceeding_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_entries: Option<Vec<RecordedEntry>>,

    // ── Additional information page ──
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proceeding_nature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    /// ISO 8601 calendar date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parties: Option<Vec<Party>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_cases: Option<Vec<RelatedCase>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<Vec<IpItem>>,
}

impl CaseRecord {
    /// Number of fields that are present.
    pub fn field_count(&self) -> usize {
        [
            self.court_number.is_some(),
            self.name.is_some(),
            self.proceeding_category.is_some(),
            self.recorded_entries.is_some(),
            self.court_type.is_some(),
            self.proceeding_nature.is_some(),
            self.office.is_some(),
            self.language.is_some(),
            self.action_type.is_some(),
            self.filing_date.is_some(),
            self.parties.is_some(),
            self.related_cases.is_some(),
            self.ip.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// True when nothing was parsed for this case.
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }
}
