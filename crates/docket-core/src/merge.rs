//! Field-wise union of the two partial records parsed for one case.

use crate::record::CaseRecord;

/// Merge the recorded-entries and additional-information records.
///
/// Each field is taken from `additional` when present there, otherwise from
/// `recorded`. The two pages fill disjoint fields, so a collision only
/// happens on malformed input; the additional-information value wins.
/// An empty result means nothing was parsed for the case.
pub fn merge(recorded: CaseRecord, additional: CaseRecord) -> CaseRecord {
    let collisions = overlapping_fields(&recorded, &additional);
    if !collisions.is_empty() {
        tracing::warn!(
            fields = ?collisions,
            "field present on both pages; keeping additional-information value"
        );
    }

    CaseRecord {
        court_number: additional.court_number.or(recorded.court_number),
        name: additional.name.or(recorded.name),
        proceeding_category: additional.proceeding_category.or(recorded.proceeding_category),
        recorded_entries: additional.recorded_entries.or(recorded.recorded_entries),
        court_type: additional.court_type.or(recorded.court_type),
        proceeding_nature: additional.proceeding_nature.or(recorded.proceeding_nature),
        office: additional.office.or(recorded.office),
        language: additional.language.or(recorded.language),
        action_type: additional.action_type.or(recorded.action_type),
        filing_date: additional.filing_date.or(recorded.filing_date),
        parties: additional.parties.or(recorded.parties),
        related_cases: additional.related_cases.or(recorded.related_cases),
        ip: additional.ip.or(recorded.ip),
    }
}

fn overlapping_fields(a: &CaseRecord, b: &CaseRecord) -> Vec<&'static str> {
    let pairs = [
        ("court_number", a.court_number.is_some() && b.court_number.is_some()),
        ("name", a.name.is_some() && b.name.is_some()),
        (
            "proceeding_category",
            a.proceeding_category.is_some() && b.proceeding_category.is_some(),
        ),
        (
            "recorded_entries",
            a.recorded_entries.is_some() && b.recorded_entries.is_some(),
        ),
        ("court_type", a.court_type.is_some() && b.court_type.is_some()),
        (
            "proceeding_nature",
            a.proceeding_nature.is_some() && b.proceeding_nature.is_some(),
        ),
        ("office", a.office.is_some() && b.office.is_some()),
        ("language", a.language.is_some() && b.language.is_some()),
        ("action_type", a.action_type.is_some() && b.action_type.is_some()),
        ("filing_date", a.filing_date.is_some() && b.filing_date.is_some()),
        ("parties", a.parties.is_some() && b.parties.is_some()),
        ("related_cases", a.related_cases.is_some() && b.related_cases.is_some()),
        ("ip", a.ip.is_some() && b.ip.is_some()),
    ];
    pairs
        .into_iter()
        .filter_map(|(field, both)| both.then_some(field))
        .collect()
}
