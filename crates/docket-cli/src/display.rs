//! Output rendering: JSON array or human-readable case cards.

use std::io::{self, Write};

use docket_core::CaseRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

const LABEL_WIDTH: usize = 20;

/// Write records as a JSON array with sorted keys and four-space indent.
pub fn write_json(out: &mut impl Write, records: &[CaseRecord]) -> anyhow::Result<()> {
    // `Value` objects are BTreeMaps, which sorts keys.
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;

    let mut ser = Serializer::with_formatter(&mut *out, PrettyFormatter::with_indent(b"    "));
    values.serialize(&mut ser)?;
    writeln!(out)?;
    Ok(())
}

/// Write each record as a card, separated by blank lines.
pub fn write_cards(out: &mut impl Write, records: &[CaseRecord]) -> io::Result<()> {
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_card(out, record)?;
    }
    Ok(())
}

// ── Card layout ──

/// One record as a vertical card grouped by source table.
fn write_card(out: &mut impl Write, record: &CaseRecord) -> io::Result<()> {
    let title = record.court_number.as_deref().unwrap_or("(no court number)");
    writeln!(out, "=== {title} ===")?;
    if let Some(name) = &record.name {
        writeln!(out, "{name}")?;
    }
    writeln!(out)?;

    section(
        out,
        "Case",
        &[("proceeding_category", &record.proceeding_category)],
    )?;
    section(
        out,
        "Additional Information",
        &[
            ("court_type", &record.court_type),
            ("proceeding_nature", &record.proceeding_nature),
            ("office", &record.office),
            ("language", &record.language),
            ("action_type", &record.action_type),
            ("filing_date", &record.filing_date),
        ],
    )?;

    if let Some(entries) = &record.recorded_entries {
        list_header(out, "Recorded Entries", entries.len())?;
        for e in entries {
            writeln!(
                out,
                "  [{}] {}  {}  {}",
                e.doc, e.date_filed, e.office, e.summary
            )?;
        }
        writeln!(out)?;
    }
    if let Some(parties) = &record.parties {
        list_header(out, "Parties", parties.len())?;
        for p in parties {
            writeln!(out, "  {}", p.name)?;
            writeln!(out, "    {:<LABEL_WIDTH$} {}", "solicitor", p.solicitor)?;
            writeln!(out, "    {:<LABEL_WIDTH$} {}", "lawyer", p.lawyer)?;
        }
        writeln!(out)?;
    }
    if let Some(related) = &record.related_cases {
        list_header(out, "Related Cases", related.len())?;
        for r in related {
            writeln!(out, "  {:<12} {} ({})", r.court_number, r.name, r.proceeding_type)?;
        }
        writeln!(out)?;
    }
    if let Some(ip) = &record.ip {
        list_header(out, "Intellectual Property", ip.len())?;
        for item in ip {
            writeln!(out, "  {:<LABEL_WIDTH$} {}", item.ip_name, item.ip_number)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Scalar fields under a header; skipped entirely when none are present.
fn section(
    out: &mut impl Write,
    header: &str,
    fields: &[(&str, &Option<String>)],
) -> io::Result<()> {
    if fields.iter().all(|(_, v)| v.is_none()) {
        return Ok(());
    }
    writeln!(out, "{header}")?;
    for (label, value) in fields {
        if let Some(v) = value {
            writeln!(out, "  {label:<LABEL_WIDTH$} {v}")?;
        }
    }
    writeln!(out)
}

fn list_header(out: &mut impl Write, header: &str, count: usize) -> io::Result<()> {
    if count == 0 {
        writeln!(out, "{header} (none)")
    } else {
        writeln!(out, "{header} ({count})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::{Party, RelatedCase};

    fn json(records: &[CaseRecord]) -> String {
        let mut out = Vec::new();
        write_json(&mut out, records).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn cards(records: &[CaseRecord]) -> String {
        let mut out = Vec::new();
        write_cards(&mut out, records).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> CaseRecord {
        CaseRecord {
            court_number: Some("T-100-14".into()),
            name: Some("JANE DOE v. ACME WIDGETS INC.".into()),
            filing_date: Some("2014-01-15".into()),
            action_type: Some("Action".into()),
            parties: Some(vec![Party {
                name: "JANE DOE".into(),
                solicitor: "Smith LLP".into(),
                lawyer: "J. Smith".into(),
            }]),
            related_cases: Some(vec![RelatedCase {
                court_number: "T-2042-13".into(),
                name: "ACME WIDGETS INC. v. JANE DOE".into(),
                proceeding_type: "Action".into(),
            }]),
            ip: Some(vec![]),
            ..Default::default()
        }
    }

    #[test]
    fn json_keys_sorted_with_four_space_indent() {
        let json = json(&[sample()]);
        assert!(json.starts_with("[\n    {\n        \"action_type\": \"Action\",\n"));
        assert!(json.ends_with("]\n"));

        let action = json.find("\"action_type\"").unwrap();
        let court = json.find("\"court_number\"").unwrap();
        let ip = json.find("\"ip\"").unwrap();
        let parties = json.find("\"parties\"").unwrap();
        assert!(action < court && court < ip && ip < parties);
    }

    #[test]
    fn json_keeps_non_ascii() {
        let record = CaseRecord {
            office: Some("Montréal".into()),
            ..Default::default()
        };
        let json = json(&[record]);
        assert!(json.contains("\"office\": \"Montréal\""));
    }

    #[test]
    fn json_empty_batch() {
        assert_eq!(json(&[]), "[]\n");
    }

    #[test]
    fn json_round_trips() {
        let json = json(&[sample()]);
        let parsed: Vec<CaseRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![sample()]);
    }

    #[test]
    fn card_sections() {
        let card = cards(&[sample()]);
        assert!(card.starts_with("=== T-100-14 ===\nJANE DOE v. ACME WIDGETS INC.\n"));
        assert!(card.contains("Additional Information\n"));
        assert!(card.contains("filing_date"));
        assert!(card.contains("2014-01-15"));
        assert!(card.contains("Parties (1)\n  JANE DOE\n"));
        assert!(card.contains("T-2042-13"));
        assert!(card.contains("Intellectual Property (none)"));
        // Absent table, absent section.
        assert!(!card.contains("Recorded Entries"));
        assert!(!card.contains("\nCase\n"));
    }

    #[test]
    fn write_errors_propagate() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_cards(&mut Closed, &[sample()]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(write_json(&mut Closed, &[sample()]).is_err());
    }

    #[test]
    fn cards_joined_by_blank_line() {
        let out = cards(&[sample(), sample()]);
        assert_eq!(out.matches("=== T-100-14 ===").count(), 2);
        assert!(out.contains("\n\n=== T-100-14 ==="));
    }
}
