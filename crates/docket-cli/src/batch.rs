//! Batch pipeline: court numbers in, merged case records out.
//!
//! Each case is fetched and parsed independently; a failure is logged against
//! its court number and the batch moves on.

use std::io::BufRead;

use anyhow::Context;
use docket_core::{CaseRecord, merge};
use docket_fetch::{Endpoint, PageSource};
use docket_parse::{parse_additional_info, parse_recorded_entries};
use futures::stream::{self, StreamExt};
use tracing::{error, info};

pub struct BatchReport {
    /// Non-empty records, in input order.
    pub records: Vec<CaseRecord>,
    /// Court numbers for which nothing was parsed.
    pub empty: Vec<String>,
    /// Court numbers that failed, with the error chain.
    pub failed: Vec<(String, String)>,
}

/// Court numbers `TYPE-BEGIN-YEAR` through `TYPE-END-YEAR`.
pub fn expand_range(kind: &str, begin: u32, end: u32, year: &str) -> Vec<String> {
    (begin..=end).map(|n| format!("{kind}-{n}-{year}")).collect()
}

/// One court number per line; blank lines are skipped.
pub fn read_case_ids(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut ids = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if !id.is_empty() {
            ids.push(id.to_string());
        }
    }
    Ok(ids)
}

/// Fetch and parse both pages for one case and merge them.
pub async fn process_case<S: PageSource>(source: &S, case_id: &str) -> anyhow::Result<CaseRecord> {
    let page = source
        .fetch_page(Endpoint::RecordedEntries, case_id)
        .await
        .context("fetching recorded entries")?;
    let recorded = parse_recorded_entries(&page.body).context("parsing recorded entries")?;

    let page = source
        .fetch_page(Endpoint::AdditionalInfo, case_id)
        .await
        .context("fetching additional information")?;
    let additional = parse_additional_info(&page.body).context("parsing additional information")?;

    Ok(merge(recorded, additional))
}

/// Process every case, at most `jobs` at a time, keeping input order.
pub async fn run_batch<S: PageSource>(source: &S, case_ids: Vec<String>, jobs: usize) -> BatchReport {
    let total = case_ids.len();
    let outcomes: Vec<(String, anyhow::Result<CaseRecord>)> = stream::iter(case_ids)
        .map(|case_id| async move {
            info!(case_id = %case_id, "retrieving and parsing");
            let outcome = process_case(source, &case_id).await;
            (case_id, outcome)
        })
        .buffered(jobs.max(1))
        .collect()
        .await;

    let mut report = BatchReport {
        records: Vec::new(),
        empty: Vec::new(),
        failed: Vec::new(),
    };
    for (case_id, outcome) in outcomes {
        match outcome {
            Ok(record) if record.is_empty() => {
                info!(case_id = %case_id, "nothing parsed; skipping");
                report.empty.push(case_id);
            }
            Ok(record) => {
                info!(case_id = %case_id, fields = record.field_count(), "parsed");
                report.records.push(record);
            }
            Err(e) => {
                let message = format!("{e:#}");
                error!(case_id = %case_id, error = %message, "case failed");
                report.failed.push((case_id, message));
            }
        }
    }

    info!(
        total,
        parsed = report.records.len(),
        empty = report.empty.len(),
        failed = report.failed.len(),
        "batch complete"
    );
    report
}
