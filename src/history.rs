use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::CompensationSummary;

/// One completed benchmark round-trip.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    pub job_title: String,
    /// 0 means "market average" rather than a specific seniority.
    pub experience_years: u32,
    pub generated_at: DateTime<Utc>,
    /// The raw report text the model returned.
    pub report: String,
    pub summary: CompensationSummary,
}

impl ReportRecord {
    pub fn new(
        job_title: impl Into<String>,
        experience_years: u32,
        report: impl Into<String>,
        summary: CompensationSummary,
    ) -> Self {
        ReportRecord {
            job_title: job_title.into(),
            experience_years,
            generated_at: Utc::now(),
            report: report.into(),
            summary,
        }
    }
}

/// Caller-owned, in-memory store of past reports. Replaces ambient session
/// state: whoever drives the benchmark owns one of these and decides when it
/// is cleared. Nothing is persisted.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ReportHistory {
    records: Vec<ReportRecord>,
}

impl ReportHistory {
    pub fn new() -> Self {
        ReportHistory::default()
    }

    pub fn add(&mut self, record: ReportRecord) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Newest first, the order past reports are shown in.
    pub fn list(&self) -> impl Iterator<Item = &ReportRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
