//! CSV lead import.
//!
//! Three stages: [`parser`] turns text into header-keyed rows, [`mapping`]
//! decides which column feeds which lead field, and [`build_candidates`]
//! coerces each row into a lead candidate, discarding rows that carry
//! neither a name nor an email. [`session`] wraps the stages in the
//! upload → map → commit flow of the importer.

pub mod coerce;
pub mod mapping;
pub mod parser;
pub mod session;

pub use mapping::{infer_field, CsvMapping, LeadField, MappingEntry, PreviewCell};
pub use parser::{parse_csv, CsvRecord, ParsedCsv};
pub use session::{ImportSession, ImportStep, ImportTicket};

use crate::lead::{Lead, LeadStatus};
use crate::operations::CrmOperations;
use aura_core::AuraResult;
use serde::Serialize;

/// Name given to imported leads that only carried an email.
pub const UNKNOWN_LEAD_NAME: &str = "Unknown";

/// A row that survived filtering, before it gets an identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LeadCandidate {
    pub name: String,
    pub company: String,
    pub email: String,
    pub value: f64,
    pub status: Option<LeadStatus>,
}

impl LeadCandidate {
    fn assign(&mut self, field: LeadField, raw: &str) {
        match field {
            LeadField::Name => self.name = raw.to_string(),
            LeadField::Email => self.email = raw.to_string(),
            LeadField::Company => self.company = raw.to_string(),
            LeadField::Value => self.value = coerce::coerce_value(raw),
            LeadField::Status => self.status = Some(coerce::coerce_status(raw)),
        }
    }

    /// Rows need a name or an email to be worth importing.
    pub fn is_importable(&self) -> bool {
        !self.name.trim().is_empty() || !self.email.trim().is_empty()
    }

    /// Give the candidate an identity, the import tag and a timestamp.
    pub fn into_lead(self, tag: &str) -> Lead {
        let name = match self.name.trim() {
            "" => UNKNOWN_LEAD_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        Lead::new(
            name,
            self.company.trim().to_string(),
            self.email.trim().to_string(),
            self.status.unwrap_or(LeadStatus::New),
            self.value,
            vec![tag.to_string()],
        )
    }
}

/// Candidates built from one parsed file.
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub candidates: Vec<LeadCandidate>,
    /// Rows dropped for having neither a name nor an email.
    pub skipped: usize,
}

/// Outcome of committing an import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub imported: Vec<Lead>,
    pub skipped: usize,
}

impl ImportReport {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }
}

/// Coerce every row through the mapping. Headers are applied in order, so
/// when two headers feed the same field the later one wins.
pub fn build_candidates(parsed: &ParsedCsv, mapping: &CsvMapping) -> ImportBatch {
    let mut batch = ImportBatch::default();
    for (index, row) in parsed.rows.iter().enumerate() {
        let mut candidate = LeadCandidate::default();
        for (header, field) in mapping.mapped() {
            candidate.assign(field, row.get(header));
        }
        if candidate.is_importable() {
            batch.candidates.push(candidate);
        } else {
            tracing::debug!("Skipping CSV row {}: no name or email", index + 2);
            batch.skipped += 1;
        }
    }
    batch
}

/// Parse, map with the inferred defaults and commit in one step.
pub fn import_csv<O: CrmOperations>(ops: &mut O, text: &str, tag: &str) -> AuraResult<ImportReport> {
    let parsed = parse_csv(text)?;
    let mapping = CsvMapping::infer(&parsed.headers);
    commit(ops, &parsed, &mapping, tag)
}

/// Build candidates from an already mapped file and append them to the store.
pub fn commit<O: CrmOperations>(
    ops: &mut O,
    parsed: &ParsedCsv,
    mapping: &CsvMapping,
    tag: &str,
) -> AuraResult<ImportReport> {
    let batch = build_candidates(parsed, mapping);
    let skipped = batch.skipped;
    let imported = ops.import_leads(batch.candidates, tag)?;
    Ok(ImportReport { imported, skipped })
}
