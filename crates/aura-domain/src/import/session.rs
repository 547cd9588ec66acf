//! Upload → map → commit flow of the CSV importer.
//!
//! A session is either idle, waiting for file text, or holding a parsed file
//! with its editable mapping. Every `begin` hands out a fresh ticket; text
//! delivered under any other ticket is discarded, so a read that finishes
//! after the session was closed cannot leak into a later one.

use aura_core::{AuraError, AuraResult, CsvSource};
use serde::Serialize;
use std::fmt;

use super::mapping::{CsvMapping, PreviewCell};
use super::parser::{parse_csv, ParsedCsv};
use super::{commit, ImportReport};
use crate::operations::CrmOperations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ImportTicket(u64);

impl ImportTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ImportTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which screen of the importer the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImportStep {
    Idle,
    Reading,
    Mapping,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Reading(ImportTicket),
    Mapping {
        ticket: ImportTicket,
        parsed: ParsedCsv,
        mapping: CsvMapping,
    },
}

#[derive(Debug, Default)]
pub struct ImportSession {
    state: State,
    issued: u64,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> ImportStep {
        match self.state {
            State::Idle => ImportStep::Idle,
            State::Reading(_) => ImportStep::Reading,
            State::Mapping { .. } => ImportStep::Mapping,
        }
    }

    /// Start reading a file. Only one session may be open at a time.
    pub fn begin(&mut self) -> AuraResult<ImportTicket> {
        if !matches!(self.state, State::Idle) {
            tracing::warn!("Rejected import: another import is still open");
            return Err(AuraError::ImportInProgress);
        }
        self.issued += 1;
        let ticket = ImportTicket(self.issued);
        self.state = State::Reading(ticket);
        tracing::debug!("Import session {} started", ticket);
        Ok(ticket)
    }

    /// Hand the text read for `ticket` to the session and infer the mapping.
    ///
    /// A parse failure aborts the import and returns the session to idle.
    pub fn deliver(&mut self, ticket: ImportTicket, text: &str) -> AuraResult<()> {
        match self.state {
            State::Reading(current) if current == ticket => {}
            _ => {
                tracing::warn!("Discarding file text for stale import session {}", ticket);
                return Err(AuraError::StaleImport { ticket: ticket.id() });
            }
        }

        let parsed = match parse_csv(text) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.state = State::Idle;
                return Err(err);
            }
        };
        let mapping = CsvMapping::infer(&parsed.headers);
        tracing::debug!(
            "Import session {}: {} headers, {} rows, mapping {:?}",
            ticket,
            parsed.headers.len(),
            parsed.row_count(),
            mapping.entries()
        );
        self.state = State::Mapping {
            ticket,
            parsed,
            mapping,
        };
        Ok(())
    }

    /// Read `source` and deliver its text in one step.
    pub async fn read_from(&mut self, source: &dyn CsvSource) -> AuraResult<ImportTicket> {
        let ticket = self.begin()?;
        let text = match source.read_text().await {
            Ok(text) => text,
            Err(err) => {
                self.state = State::Idle;
                return Err(err);
            }
        };
        self.deliver(ticket, &text)?;
        Ok(ticket)
    }

    pub fn parsed(&self) -> Option<&ParsedCsv> {
        match &self.state {
            State::Mapping { parsed, .. } => Some(parsed),
            _ => None,
        }
    }

    pub fn mapping(&self) -> Option<&CsvMapping> {
        match &self.state {
            State::Mapping { mapping, .. } => Some(mapping),
            _ => None,
        }
    }

    pub fn mapping_mut(&mut self) -> Option<&mut CsvMapping> {
        match &mut self.state {
            State::Mapping { mapping, .. } => Some(mapping),
            _ => None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.parsed().map(ParsedCsv::row_count).unwrap_or(0)
    }

    pub fn preview(&self) -> Vec<PreviewCell> {
        match &self.state {
            State::Mapping {
                parsed, mapping, ..
            } => mapping.preview(parsed),
            _ => Vec::new(),
        }
    }

    /// Leave the mapping screen without importing.
    pub fn back(&mut self) {
        if matches!(self.state, State::Mapping { .. }) {
            self.state = State::Idle;
        }
    }

    /// Abandon the session from any step. A pending read's ticket becomes stale.
    pub fn close(&mut self) {
        if !matches!(self.state, State::Idle) {
            tracing::debug!("Import session closed");
        }
        self.state = State::Idle;
    }

    /// Commit the mapped rows into the store and return to idle.
    pub fn finish<O: CrmOperations>(&mut self, ops: &mut O, tag: &str) -> AuraResult<ImportReport> {
        match std::mem::take(&mut self.state) {
            State::Mapping {
                ticket,
                parsed,
                mapping,
            } => {
                let report = commit(ops, &parsed, &mapping, tag)?;
                tracing::info!(
                    "Import session {} committed {} leads ({} rows skipped)",
                    ticket,
                    report.imported_count(),
                    report.skipped
                );
                Ok(report)
            }
            other => {
                self.state = other;
                Err(AuraError::Validation(
                    "No file is ready to import".to_string(),
                ))
            }
        }
    }
}
