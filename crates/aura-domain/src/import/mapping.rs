//! Column-to-field mapping.
//!
//! Each CSV header is associated with at most one lead field. Defaults come
//! from a fixed keyword table; the user can override any header before the
//! import is committed.

use aura_core::{AuraError, AuraResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::parser::ParsedCsv;

/// Lead fields a CSV column can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadField {
    Name,
    Email,
    Company,
    Value,
    Status,
}

impl LeadField {
    pub const ALL: [LeadField; 5] = [
        LeadField::Name,
        LeadField::Email,
        LeadField::Company,
        LeadField::Value,
        LeadField::Status,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Value => "value",
            Self::Status => "status",
        }
    }

    /// Label shown in the mapping picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email Address",
            Self::Company => "Company",
            Self::Value => "Deal Value",
            Self::Status => "Status",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LeadField {
    type Err = AuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AuraError::Validation(format!("Unknown lead field: {}", s)))
    }
}

/// Keyword rules, checked in order. The first rule with a keyword contained
/// in the lower-cased header decides the field.
const INFERENCE_RULES: &[(&[&str], LeadField)] = &[
    (&["name"], LeadField::Name),
    (&["email", "mail"], LeadField::Email),
    (&["company", "org"], LeadField::Company),
    (&["value", "amount", "price"], LeadField::Value),
    (&["status", "stage"], LeadField::Status),
];

/// Default target for a header, or `None` for "Don't Import".
pub fn infer_field(header: &str) -> Option<LeadField> {
    let lower = header.to_lowercase();
    INFERENCE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, field)| *field)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub header: String,
    pub field: Option<LeadField>,
}

/// Ordered header → field association for one import session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvMapping {
    entries: Vec<MappingEntry>,
}

/// One mapped cell of the first data row, shown before committing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewCell {
    pub header: String,
    pub field: LeadField,
    pub value: String,
}

impl CsvMapping {
    /// Build the default mapping for a header list. Repeated headers share
    /// one entry.
    pub fn infer(headers: &[String]) -> Self {
        let mut mapping = Self::default();
        for header in headers {
            if mapping.position(header).is_none() {
                mapping.entries.push(MappingEntry {
                    header: header.clone(),
                    field: infer_field(header),
                });
            }
        }
        mapping
    }

    /// Override the target of one header. `None` means "Don't Import".
    pub fn set(&mut self, header: &str, field: Option<LeadField>) -> AuraResult<()> {
        let index = self
            .position(header)
            .ok_or_else(|| AuraError::NotFound(format!("CSV header '{}'", header)))?;
        self.entries[index].field = field;
        Ok(())
    }

    /// Apply a `Header=field` override. An empty field unmaps the header.
    pub fn apply_override(&mut self, pair: &str) -> AuraResult<()> {
        let (header, field) = pair.rsplit_once('=').ok_or_else(|| {
            AuraError::Validation(format!("Expected HEADER=FIELD, got '{}'", pair))
        })?;
        let field = match field.trim() {
            "" => None,
            other => Some(other.parse::<LeadField>()?),
        };
        self.set(header.trim(), field)
    }

    pub fn field_for(&self, header: &str) -> Option<LeadField> {
        self.position(header).and_then(|i| self.entries[i].field)
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Mapped headers in header order.
    pub fn mapped(&self) -> impl Iterator<Item = (&str, LeadField)> {
        self.entries
            .iter()
            .filter_map(|e| e.field.map(|field| (e.header.as_str(), field)))
    }

    pub fn preview(&self, parsed: &ParsedCsv) -> Vec<PreviewCell> {
        let Some(row) = parsed.first_row() else {
            return Vec::new();
        };
        self.mapped()
            .map(|(header, field)| PreviewCell {
                header: header.to_string(),
                field,
                value: row.get(header).to_string(),
            })
            .collect()
    }

    fn position(&self, header: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.header == header)
    }
}
