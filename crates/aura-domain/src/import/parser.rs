//! Delimited-text parsing.
//!
//! Splits comma-separated text into a header list and records keyed by
//! header name. Quoted fields may contain commas, newlines and doubled
//! quotes. Blank lines are skipped.

use aura_core::{AuraError, AuraResult};
use std::collections::HashMap;

const BOM: char = '\u{feff}';

/// One data row, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRecord {
    cells: HashMap<String, String>,
}

impl CsvRecord {
    /// Cell text under `header`; missing cells read as empty.
    pub fn get(&self, header: &str) -> &str {
        self.cells.get(header).map(String::as_str).unwrap_or("")
    }
}

/// Result of the parse stage: ordered headers plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRecord>,
}

impl ParsedCsv {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_row(&self) -> Option<&CsvRecord> {
        self.rows.first()
    }
}

/// Parse CSV text. The first row is the header list.
///
/// Blank input parses to no headers and no rows. A header row with only
/// blank cells is rejected with [`AuraError::NoHeaders`]; an unterminated
/// quote with [`AuraError::UnreadableFile`].
pub fn parse_csv(text: &str) -> AuraResult<ParsedCsv> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(ParsedCsv::default());
    }

    let mut records = split_records(text)?.into_iter();
    let headers: Vec<String> = match records.next() {
        Some(first) => first.into_iter().map(|h| h.trim().to_string()).collect(),
        None => return Ok(ParsedCsv::default()),
    };
    if headers.iter().all(|h| h.is_empty()) {
        return Err(AuraError::NoHeaders);
    }

    let rows = records
        .map(|fields| {
            let mut cells = HashMap::with_capacity(headers.len());
            for (index, header) in headers.iter().enumerate() {
                let value = fields.get(index).cloned().unwrap_or_default();
                // Repeated header names: the later column wins.
                cells.insert(header.clone(), value);
            }
            CsvRecord { cells }
        })
        .collect();

    Ok(ParsedCsv { headers, rows })
}

/// Split text into records of raw fields.
pub fn split_records(text: &str) -> AuraResult<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut quote_line = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                finish_record(&mut records, &mut record, &mut field);
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(AuraError::UnreadableFile(format!(
            "unterminated quoted field starting on line {}",
            quote_line
        )));
    }
    if !field.is_empty() || !record.is_empty() {
        finish_record(&mut records, &mut record, &mut field);
    }
    Ok(records)
}

fn finish_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    record.push(std::mem::take(field));
    let blank_line = record.len() == 1 && record[0].is_empty();
    if blank_line {
        record.clear();
    } else {
        records.push(std::mem::take(record));
    }
}
