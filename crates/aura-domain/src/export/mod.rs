//! Lead export.
//!
//! Serialises leads to the comma-separated format offered by the lead list's
//! "Export CSV" action.

pub mod exporter;

pub use exporter::{csv_escape, LeadExporter, EXPORT_HEADER};
