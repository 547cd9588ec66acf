use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuraError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No headers found in the uploaded file")]
    NoHeaders,

    #[error("Unreadable file: {0}")]
    UnreadableFile(String),

    #[error("An import is already in progress")]
    ImportInProgress,

    #[error("Import result for session {ticket} arrived after the session was closed")]
    StaleImport { ticket: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuraError {
    /// True for errors raised while turning a file into rows, before any
    /// mapping or store mutation happened.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::NoHeaders | Self::UnreadableFile(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_classification() {
        assert!(AuraError::NoHeaders.is_parse_failure());
        assert!(AuraError::UnreadableFile("bad quote".into()).is_parse_failure());
        assert!(!AuraError::ImportInProgress.is_parse_failure());
        assert!(!AuraError::Validation("name".into()).is_parse_failure());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AuraError::Validation("Name is required".into()).to_string(),
            "Validation error: Name is required"
        );
        assert_eq!(
            AuraError::StaleImport { ticket: 3 }.to_string(),
            "Import result for session 3 arrived after the session was closed"
        );
    }
}
