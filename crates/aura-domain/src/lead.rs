use aura_core::{AuraError, AuraResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type LeadId = Uuid;

/// Tag given to leads entered by hand.
pub const MANUAL_LEAD_TAG: &str = "New";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Contacted,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Proposal,
        LeadStatus::Negotiation,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }

    /// Whether the status has a column on the pipeline board.
    pub fn is_on_board(&self) -> bool {
        !matches!(self, Self::Lost)
    }

    /// Still being worked: neither won nor lost.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = AuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AuraError::Validation(format!("Unknown lead status: {}", s)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub company: String,
    pub email: String,
    pub status: LeadStatus,
    pub value: f64,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    pub fn new(
        name: String,
        company: String,
        email: String,
        status: LeadStatus,
        value: f64,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            company,
            email,
            status,
            value: sanitize_value(value),
            tags,
            created_at: Utc::now(),
        }
    }

    pub fn update_status(&mut self, status: LeadStatus) {
        self.status = status;
    }

    /// Append a tag unless the lead already carries it. Returns whether the
    /// tag list changed.
    pub fn add_tag(&mut self, tag: String) -> bool {
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Leads carry non-negative, finite amounts only.
pub(crate) fn sanitize_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Form data for a lead entered by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub status: Option<LeadStatus>,
}

impl NewLead {
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn validate(&self) -> AuraResult<()> {
        if self.name.trim().is_empty() {
            return Err(AuraError::Validation("Name is required".to_string()));
        }
        if self.company.trim().is_empty() {
            return Err(AuraError::Validation("Company is required".to_string()));
        }
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(AuraError::Validation(format!(
                "Deal value must be a non-negative number, got {}",
                self.value
            )));
        }
        Ok(())
    }

    pub fn into_lead(self) -> AuraResult<Lead> {
        self.validate()?;
        Ok(Lead::new(
            self.name.trim().to_string(),
            self.company.trim().to_string(),
            self.email.trim().to_string(),
            self.status.unwrap_or(LeadStatus::New),
            self.value,
            vec![MANUAL_LEAD_TAG.to_string()],
        ))
    }
}
