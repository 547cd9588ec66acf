use aura_core::{AuraError, AuraResult};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::lead::LeadId;

pub type TaskId = Uuid;

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(AuraError::Validation(format!("Unknown priority: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub is_complete: bool,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    /// Lead this task is about. Not kept in sync when the lead is deleted.
    pub lead_id: Option<LeadId>,
}

impl Task {
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            is_complete: false,
            priority: Priority::Medium,
            due_date: None,
            description: None,
            lead_id: None,
        }
    }

    pub fn toggle_complete(&mut self) {
        self.is_complete = !self.is_complete;
    }

    /// Overdue means due strictly before `today` and still open. A task due
    /// today is not overdue.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        !self.is_complete && self.due_date.is_some_and(|due| due < today)
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Local::now().date_naive())
    }
}

/// Parse a `YYYY-MM-DD` due date. Blank input means no due date.
pub fn parse_due_date(input: &str) -> AuraResult<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| AuraError::Validation(format!("Invalid due date (expected YYYY-MM-DD): {}", input)))
}

/// Quick-add input for a task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub priority: Option<Priority>,
    pub due_date: Option<String>,
    pub description: Option<String>,
    pub lead_id: Option<LeadId>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn for_lead(mut self, lead_id: LeadId) -> Self {
        self.lead_id = Some(lead_id);
        self
    }

    pub fn into_task(self) -> AuraResult<Task> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AuraError::Validation("Task title is required".to_string()));
        }
        let due_date = match self.due_date.as_deref() {
            Some(raw) => parse_due_date(raw)?,
            None => None,
        };

        let mut task = Task::new(title.to_string());
        task.priority = self.priority.unwrap_or_default();
        task.due_date = due_date;
        task.description = self.description.filter(|d| !d.trim().is_empty());
        task.lead_id = self.lead_id;
        Ok(task)
    }
}
