//! Demo data a fresh session starts with.
//!
//! Ids are fixed so the same lead can be addressed across invocations.

use crate::{Lead, LeadId, LeadStatus, Priority, Task, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

const TASK_ID_BASE: u128 = 0x100;

pub fn demo_lead_id(n: u128) -> LeadId {
    Uuid::from_u128(n)
}

pub fn demo_task_id(n: u128) -> TaskId {
    Uuid::from_u128(TASK_ID_BASE + n)
}

fn timestamp(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[allow(clippy::too_many_arguments)]
fn lead(
    n: u128,
    name: &str,
    company: &str,
    email: &str,
    status: LeadStatus,
    value: f64,
    tags: &[&str],
    created_at: &str,
) -> Lead {
    let mut lead = Lead::new(
        name.to_string(),
        company.to_string(),
        email.to_string(),
        status,
        value,
        tags.iter().map(|t| t.to_string()).collect(),
    );
    lead.id = demo_lead_id(n);
    lead.created_at = timestamp(created_at);
    lead
}

pub fn demo_leads() -> Vec<Lead> {
    vec![
        lead(1, "Alice Freeman", "Nexus Corp", "alice@nexus.com", LeadStatus::New, 12500.0, &["Enterprise", "Q3"], "2023-10-01T10:00:00Z"),
        lead(2, "Bob Smith", "Global Tech", "bob@global.com", LeadStatus::Proposal, 45000.0, &["High Value"], "2023-10-02T14:30:00Z"),
        lead(3, "Charlie Davis", "StartUp Inc", "charlie@startup.io", LeadStatus::Contacted, 5000.0, &["SaaS", "Inbound"], "2023-10-03T09:15:00Z"),
        lead(4, "Diana Prince", "Amazonia", "diana@amazonia.net", LeadStatus::Negotiation, 82000.0, &["Enterprise"], "2023-10-04T16:45:00Z"),
        lead(5, "Evan Wright", "Wright Designs", "evan@wright.com", LeadStatus::Won, 1500.0, &["Design"], "2023-09-28T11:20:00Z"),
        lead(6, "Fiona Gallagher", "South Side", "fiona@south.com", LeadStatus::New, 3200.0, &["Retail"], "2023-10-05T08:00:00Z"),
    ]
}

fn task(
    n: u128,
    title: &str,
    complete: bool,
    priority: Priority,
    due: (i32, u32, u32),
    description: Option<&str>,
    lead: Option<u128>,
) -> Task {
    let mut task = Task::new(title.to_string());
    task.id = demo_task_id(n);
    task.is_complete = complete;
    task.priority = priority;
    task.due_date = NaiveDate::from_ymd_opt(due.0, due.1, due.2);
    task.description = description.map(str::to_string);
    task.lead_id = lead.map(demo_lead_id);
    task
}

pub fn demo_tasks() -> Vec<Task> {
    vec![
        task(1, "Follow up with Nexus Corp", false, Priority::High, (2023, 10, 25), Some("Discuss Q3 pricing adjustments."), Some(1)),
        task(2, "Prepare proposal for Global Tech", true, Priority::Medium, (2023, 10, 20), None, Some(2)),
        task(3, "Update CRM records", false, Priority::Low, (2023, 11, 1), None, None),
    ]
}
