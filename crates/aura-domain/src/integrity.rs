//! Dangling lead references.
//!
//! Deleting a lead leaves list members and task links pointing at it. These
//! are only cleaned up when a reconcile is asked for explicitly.

use crate::{LeadId, Lead, Task, UserList};
use serde::Serialize;
use std::collections::HashSet;

/// References to leads that no longer exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrphanReport {
    /// List memberships pointing at missing leads.
    pub list_members_pruned: usize,
    /// Tasks whose lead link points at a missing lead.
    pub task_links_cleared: usize,
}

impl OrphanReport {
    pub fn is_clean(&self) -> bool {
        self.list_members_pruned == 0 && self.task_links_cleared == 0
    }
}

/// Count dangling references without changing anything.
pub fn find_orphans(leads: &[Lead], tasks: &[Task], lists: &[UserList]) -> OrphanReport {
    let existing: HashSet<LeadId> = leads.iter().map(|l| l.id).collect();
    OrphanReport {
        list_members_pruned: lists
            .iter()
            .flat_map(|list| list.lead_ids.iter())
            .filter(|id| !existing.contains(id))
            .count(),
        task_links_cleared: tasks
            .iter()
            .filter(|task| task.lead_id.is_some_and(|id| !existing.contains(&id)))
            .count(),
    }
}
