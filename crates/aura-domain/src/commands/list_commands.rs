use super::{Command, CommandContext};
use crate::{LeadId, ListId, UserList};
use aura_core::{AuraError, AuraResult};
use std::collections::HashSet;

pub struct CreateList {
    pub list: UserList,
}

impl Command for CreateList {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        context.lists.push(self.list.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create list: '{}'", self.list.name)
    }
}

/// Merge leads into an existing list (set semantics)
pub struct AddLeadsToList {
    pub list_id: ListId,
    pub lead_ids: Vec<LeadId>,
}

impl Command for AddLeadsToList {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        let list = context
            .lists
            .iter_mut()
            .find(|l| l.id == self.list_id)
            .ok_or_else(|| AuraError::NotFound(format!("List {}", self.list_id)))?;
        list.add_leads(self.lead_ids.iter().copied());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Add {} leads to list {}", self.lead_ids.len(), self.list_id)
    }
}

/// Drop list members and task links that point at leads no longer present
pub struct PruneOrphanedReferences;

impl Command for PruneOrphanedReferences {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        let existing: HashSet<LeadId> = context.leads.iter().map(|l| l.id).collect();
        for list in context.lists.iter_mut() {
            list.retain_existing(&existing);
        }
        for task in context.tasks.iter_mut() {
            if task.lead_id.is_some_and(|id| !existing.contains(&id)) {
                task.lead_id = None;
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        "Prune orphaned lead references".to_string()
    }
}
