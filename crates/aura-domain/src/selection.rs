//! Multi-select on the lead list and the bulk actions that consume it.

use crate::{CrmOperations, Lead, LeadExporter, LeadId, ListId, UserList};
use aura_core::{AuraError, AuraResult};
use std::collections::HashSet;

/// Yes/no prompt shown before destructive actions.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers yes to everything, for non-interactive callers.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeadSelection {
    selected: HashSet<LeadId>,
}

impl LeadSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: LeadId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Clear when everything is selected, otherwise select everything.
    pub fn toggle_all(&mut self, leads: &[Lead]) {
        if self.selected.len() == leads.len() {
            self.selected.clear();
        } else {
            self.selected = leads.iter().map(|l| l.id).collect();
        }
    }

    pub fn is_selected(&self, id: LeadId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected ids in collection order.
    pub fn ordered_ids(&self, leads: &[Lead]) -> Vec<LeadId> {
        leads
            .iter()
            .filter(|l| self.selected.contains(&l.id))
            .map(|l| l.id)
            .collect()
    }

    /// Leads an export covers: the selection, or everything when nothing is
    /// selected.
    pub fn export_scope<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        if self.selected.is_empty() {
            leads.iter().collect()
        } else {
            leads
                .iter()
                .filter(|l| self.selected.contains(&l.id))
                .collect()
        }
    }

    pub fn export(&self, leads: &[Lead]) -> String {
        LeadExporter::export_csv(&self.export_scope(leads))
    }

    /// Delete every selected lead after confirmation. Returns how many were
    /// removed; a declined prompt removes nothing.
    pub fn delete_selected<O: CrmOperations>(
        &mut self,
        ops: &mut O,
        confirm: &dyn Confirm,
    ) -> AuraResult<usize> {
        if self.selected.is_empty() {
            return Ok(0);
        }
        let prompt = format!("Are you sure you want to delete {} leads?", self.selected.len());
        if !confirm.confirm(&prompt) {
            tracing::debug!("Bulk delete declined");
            return Ok(0);
        }
        let removed = ops.delete_leads(self.selected.iter().copied().collect())?;
        self.selected.clear();
        Ok(removed)
    }

    /// Save the selection as a new named list.
    pub fn create_list<O: CrmOperations>(&mut self, ops: &mut O, name: &str) -> AuraResult<UserList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuraError::Validation("List name is required".to_string()));
        }
        let ids = self.ordered_ids(&ops.list_leads(Default::default())?);
        let list = ops.create_list(name.to_string(), ids)?;
        self.selected.clear();
        Ok(list)
    }

    /// Merge the selection into an existing list.
    pub fn add_to_list<O: CrmOperations>(
        &mut self,
        ops: &mut O,
        list_id: ListId,
    ) -> AuraResult<UserList> {
        let ids = self.ordered_ids(&ops.list_leads(Default::default())?);
        let list = ops.add_to_list(list_id, ids)?;
        self.selected.clear();
        Ok(list)
    }
}
