use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::lead::LeadId;

pub type ListId = Uuid;

/// A named group of leads. Members are referenced by id only; the list never
/// owns the leads and is not pruned when one is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserList {
    pub id: ListId,
    pub name: String,
    pub lead_ids: Vec<LeadId>,
}

impl UserList {
    pub fn new(name: String, lead_ids: impl IntoIterator<Item = LeadId>) -> Self {
        let mut list = Self {
            id: Uuid::new_v4(),
            name,
            lead_ids: Vec::new(),
        };
        list.add_leads(lead_ids);
        list
    }

    /// Merge ids into the list with set semantics, keeping first-seen order.
    /// Returns how many ids were new.
    pub fn add_leads(&mut self, lead_ids: impl IntoIterator<Item = LeadId>) -> usize {
        let mut seen: HashSet<LeadId> = self.lead_ids.iter().copied().collect();
        let before = self.lead_ids.len();
        for id in lead_ids {
            if seen.insert(id) {
                self.lead_ids.push(id);
            }
        }
        self.lead_ids.len() - before
    }

    pub fn contains(&self, lead_id: LeadId) -> bool {
        self.lead_ids.contains(&lead_id)
    }

    pub fn len(&self) -> usize {
        self.lead_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lead_ids.is_empty()
    }

    /// Drop members that are not in `existing`. Returns how many were removed.
    pub fn retain_existing(&mut self, existing: &HashSet<LeadId>) -> usize {
        let before = self.lead_ids.len();
        self.lead_ids.retain(|id| existing.contains(id));
        before - self.lead_ids.len()
    }
}
