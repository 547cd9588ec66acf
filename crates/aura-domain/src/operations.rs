use crate::{
    import::LeadCandidate, Lead, LeadId, LeadStatus, ListId, NewLead, NewTask, OrphanReport, Task,
    TaskId, UserList,
};
use aura_core::AuraResult;

/// Filter options for listing leads
#[derive(Debug, Default, Clone)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub tag: Option<String>,
    pub list_id: Option<ListId>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead, list: Option<&UserList>) -> bool {
        if self.status.is_some_and(|s| s != lead.status) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !lead.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }
        match (self.list_id, list) {
            (Some(_), Some(list)) => list.contains(lead.id),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

/// Every state change the front ends can make to leads, tasks and lists.
/// Adding a method here forces every implementation to add it.
pub trait CrmOperations {
    // Lead operations
    fn create_lead(&mut self, new_lead: NewLead) -> AuraResult<Lead>;
    fn import_leads(&mut self, candidates: Vec<LeadCandidate>, tag: &str)
        -> AuraResult<Vec<Lead>>;
    fn list_leads(&self, filter: LeadFilter) -> AuraResult<Vec<Lead>>;
    fn get_lead(&self, id: LeadId) -> AuraResult<Option<Lead>>;
    fn move_lead(&mut self, id: LeadId, status: LeadStatus) -> AuraResult<Lead>;
    fn add_tag(&mut self, id: LeadId, tag: String) -> AuraResult<Lead>;
    fn remove_tag(&mut self, id: LeadId, tag: &str) -> AuraResult<Lead>;
    fn delete_leads(&mut self, ids: Vec<LeadId>) -> AuraResult<usize>;

    // Task operations
    fn create_task(&mut self, new_task: NewTask) -> AuraResult<Task>;
    fn list_tasks(&self) -> AuraResult<Vec<Task>>;
    fn get_task(&self, id: TaskId) -> AuraResult<Option<Task>>;
    fn toggle_task(&mut self, id: TaskId) -> AuraResult<Option<Task>>;
    fn delete_task(&mut self, id: TaskId) -> AuraResult<bool>;

    // List operations
    fn create_list(&mut self, name: String, lead_ids: Vec<LeadId>) -> AuraResult<UserList>;
    fn add_to_list(&mut self, list_id: ListId, lead_ids: Vec<LeadId>) -> AuraResult<UserList>;
    fn list_lists(&self) -> AuraResult<Vec<UserList>>;
    fn get_list(&self, id: ListId) -> AuraResult<Option<UserList>>;

    // Integrity
    fn reconcile_references(&mut self) -> AuraResult<OrphanReport>;
}
