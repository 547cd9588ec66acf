use crate::commands::{
    AddLeadTag, AddLeadsToList, Command, CommandContext, CreateLead, CreateList, CreateTask,
    DeleteLeads, DeleteTask, ImportLeads, PruneOrphanedReferences, RemoveLeadTag, ToggleTask,
    UpdateLeadStatus,
};
use crate::import::LeadCandidate;
use crate::integrity::find_orphans;
use crate::seed::{demo_leads, demo_tasks};
use crate::sort::display_order;
use crate::{
    CrmOperations, Lead, LeadFilter, LeadId, LeadStatus, ListId, NewLead, NewTask, OrphanReport,
    Task, TaskId, UserList,
};
use aura_core::{AuraError, AuraResult};

/// In-memory owner of every lead, task and list for one session.
#[derive(Debug, Default)]
pub struct EntityStore {
    leads: Vec<Lead>,
    tasks: Vec<Task>,
    lists: Vec<UserList>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demo_data() -> Self {
        Self {
            leads: demo_leads(),
            tasks: demo_tasks(),
            lists: Vec::new(),
        }
    }

    /// Leads in collection order.
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Tasks in storage order, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn lists(&self) -> &[UserList] {
        &self.lists
    }

    pub fn execute(&mut self, command: Box<dyn Command>) -> AuraResult<()> {
        tracing::debug!("Executing: {}", command.description());
        let mut ctx = CommandContext {
            leads: &mut self.leads,
            tasks: &mut self.tasks,
            lists: &mut self.lists,
        };
        command.execute(&mut ctx)
    }

    fn require_lead(&self, id: LeadId) -> AuraResult<Lead> {
        self.get_lead(id)?
            .ok_or_else(|| AuraError::NotFound(format!("Lead {}", id)))
    }

    fn require_list(&self, id: ListId) -> AuraResult<UserList> {
        self.get_list(id)?
            .ok_or_else(|| AuraError::NotFound(format!("List {}", id)))
    }
}

impl CrmOperations for EntityStore {
    fn create_lead(&mut self, new_lead: NewLead) -> AuraResult<Lead> {
        let lead = new_lead.into_lead()?;
        self.execute(Box::new(CreateLead { lead: lead.clone() }))?;
        tracing::info!("Created lead '{}' ({})", lead.name, lead.id);
        Ok(lead)
    }

    fn import_leads(
        &mut self,
        candidates: Vec<LeadCandidate>,
        tag: &str,
    ) -> AuraResult<Vec<Lead>> {
        let leads: Vec<Lead> = candidates.into_iter().map(|c| c.into_lead(tag)).collect();
        if leads.is_empty() {
            return Ok(leads);
        }
        self.execute(Box::new(ImportLeads {
            leads: leads.clone(),
        }))?;
        tracing::info!("Imported {} leads tagged '{}'", leads.len(), tag);
        Ok(leads)
    }

    fn list_leads(&self, filter: LeadFilter) -> AuraResult<Vec<Lead>> {
        let list = match filter.list_id {
            Some(id) => Some(self.require_list(id)?),
            None => None,
        };
        Ok(self
            .leads
            .iter()
            .filter(|l| filter.matches(l, list.as_ref()))
            .cloned()
            .collect())
    }

    fn get_lead(&self, id: LeadId) -> AuraResult<Option<Lead>> {
        Ok(self.leads.iter().find(|l| l.id == id).cloned())
    }

    fn move_lead(&mut self, id: LeadId, status: LeadStatus) -> AuraResult<Lead> {
        let before = self.require_lead(id)?;
        self.execute(Box::new(UpdateLeadStatus {
            lead_id: id,
            status,
        }))?;
        tracing::info!("Moved '{}' from {} to {}", before.name, before.status, status);
        self.require_lead(id)
    }

    fn add_tag(&mut self, id: LeadId, tag: String) -> AuraResult<Lead> {
        let tag = tag.trim().to_string();
        if tag.is_empty() {
            return Err(AuraError::Validation("Tag cannot be blank".to_string()));
        }
        self.require_lead(id)?;
        self.execute(Box::new(AddLeadTag { lead_id: id, tag }))?;
        self.require_lead(id)
    }

    fn remove_tag(&mut self, id: LeadId, tag: &str) -> AuraResult<Lead> {
        self.require_lead(id)?;
        self.execute(Box::new(RemoveLeadTag {
            lead_id: id,
            tag: tag.trim().to_string(),
        }))?;
        self.require_lead(id)
    }

    fn delete_leads(&mut self, ids: Vec<LeadId>) -> AuraResult<usize> {
        let before = self.leads.len();
        self.execute(Box::new(DeleteLeads { lead_ids: ids }))?;
        let removed = before - self.leads.len();
        tracing::info!("Deleted {} leads", removed);
        Ok(removed)
    }

    fn create_task(&mut self, new_task: NewTask) -> AuraResult<Task> {
        let task = new_task.into_task()?;
        self.execute(Box::new(CreateTask { task: task.clone() }))?;
        Ok(task)
    }

    /// Tasks in display order: open before completed.
    fn list_tasks(&self) -> AuraResult<Vec<Task>> {
        let mut tasks = self.tasks.clone();
        display_order(&mut tasks);
        Ok(tasks)
    }

    fn get_task(&self, id: TaskId) -> AuraResult<Option<Task>> {
        Ok(self.tasks.iter().find(|t| t.id == id).cloned())
    }

    fn toggle_task(&mut self, id: TaskId) -> AuraResult<Option<Task>> {
        self.execute(Box::new(ToggleTask { task_id: id }))?;
        self.get_task(id)
    }

    fn delete_task(&mut self, id: TaskId) -> AuraResult<bool> {
        let before = self.tasks.len();
        self.execute(Box::new(DeleteTask { task_id: id }))?;
        Ok(self.tasks.len() != before)
    }

    fn create_list(&mut self, name: String, lead_ids: Vec<LeadId>) -> AuraResult<UserList> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AuraError::Validation("List name is required".to_string()));
        }
        let list = UserList::new(name, lead_ids);
        self.execute(Box::new(CreateList { list: list.clone() }))?;
        tracing::info!("Created list '{}' with {} leads", list.name, list.len());
        Ok(list)
    }

    fn add_to_list(&mut self, list_id: ListId, lead_ids: Vec<LeadId>) -> AuraResult<UserList> {
        self.execute(Box::new(AddLeadsToList { list_id, lead_ids }))?;
        let list = self.require_list(list_id)?;
        tracing::info!("List '{}' now has {} leads", list.name, list.len());
        Ok(list)
    }

    fn list_lists(&self) -> AuraResult<Vec<UserList>> {
        Ok(self.lists.clone())
    }

    fn get_list(&self, id: ListId) -> AuraResult<Option<UserList>> {
        Ok(self.lists.iter().find(|l| l.id == id).cloned())
    }

    fn reconcile_references(&mut self) -> AuraResult<OrphanReport> {
        let report = find_orphans(&self.leads, &self.tasks, &self.lists);
        if !report.is_clean() {
            self.execute(Box::new(PruneOrphanedReferences))?;
            tracing::info!(
                "Pruned {} list members and {} task links",
                report.list_members_pruned,
                report.task_links_cleared
            );
        }
        Ok(report)
    }
}
