use super::{Command, CommandContext};
use crate::{Lead, LeadId, LeadStatus};
use aura_core::AuraResult;
use std::collections::HashSet;

/// Append a lead entered by hand
pub struct CreateLead {
    pub lead: Lead,
}

impl Command for CreateLead {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        context.leads.push(self.lead.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create lead: '{}'", self.lead.name)
    }
}

/// Append imported leads, preserving file order
pub struct ImportLeads {
    pub leads: Vec<Lead>,
}

impl Command for ImportLeads {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        context.leads.extend(self.leads.iter().cloned());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Import {} leads", self.leads.len())
    }
}

/// Move a lead to another pipeline status
pub struct UpdateLeadStatus {
    pub lead_id: LeadId,
    pub status: LeadStatus,
}

impl Command for UpdateLeadStatus {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        if let Some(lead) = context.leads.iter_mut().find(|l| l.id == self.lead_id) {
            lead.update_status(self.status);
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Move lead {} to {}", self.lead_id, self.status)
    }
}

/// Add a tag to a lead
pub struct AddLeadTag {
    pub lead_id: LeadId,
    pub tag: String,
}

impl Command for AddLeadTag {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        if let Some(lead) = context.leads.iter_mut().find(|l| l.id == self.lead_id) {
            lead.add_tag(self.tag.clone());
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Tag lead {} with '{}'", self.lead_id, self.tag)
    }
}

/// Remove a tag from a lead
pub struct RemoveLeadTag {
    pub lead_id: LeadId,
    pub tag: String,
}

impl Command for RemoveLeadTag {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        if let Some(lead) = context.leads.iter_mut().find(|l| l.id == self.lead_id) {
            lead.remove_tag(&self.tag);
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Untag lead {} from '{}'", self.lead_id, self.tag)
    }
}

/// Remove leads by id. Tasks and lists that mention them are left alone.
pub struct DeleteLeads {
    pub lead_ids: Vec<LeadId>,
}

impl Command for DeleteLeads {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        let doomed: HashSet<LeadId> = self.lead_ids.iter().copied().collect();
        context.leads.retain(|l| !doomed.contains(&l.id));
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete {} leads", self.lead_ids.len())
    }
}
