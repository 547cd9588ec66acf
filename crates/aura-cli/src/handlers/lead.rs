use crate::cli::{LeadAddArgs, LeadsAction};
use crate::context::{CliContext, StdinConfirm};
use crate::output;
use aura_domain::{AssumeYes, Confirm, CrmOperations, LeadFilter, NewLead};
use serde_json::json;

pub fn handle(ctx: &mut CliContext, action: LeadsAction, assume_yes: bool) -> anyhow::Result<()> {
    match action {
        LeadsAction::List {
            status,
            tag,
            in_list,
        } => {
            let list_id = in_list.map(|r| ctx.resolve_list(&r)).transpose()?;
            let leads = ctx.store.list_leads(LeadFilter {
                status,
                tag,
                list_id,
            })?;
            output::output_list(leads)
        }
        LeadsAction::Add(args) => {
            let lead = ctx.store.create_lead(build_new_lead(args))?;
            output::output_success(&lead)
        }
        LeadsAction::Delete {
            selection,
            reconcile,
        } => {
            if selection.leads.is_empty() && !selection.all {
                anyhow::bail!("Select leads with --lead or --all");
            }
            let mut selection = ctx.selection(&selection)?;
            let requested = selection.len();
            let confirm: &dyn Confirm = if assume_yes { &AssumeYes } else { &StdinConfirm };
            let deleted = selection.delete_selected(&mut ctx.store, confirm)?;
            let report = if reconcile && deleted > 0 {
                Some(ctx.store.reconcile_references()?)
            } else {
                None
            };
            output::output_success(json!({
                "requested": requested,
                "deleted": deleted,
                "remaining": ctx.store.leads().len(),
                "reconciled": report,
            }))
        }
        LeadsAction::Tag { lead, add, remove } => {
            let id = ctx.resolve_lead(&lead)?;
            for tag in add {
                ctx.store.add_tag(id, tag)?;
            }
            for tag in &remove {
                ctx.store.remove_tag(id, tag)?;
            }
            match ctx.store.get_lead(id)? {
                Some(lead) => output::output_success(&lead),
                None => output::output_error(&format!("Lead not found: {}", id)),
            }
        }
    }
}

pub fn handle_reconcile(ctx: &mut CliContext) -> anyhow::Result<()> {
    let report = ctx.store.reconcile_references()?;
    output::output_success(&report)
}

fn build_new_lead(args: LeadAddArgs) -> NewLead {
    let mut new_lead = NewLead::new(args.name, args.company)
        .with_email(args.email)
        .with_value(args.value);
    if let Some(status) = args.status {
        new_lead = new_lead.with_status(status);
    }
    new_lead
}
