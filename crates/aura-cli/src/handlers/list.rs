use crate::cli::ListsAction;
use crate::context::CliContext;
use crate::output;
use aura_domain::CrmOperations;

pub fn handle(ctx: &mut CliContext, action: ListsAction) -> anyhow::Result<()> {
    match action {
        ListsAction::Create { name, selection } => {
            let mut selection = ctx.selection(&selection)?;
            let list = selection.create_list(&mut ctx.store, &name)?;
            output::output_success(&list)
        }
        ListsAction::Add { list, selection } => {
            let list_id = ctx.resolve_list(&list)?;
            let mut selection = ctx.selection(&selection)?;
            let list = selection.add_to_list(&mut ctx.store, list_id)?;
            output::output_success(&list)
        }
        ListsAction::Show => output::output_list(ctx.store.list_lists()?),
    }
}
