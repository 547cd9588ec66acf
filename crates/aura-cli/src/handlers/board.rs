use crate::context::CliContext;
use crate::output;
use aura_domain::{DragState, DropTarget, LeadStatus, PipelineBoard};

pub fn handle_board(ctx: &CliContext, summary: bool) -> anyhow::Result<()> {
    let board = PipelineBoard::partition(ctx.store.leads());
    if summary {
        output::output_success(board.summary())
    } else {
        output::output_success(&board)
    }
}

pub fn handle_move(ctx: &mut CliContext, lead: &str, status: LeadStatus) -> anyhow::Result<()> {
    let lead_id = ctx.resolve_lead(lead)?;
    let mut drag = DragState::new();
    drag.pick_up(lead_id);
    match drag.drop_on(&mut ctx.store, DropTarget::Column(status))? {
        Some(moved) => output::output_success(&moved),
        None => output::output_error(&format!("Lead {} was not moved", lead)),
    }
}
