//! Pipeline board: leads grouped into status columns, moved by drag and drop.

use crate::{CrmOperations, Lead, LeadId, LeadStatus};
use aura_core::{AuraError, AuraResult};
use serde::Serialize;

/// Statuses shown as board columns, left to right. `Lost` has no column.
pub const PIPELINE_COLUMNS: [LeadStatus; 5] = [
    LeadStatus::New,
    LeadStatus::Contacted,
    LeadStatus::Proposal,
    LeadStatus::Negotiation,
    LeadStatus::Won,
];

#[derive(Debug, Clone, Serialize)]
pub struct PipelineColumn<'a> {
    pub status: LeadStatus,
    pub leads: Vec<&'a Lead>,
    pub total_value: f64,
}

impl PipelineColumn<'_> {
    pub fn count(&self) -> usize {
        self.leads.len()
    }
}

/// One pass over the lead collection. Nothing is cached; build a new board
/// after every change.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineBoard<'a> {
    pub columns: Vec<PipelineColumn<'a>>,
    /// Leads whose status has no column.
    pub off_board: Vec<&'a Lead>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub status: LeadStatus,
    pub count: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub columns: Vec<ColumnSummary>,
    pub lost_count: usize,
    /// Value of every lead not yet won or lost.
    pub open_value: f64,
}

impl<'a> PipelineBoard<'a> {
    /// Split leads into the board columns, keeping collection order inside
    /// each column.
    pub fn partition(leads: &'a [Lead]) -> Self {
        let mut columns: Vec<PipelineColumn<'a>> = PIPELINE_COLUMNS
            .iter()
            .map(|&status| PipelineColumn {
                status,
                leads: Vec::new(),
                total_value: 0.0,
            })
            .collect();
        let mut off_board = Vec::new();

        for lead in leads {
            match columns.iter_mut().find(|c| c.status == lead.status) {
                Some(column) => {
                    column.total_value += lead.value;
                    column.leads.push(lead);
                }
                None => off_board.push(lead),
            }
        }

        Self { columns, off_board }
    }

    pub fn column(&self, status: LeadStatus) -> Option<&PipelineColumn<'a>> {
        self.columns.iter().find(|c| c.status == status)
    }

    pub fn summary(&self) -> PipelineSummary {
        let open_value = self
            .columns
            .iter()
            .filter(|c| c.status.is_open())
            .map(|c| c.total_value)
            .sum();
        PipelineSummary {
            columns: self
                .columns
                .iter()
                .map(|c| ColumnSummary {
                    status: c.status,
                    count: c.count(),
                    total_value: c.total_value,
                })
                .collect(),
            lost_count: self
                .off_board
                .iter()
                .filter(|l| l.status == LeadStatus::Lost)
                .count(),
            open_value,
        }
    }
}

/// Where a dragged card was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Column(LeadStatus),
    /// Released somewhere that is not a column.
    Outside,
}

/// The lead currently being dragged, if any. Only one lead moves at a time.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    dragging_id: Option<LeadId>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick_up(&mut self, lead_id: LeadId) {
        self.dragging_id = Some(lead_id);
    }

    pub fn dragging(&self) -> Option<LeadId> {
        self.dragging_id
    }

    /// Drag ended without a drop.
    pub fn cancel(&mut self) {
        self.dragging_id = None;
    }

    /// Release the dragged lead on `target`. Any column accepts any lead;
    /// returns the moved lead, or `None` when nothing changed.
    pub fn drop_on<O: CrmOperations>(
        &mut self,
        ops: &mut O,
        target: DropTarget,
    ) -> AuraResult<Option<Lead>> {
        let Some(lead_id) = self.dragging_id.take() else {
            return Ok(None);
        };
        let status = match target {
            DropTarget::Outside => return Ok(None),
            DropTarget::Column(status) if !status.is_on_board() => {
                return Err(AuraError::Validation(format!(
                    "{} is not a pipeline column",
                    status
                )));
            }
            DropTarget::Column(status) => status,
        };
        if ops.get_lead(lead_id)?.is_none() {
            tracing::warn!("Dropped lead {} no longer exists", lead_id);
            return Ok(None);
        }
        let lead = ops.move_lead(lead_id, status)?;
        Ok(Some(lead))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EntityStore;
    use crate::NewLead;

    fn store_with(statuses: &[(LeadStatus, f64)]) -> EntityStore {
        let mut store = EntityStore::new();
        for (i, (status, value)) in statuses.iter().enumerate() {
            store
                .create_lead(
                    NewLead::new(format!("Lead {}", i), "Co")
                        .with_value(*value)
                        .with_status(*status),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_partition_covers_collection() {
        let store = store_with(&[
            (LeadStatus::New, 10.0),
            (LeadStatus::Lost, 5.0),
            (LeadStatus::Won, 20.0),
            (LeadStatus::New, 1.0),
            (LeadStatus::Negotiation, 7.0),
        ]);
        let board = PipelineBoard::partition(store.leads());

        let on_board: usize = board.columns.iter().map(|c| c.count()).sum();
        assert_eq!(on_board + board.off_board.len(), store.leads().len());
        assert_eq!(board.columns.len(), 5);

        let new = board.column(LeadStatus::New).unwrap();
        assert_eq!(new.count(), 2);
        assert_eq!(new.total_value, 11.0);
        assert_eq!(new.leads[0].name, "Lead 0");
        assert!(board.column(LeadStatus::Lost).is_none());
    }

    #[test]
    fn test_summary() {
        let store = store_with(&[
            (LeadStatus::New, 10.0),
            (LeadStatus::Proposal, 30.0),
            (LeadStatus::Won, 100.0),
            (LeadStatus::Lost, 50.0),
        ]);
        let summary = PipelineBoard::partition(store.leads()).summary();
        assert_eq!(summary.lost_count, 1);
        assert_eq!(summary.open_value, 40.0);
        assert_eq!(summary.columns[4].status, LeadStatus::Won);
        assert_eq!(summary.columns[4].total_value, 100.0);
    }

    #[test]
    fn test_drop_moves_only_dragged_lead() {
        let mut store = store_with(&[(LeadStatus::New, 1.0), (LeadStatus::Contacted, 2.0)]);
        let before = store.leads().to_vec();
        let dragged = before[1].id;

        let mut drag = DragState::new();
        drag.pick_up(dragged);
        let moved = drag
            .drop_on(&mut store, DropTarget::Column(LeadStatus::Won))
            .unwrap()
            .unwrap();

        assert_eq!(moved.status, LeadStatus::Won);
        assert!(drag.dragging().is_none());
        let after = store.leads();
        assert_eq!(after[0].status, before[0].status);
        assert_eq!(after[1].status, LeadStatus::Won);
        assert_eq!(after[1].name, before[1].name);
        assert_eq!(after[1].value, before[1].value);
        assert_eq!(after[1].created_at, before[1].created_at);
    }

    #[test]
    fn test_backwards_move_is_allowed() {
        let mut store = store_with(&[(LeadStatus::Won, 1.0)]);
        let mut drag = DragState::new();
        drag.pick_up(store.leads()[0].id);
        drag.drop_on(&mut store, DropTarget::Column(LeadStatus::New))
            .unwrap();
        assert_eq!(store.leads()[0].status, LeadStatus::New);
    }

    #[test]
    fn test_drop_outside_or_without_drag_is_noop() {
        let mut store = store_with(&[(LeadStatus::New, 1.0)]);
        let mut drag = DragState::new();
        assert!(drag
            .drop_on(&mut store, DropTarget::Column(LeadStatus::Won))
            .unwrap()
            .is_none());

        drag.pick_up(store.leads()[0].id);
        assert!(drag.drop_on(&mut store, DropTarget::Outside).unwrap().is_none());
        assert_eq!(store.leads()[0].status, LeadStatus::New);
        assert!(drag.dragging().is_none());
    }

    #[test]
    fn test_cannot_drop_on_lost() {
        let mut store = store_with(&[(LeadStatus::New, 1.0)]);
        let mut drag = DragState::new();
        drag.pick_up(store.leads()[0].id);
        let err = drag
            .drop_on(&mut store, DropTarget::Column(LeadStatus::Lost))
            .unwrap_err();
        assert!(matches!(err, AuraError::Validation(_)));
        assert_eq!(store.leads()[0].status, LeadStatus::New);
        assert!(drag.dragging().is_none());
    }

    #[test]
    fn test_cancel_clears_motion() {
        let store = store_with(&[(LeadStatus::New, 1.0)]);
        let mut drag = DragState::new();
        drag.pick_up(store.leads()[0].id);
        drag.cancel();
        assert!(drag.dragging().is_none());
    }

    #[test]
    fn test_drop_of_deleted_lead_is_noop() {
        let mut store = store_with(&[(LeadStatus::New, 1.0)]);
        let id = store.leads()[0].id;
        let mut drag = DragState::new();
        drag.pick_up(id);
        store.delete_leads(vec![id]).unwrap();
        assert!(drag
            .drop_on(&mut store, DropTarget::Column(LeadStatus::Won))
            .unwrap()
            .is_none());
    }
}
