pub mod commands;
pub mod export;
pub mod import;
pub mod integrity;
pub mod lead;
pub mod operations;
pub mod pipeline;
pub mod seed;
pub mod selection;
pub mod sort;
pub mod store;
pub mod task;
pub mod user_list;

pub use export::LeadExporter;
pub use import::{
    CsvMapping, ImportReport, ImportSession, ImportTicket, LeadCandidate, LeadField, ParsedCsv,
};
pub use integrity::OrphanReport;
pub use lead::{Lead, LeadId, LeadStatus, NewLead};
pub use operations::{CrmOperations, LeadFilter};
pub use pipeline::{DragState, DropTarget, PipelineBoard, PipelineSummary, PIPELINE_COLUMNS};
pub use selection::{AssumeYes, Confirm, LeadSelection};
pub use sort::{SortOrder, TaskSortBy};
pub use store::EntityStore;
pub use task::{NewTask, Priority, Task, TaskId};
pub use user_list::{ListId, UserList};
