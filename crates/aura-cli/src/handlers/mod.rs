pub mod board;
pub mod export;
pub mod import;
pub mod lead;
pub mod list;
pub mod task;
