use aura_core::AuraResult;

pub mod lead_commands;
pub mod list_commands;
pub mod task_commands;

pub use lead_commands::*;
pub use list_commands::*;
pub use task_commands::*;

/// Trait for domain commands that mutate state
/// Commands represent intent and are the only way the entity store changes
pub trait Command: Send + Sync {
    /// Execute this command, mutating the domain state
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation
/// Borrows every collection owned by the entity store
pub struct CommandContext<'a> {
    pub leads: &'a mut Vec<crate::Lead>,
    pub tasks: &'a mut Vec<crate::Task>,
    pub lists: &'a mut Vec<crate::UserList>,
}
