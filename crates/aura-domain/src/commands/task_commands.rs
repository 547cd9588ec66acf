use super::{Command, CommandContext};
use crate::{Task, TaskId};
use aura_core::AuraResult;

/// Add a task at the top of the list
pub struct CreateTask {
    pub task: Task,
}

impl Command for CreateTask {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        context.tasks.insert(0, self.task.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create task: '{}'", self.task.title)
    }
}

/// Flip a task between open and complete
pub struct ToggleTask {
    pub task_id: TaskId,
}

impl Command for ToggleTask {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        if let Some(task) = context.tasks.iter_mut().find(|t| t.id == self.task_id) {
            task.toggle_complete();
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Toggle task {}", self.task_id)
    }
}

pub struct DeleteTask {
    pub task_id: TaskId,
}

impl Command for DeleteTask {
    fn execute(&self, context: &mut CommandContext) -> AuraResult<()> {
        context.tasks.retain(|t| t.id != self.task_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete task {}", self.task_id)
    }
}
