use crate::cli::{SortOrderArg, TaskAddArgs, TaskSortArg, TasksAction};
use crate::context::CliContext;
use crate::output;
use aura_domain::sort::OrderedSorter;
use aura_domain::{CrmOperations, NewTask, Task};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct TaskView {
    #[serde(flatten)]
    task: Task,
    overdue: bool,
}

pub fn handle(ctx: &mut CliContext, action: TasksAction) -> anyhow::Result<()> {
    match action {
        TasksAction::List {
            sort,
            order,
            today,
            overdue,
        } => list_tasks(ctx, sort, order, today, overdue),
        TasksAction::Add(args) => {
            let new_task = build_new_task(ctx, args)?;
            let task = ctx.store.create_task(new_task)?;
            output::output_success(&task)
        }
        TasksAction::Toggle { task } => {
            let id = ctx.resolve_task(&task)?;
            match ctx.store.toggle_task(id)? {
                Some(task) => output::output_success(&task),
                None => output::output_error(&format!("Task not found: {}", task)),
            }
        }
        TasksAction::Delete { task } => {
            let id = ctx.resolve_task(&task)?;
            let deleted = ctx.store.delete_task(id)?;
            output::output_success(json!({"deleted": deleted, "id": id.to_string()}))
        }
    }
}

fn list_tasks(
    ctx: &CliContext,
    sort: Option<TaskSortArg>,
    order: SortOrderArg,
    today: Option<NaiveDate>,
    only_overdue: bool,
) -> anyhow::Result<()> {
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let mut tasks = ctx.store.list_tasks()?;
    if let Some(field) = sort {
        OrderedSorter::new(field.into(), order.into()).sort_by(&mut tasks);
    }
    let views: Vec<TaskView> = tasks
        .into_iter()
        .map(|task| TaskView {
            overdue: task.is_overdue_on(today),
            task,
        })
        .filter(|view| !only_overdue || view.overdue)
        .collect();
    output::output_list(views)
}

fn build_new_task(ctx: &CliContext, args: TaskAddArgs) -> anyhow::Result<NewTask> {
    let mut new_task = NewTask::new(args.title);
    if let Some(priority) = args.priority {
        new_task = new_task.with_priority(priority);
    }
    if let Some(due) = args.due {
        new_task = new_task.with_due_date(due);
    }
    if let Some(description) = args.description {
        new_task = new_task.with_description(description);
    }
    if let Some(lead) = args.lead {
        new_task = new_task.for_lead(ctx.resolve_lead(&lead)?);
    }
    Ok(new_task)
}
