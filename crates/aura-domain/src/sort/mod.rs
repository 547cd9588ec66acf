//! Task ordering.
//!
//! The task list always shows open tasks before completed ones. An explicit
//! sort field can be layered on top for listings.

use crate::{Priority, Task};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Field to sort tasks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSortBy {
    Priority,
    DueDate,
    Title,
}

impl TaskSortBy {
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Priority => priority_value(&a.priority).cmp(&priority_value(&b.priority)),
            Self::DueDate => a.due_date.cmp(&b.due_date),
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        }
    }

    /// Tasks without a due date go last whichever way the list is sorted.
    fn missing_key(&self, task: &Task) -> bool {
        matches!(self, Self::DueDate) && task.due_date.is_none()
    }
}

/// Wrapper that applies sort order (ascending/descending) to a sort field.
pub struct OrderedSorter {
    sorter: TaskSortBy,
    order: SortOrder,
}

impl OrderedSorter {
    pub fn new(sorter: TaskSortBy, order: SortOrder) -> Self {
        Self { sorter, order }
    }

    /// Stable sort in place. Works with both `&Task` and `Task` elements.
    pub fn sort_by<T: Borrow<Task>>(&self, tasks: &mut [T]) {
        tasks.sort_by(|a, b| {
            let (a, b) = (a.borrow(), b.borrow());
            let missing = self.sorter.missing_key(a).cmp(&self.sorter.missing_key(b));
            if missing != Ordering::Equal {
                return missing;
            }
            let cmp = self.sorter.compare(a, b);
            match self.order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            }
        });
    }
}

/// Open tasks first, otherwise keep the existing order.
pub fn display_order<T: Borrow<Task>>(tasks: &mut [T]) {
    tasks.sort_by_key(|t| t.borrow().is_complete);
}

fn priority_value(priority: &Priority) -> u8 {
    match priority {
        Priority::High => 2,
        Priority::Medium => 1,
        Priority::Low => 0,
    }
}
