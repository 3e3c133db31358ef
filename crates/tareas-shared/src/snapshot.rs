use chrono::NaiveDate;

use crate::filter::TaskFilter;
use crate::model::{
  Category,
  CategoryId,
  Task,
  TaskId,
  TaskStatus
};

pub const UNCATEGORIZED: &str =
  "Uncategorized";

/// In-memory copy of the user's categories and tasks between fetches.
///
/// Collections are only ever replaced wholesale with the result of a
/// fetch; nothing patches individual entries.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
)]
pub struct Snapshot {
  categories: Vec<Category>,
  tasks:      Vec<Task>
}

/// One rendered line of the task board.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
)]
pub struct TaskRow {
  pub id:          TaskId,
  pub description: String,
  pub due:         Option<NaiveDate>,
  pub status:      TaskStatus,
  pub category:    String
}

impl Snapshot {
  pub fn new(
    categories: Vec<Category>,
    tasks: Vec<Task>
  ) -> Self {
    Self {
      categories,
      tasks
    }
  }

  pub fn categories(&self) -> &[Category] {
    &self.categories
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn replace_tasks(
    &mut self,
    tasks: Vec<Task>
  ) {
    self.tasks = tasks;
  }

  pub fn task(
    &self,
    id: TaskId
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  pub fn category(
    &self,
    id: CategoryId
  ) -> Option<&Category> {
    self
      .categories
      .iter()
      .find(|category| category.id == id)
  }

  pub fn category_name(
    &self,
    id: Option<CategoryId>
  ) -> &str {
    id.and_then(|id| self.category(id))
      .map(|category| {
        category.name.as_str()
      })
      .unwrap_or(UNCATEGORIZED)
  }

  pub fn visible(
    &self,
    filter: &TaskFilter,
    today: NaiveDate
  ) -> Vec<TaskRow> {
    filter
      .apply(&self.tasks, today)
      .into_iter()
      .map(|task| TaskRow {
        id:          task.id,
        description: task
          .description
          .clone(),
        due:         task
          .tentative_due_date,
        status:      task.status,
        category:    self
          .category_name(
            task.category_id
          )
          .to_string()
      })
      .collect()
  }
}

/// Shown instead of the list when the filter leaves nothing.
pub fn empty_board_message(
  filter: &TaskFilter
) -> String {
  format!(
    "No tasks in \"{}\".",
    filter.status.label()
  )
}
