use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::trace;

use crate::model::{
  CategoryId,
  Task,
  TaskStatus
};

/// Status axis of the task board. `Today` ignores status and selects by
/// due date instead.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
)]
pub enum StatusFilter {
  Status(TaskStatus),
  Today
}

impl Default for StatusFilter {
  fn default() -> Self {
    StatusFilter::Status(
      TaskStatus::NotStarted
    )
  }
}

impl StatusFilter {
  pub const ALL: [StatusFilter; 4] = [
    StatusFilter::Status(
      TaskStatus::NotStarted
    ),
    StatusFilter::Status(
      TaskStatus::InProgress
    ),
    StatusFilter::Status(
      TaskStatus::Done
    ),
    StatusFilter::Today
  ];

  pub fn key(self) -> &'static str {
    match self {
      | StatusFilter::Status(status) => {
        status.key()
      }
      | StatusFilter::Today => "today"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | StatusFilter::Status(status) => {
        status.label()
      }
      | StatusFilter::Today => "Today"
    }
  }

  pub fn matches(
    self,
    task: &Task,
    today: NaiveDate
  ) -> bool {
    match self {
      | StatusFilter::Status(status) => {
        task.status == status
      }
      | StatusFilter::Today => {
        task.tentative_due_date
          == Some(today)
      }
    }
  }
}

impl fmt::Display for StatusFilter {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.key())
  }
}

impl FromStr for StatusFilter {
  type Err = String;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    if s.trim().eq_ignore_ascii_case("today")
    {
      return Ok(StatusFilter::Today);
    }
    s.parse::<TaskStatus>()
      .map(StatusFilter::Status)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
pub enum CategoryFilter {
  #[default]
  All,
  Only(CategoryId)
}

impl CategoryFilter {
  pub fn matches(
    self,
    task: &Task
  ) -> bool {
    match self {
      | CategoryFilter::All => true,
      | CategoryFilter::Only(id) => {
        task.category_id == Some(id)
      }
    }
  }
}

impl fmt::Display for CategoryFilter {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | CategoryFilter::All => {
        f.write_str("all")
      }
      | CategoryFilter::Only(id) => {
        write!(f, "{id}")
      }
    }
  }
}

impl FromStr for CategoryFilter {
  type Err = String;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed.is_empty()
      || trimmed
        .eq_ignore_ascii_case("all")
    {
      return Ok(CategoryFilter::All);
    }
    trimmed
      .parse::<CategoryId>()
      .map(CategoryFilter::Only)
  }
}

/// Both board axes. Changing either one only re-filters the snapshot.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub struct TaskFilter {
  pub status:   StatusFilter,
  pub category: CategoryFilter
}

impl TaskFilter {
  pub fn with_status(
    self,
    status: StatusFilter
  ) -> Self {
    Self {
      status,
      ..self
    }
  }

  pub fn with_category(
    self,
    category: CategoryFilter
  ) -> Self {
    Self {
      category,
      ..self
    }
  }

  pub fn matches(
    &self,
    task: &Task,
    today: NaiveDate
  ) -> bool {
    self.status.matches(task, today)
      && self.category.matches(task)
  }

  #[tracing::instrument(
    skip(self, tasks),
    fields(status = %self.status, category = %self.category)
  )]
  pub fn apply<'a>(
    &self,
    tasks: &'a [Task],
    today: NaiveDate
  ) -> Vec<&'a Task> {
    let kept: Vec<&Task> = tasks
      .iter()
      .filter(|task| {
        self.matches(task, today)
      })
      .collect();
    trace!(
      total = tasks.len(),
      kept = kept.len(),
      "filtered task snapshot"
    );
    kept
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn task(
    id: i64,
    status: TaskStatus,
    due: (i32, u32, u32),
    category: Option<i64>
  ) -> Task {
    Task {
      id: crate::model::TaskId(id),
      description: format!("task {id}"),
      tentative_due_date:
        NaiveDate::from_ymd_opt(
          due.0, due.1, due.2
        ),
      status,
      category_id: category
        .map(CategoryId),
      created_at: None,
      user_id: None
    }
  }

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1)
      .unwrap()
  }

  fn sample() -> Vec<Task> {
    vec![
      task(
        1,
        TaskStatus::NotStarted,
        (2024, 5, 1),
        None
      ),
      task(
        2,
        TaskStatus::InProgress,
        (2024, 5, 1),
        Some(10)
      ),
      task(
        3,
        TaskStatus::NotStarted,
        (2024, 6, 1),
        Some(10)
      ),
      task(
        4,
        TaskStatus::Done,
        (2024, 4, 1),
        Some(20)
      ),
    ]
  }

  fn ids(tasks: &[&Task]) -> Vec<i64> {
    tasks.iter().map(|t| t.id.0).collect()
  }

  #[test]
  fn default_filter_is_not_started_all() {
    let filter = TaskFilter::default();
    assert_eq!(
      filter.status,
      StatusFilter::Status(
        TaskStatus::NotStarted
      )
    );
    assert_eq!(
      filter.category,
      CategoryFilter::All
    );
  }

  #[test]
  fn status_filter_keeps_exact_status() {
    let tasks = sample();
    for status in TaskStatus::ALL {
      let filter = TaskFilter::default()
        .with_status(
          StatusFilter::Status(status)
        );
      let kept =
        filter.apply(&tasks, today());
      assert!(
        kept
          .iter()
          .all(|t| t.status == status)
      );
      assert_eq!(
        kept.len(),
        tasks
          .iter()
          .filter(|t| t.status == status)
          .count()
      );
    }
  }

  #[test]
  fn today_filter_keeps_tasks_due_today() {
    let tasks = sample();
    let filter = TaskFilter::default()
      .with_status(StatusFilter::Today);
    assert_eq!(
      ids(&filter.apply(&tasks, today())),
      vec![1, 2]
    );
  }

  #[test]
  fn today_filter_skips_tasks_without_due_date()
  {
    let mut undated = task(
      9,
      TaskStatus::NotStarted,
      (2024, 5, 1),
      None
    );
    undated.tentative_due_date = None;
    assert!(
      !StatusFilter::Today
        .matches(&undated, today())
    );
  }

  #[test]
  fn category_filter_intersects_status() {
    let tasks = sample();
    let filter = TaskFilter {
      status:   StatusFilter::Status(
        TaskStatus::NotStarted
      ),
      category: CategoryFilter::Only(
        CategoryId(10)
      )
    };
    assert_eq!(
      ids(&filter.apply(&tasks, today())),
      vec![3]
    );

    let today_in_ten = filter
      .with_status(StatusFilter::Today);
    assert_eq!(
      ids(
        &today_in_ten
          .apply(&tasks, today())
      ),
      vec![2]
    );
  }

  #[test]
  fn buy_milk_disappears_under_other_category()
  {
    let milk = Task {
      description: "Buy milk".to_string(),
      ..task(
        1,
        TaskStatus::NotStarted,
        (2024, 5, 1),
        None
      )
    };
    let filter = TaskFilter::default();
    assert!(filter.matches(&milk, today()));

    let narrowed = filter.with_category(
      CategoryFilter::Only(CategoryId(5))
    );
    assert!(
      !narrowed.matches(&milk, today())
    );
  }

  #[test]
  fn filters_round_trip_through_keys() {
    for status in StatusFilter::ALL {
      assert_eq!(
        status
          .key()
          .parse::<StatusFilter>()
          .unwrap(),
        status
      );
    }
    assert_eq!(
      "all"
        .parse::<CategoryFilter>()
        .unwrap(),
      CategoryFilter::All
    );
    assert_eq!(
      "42"
        .parse::<CategoryFilter>()
        .unwrap(),
      CategoryFilter::Only(CategoryId(42))
    );
    assert!(
      "groceries"
        .parse::<CategoryFilter>()
        .is_err()
    );
  }
}
