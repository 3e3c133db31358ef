//! Form input as typed by the user, and the checks that turn it into
//! request bodies.

use crate::error::ValidationError;
use crate::model::{
  CategoryDraft,
  CategoryId,
  NewTask,
  Task,
  TaskStatus,
  TaskUpdate,
  parse_due_date
};

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct RegistrationForm {
  pub username: String,
  pub password: String,
  pub confirm:  String
}

impl RegistrationForm {
  /// Returns the trimmed username and password.
  pub fn validate(
    &self
  ) -> Result<(String, String), ValidationError>
  {
    let username = self.username.trim();
    let password = self.password.trim();
    let confirm = self.confirm.trim();

    if username.is_empty()
      || password.is_empty()
      || confirm.is_empty()
    {
      return Err(
        ValidationError::MissingFields
      );
    }
    if password != confirm {
      return Err(
        ValidationError::PasswordMismatch
      );
    }
    Ok((
      username.to_string(),
      password.to_string()
    ))
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct CategoryForm {
  pub name:        String,
  pub description: String
}

impl CategoryForm {
  pub fn from_category(
    category: &crate::model::Category
  ) -> Self {
    Self {
      name:        category.name.clone(),
      description: category
        .description
        .clone()
        .unwrap_or_default()
    }
  }

  pub fn validate(
    &self
  ) -> Result<CategoryDraft, ValidationError>
  {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(
        ValidationError::EmptyName
      );
    }
    Ok(CategoryDraft {
      name:        name.to_string(),
      description: self
        .description
        .trim()
        .to_string()
    })
  }
}

/// Task dialog contents. `due_date` stays a string until validation so an
/// empty date input can be reported.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct TaskForm {
  pub description: String,
  pub due_date:    String,
  pub status:      TaskStatus,
  pub category:    Option<CategoryId>
}

impl TaskForm {
  pub fn from_task(task: &Task) -> Self {
    Self {
      description: task.description.clone(),
      due_date:    task
        .tentative_due_date
        .map(|date| {
          date
            .format("%Y-%m-%d")
            .to_string()
        })
        .unwrap_or_default(),
      status:      task.status,
      category:    task.category_id
    }
  }

  fn checked(
    &self
  ) -> Result<
    (String, chrono::NaiveDate),
    ValidationError
  > {
    let description =
      self.description.trim();
    let due = self.due_date.trim();
    if description.is_empty()
      || due.is_empty()
    {
      return Err(
        ValidationError::MissingTaskFields
      );
    }
    let due = parse_due_date(due)
      .map_err(
        ValidationError::InvalidDueDate
      )?;
    Ok((description.to_string(), due))
  }

  pub fn to_new_task(
    &self
  ) -> Result<NewTask, ValidationError> {
    let (description, due) =
      self.checked()?;
    Ok(NewTask {
      description,
      tentative_due_date: due,
      status: self.status,
      category_id: self.category
    })
  }

  /// Only the description is required here; a task the server already
  /// holds without a due date keeps going out with `null`.
  pub fn to_update(
    &self
  ) -> Result<TaskUpdate, ValidationError>
  {
    let description =
      self.description.trim();
    if description.is_empty() {
      return Err(
        ValidationError::MissingTaskFields
      );
    }
    let due = match self.due_date.trim() {
      | "" => None,
      | text => Some(
        parse_due_date(text).map_err(
          ValidationError::InvalidDueDate
        )?
      )
    };
    Ok(TaskUpdate {
      description: description
        .to_string(),
      tentative_due_date: due,
      status: self.status,
      category_id: self.category
    })
  }
}
