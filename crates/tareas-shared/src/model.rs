use std::fmt;
use std::str::FromStr;

use chrono::{
  DateTime,
  NaiveDate,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};

macro_rules! integer_id {
  ($name:ident, $what:literal) => {
    #[derive(
      Debug,
      Clone,
      Copy,
      PartialEq,
      Eq,
      Hash,
      PartialOrd,
      Ord,
      Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl fmt::Display for $name {
      fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>
      ) -> fmt::Result {
        write!(f, "{}", self.0)
      }
    }

    impl FromStr for $name {
      type Err = String;

      fn from_str(
        s: &str
      ) -> Result<Self, Self::Err> {
        s.trim()
          .parse::<i64>()
          .map($name)
          .map_err(|_| {
            format!(
              "invalid {} id: {s}",
              $what
            )
          })
      }
    }
  };
}

integer_id!(TaskId, "task");
integer_id!(CategoryId, "category");

/// Lifecycle label of a task. The backend only accepts these three wire
/// labels.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
)]
pub enum TaskStatus {
  #[default]
  #[serde(rename = "Sin Empezar")]
  NotStarted,
  #[serde(rename = "Empezada")]
  InProgress,
  #[serde(rename = "Finalizada")]
  Done
}

impl TaskStatus {
  pub const ALL: [TaskStatus; 3] = [
    TaskStatus::NotStarted,
    TaskStatus::InProgress,
    TaskStatus::Done
  ];

  pub fn wire_label(self) -> &'static str {
    match self {
      | TaskStatus::NotStarted => {
        "Sin Empezar"
      }
      | TaskStatus::InProgress => "Empezada",
      | TaskStatus::Done => "Finalizada"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | TaskStatus::NotStarted => {
        "Not Started"
      }
      | TaskStatus::InProgress => {
        "In Progress"
      }
      | TaskStatus::Done => "Done"
    }
  }

  /// Stable key used for CLI flags and select values.
  pub fn key(self) -> &'static str {
    match self {
      | TaskStatus::NotStarted => {
        "not-started"
      }
      | TaskStatus::InProgress => {
        "in-progress"
      }
      | TaskStatus::Done => "done"
    }
  }
}

impl fmt::Display for TaskStatus {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for TaskStatus {
  type Err = String;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let wanted = s.trim();
    TaskStatus::ALL
      .into_iter()
      .find(|status| {
        status.key() == wanted
          || status
            .wire_label()
            .eq_ignore_ascii_case(wanted)
          || status
            .label()
            .eq_ignore_ascii_case(wanted)
      })
      .ok_or_else(|| {
        format!(
          "unknown status `{wanted}` \
           (expected not-started, \
           in-progress or done)"
        )
      })
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct Task {
  pub id:                 TaskId,
  pub description:        String,
  #[serde(
    default,
    with = "due_date_serde"
  )]
  pub tentative_due_date:
    Option<NaiveDate>,
  pub status:             TaskStatus,
  #[serde(default)]
  pub category_id:
    Option<CategoryId>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub created_at:
    Option<DateTime<Utc>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub user_id:            Option<i64>
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct Category {
  pub id:          CategoryId,
  pub name:        String,
  #[serde(default)]
  pub description: Option<String>
}

/// Credential and display name returned by a successful login.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct Session {
  pub token:     String,
  #[serde(default)]
  pub user_name: String
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
  pub username: String,
  pub password: String
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
  pub username:    String,
  pub password:    String,
  pub picture_url: String
}

/// Body for both category create and update.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
)]
pub struct CategoryDraft {
  pub name:        String,
  pub description: String
}

/// Create body. `category_id` is left out of the JSON entirely when unset.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
)]
pub struct NewTask {
  pub description:        String,
  pub tentative_due_date: NaiveDate,
  pub status:             TaskStatus,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub category_id:
    Option<CategoryId>
}

/// Update body. Every field is always sent; an unset category or due date
/// goes out as `null`.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
)]
pub struct TaskUpdate {
  pub description:        String,
  #[serde(
    serialize_with = "due_date_serde::serialize"
  )]
  pub tentative_due_date:
    Option<NaiveDate>,
  pub status:             TaskStatus,
  pub category_id:
    Option<CategoryId>
}

pub(crate) mod due_date_serde {
  use chrono::NaiveDate;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  const FORMAT: &str = "%Y-%m-%d";

  pub fn serialize<S>(
    value: &Option<NaiveDate>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    match value {
      | Some(date) => serializer
        .serialize_str(
          &date
            .format(FORMAT)
            .to_string()
        ),
      | None => serializer.serialize_none()
    }
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<Option<NaiveDate>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      Option::<String>::deserialize(
        deserializer
      )?;
    match raw.as_deref().map(str::trim) {
      | None | Some("") => Ok(None),
      | Some(text) => parse(text)
        .map(Some)
        .map_err(serde::de::Error::custom)
    }
  }

  /// Accepts `YYYY-MM-DD` as well as a full timestamp whose first ten
  /// characters are the date.
  pub fn parse(
    text: &str
  ) -> Result<NaiveDate, String> {
    let date_part =
      text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(
      date_part, FORMAT
    )
    .map_err(|err| {
      format!(
        "invalid due date `{text}`: \
         {err}"
      )
    })
  }
}

pub fn parse_due_date(
  text: &str
) -> Result<NaiveDate, String> {
  due_date_serde::parse(text.trim())
}
