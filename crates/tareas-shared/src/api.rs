//! Typed access to the REST backend.
//!
//! [`Transport`] is the only seam a front end implements: it moves one
//! request/response pair over whatever HTTP stack the target has. [`Api`]
//! owns routes, bodies, bearer headers and response decoding.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{
  debug,
  trace
};

use crate::error::{
  ClientError,
  Result
};
use crate::model::{
  Category,
  CategoryDraft,
  CategoryId,
  Credentials,
  NewTask,
  RegisterRequest,
  Session,
  Task,
  TaskId,
  TaskUpdate
};

pub mod paths {
  use crate::model::{
    CategoryId,
    TaskId
  };

  pub const USERS: &str = "/usuarios";
  pub const LOGIN: &str =
    "/usuarios/iniciar-sesion";
  pub const CATEGORIES: &str =
    "/categorias";
  pub const TASKS: &str = "/tareas";
  pub const USER_TASKS: &str =
    "/tareas/usuario";

  pub fn category(id: CategoryId) -> String {
    format!("{CATEGORIES}/{id}")
  }

  pub fn task(id: TaskId) -> String {
    format!("{TASKS}/{id}")
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub enum Method {
  Get,
  Post,
  Put,
  Delete
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      | Method::Get => "GET",
      | Method::Post => "POST",
      | Method::Put => "PUT",
      | Method::Delete => "DELETE"
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  pub path:   String,
  pub bearer: Option<String>,
  /// Serialized JSON body.
  pub body:   Option<String>
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
  pub status: u16,
  pub body:   String
}

impl ApiResponse {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  /// Server-supplied message from an error body: `message` first, then
  /// `error`.
  pub fn server_message(
    &self
  ) -> Option<String> {
    let value: serde_json::Value =
      serde_json::from_str(&self.body)
        .ok()?;
    ["message", "error"]
      .into_iter()
      .filter_map(|key| {
        value.get(key)?.as_str()
      })
      .map(str::trim)
      .find(|text| !text.is_empty())
      .map(str::to_string)
  }

  fn into_result(self) -> Result<Self> {
    if self.is_success() {
      Ok(self)
    } else {
      Err(ClientError::Http {
        status:  self.status,
        message: self.server_message()
      })
    }
  }

  fn json<T: DeserializeOwned>(
    &self
  ) -> Result<T> {
    serde_json::from_str(&self.body)
      .map_err(|err| {
        ClientError::Decode(
          err.to_string()
        )
      })
  }
}

#[allow(async_fn_in_trait)]
pub trait Transport {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse>;
}

#[derive(Debug, Clone)]
pub struct Api<T> {
  transport: T
}

impl<T: Transport> Api<T> {
  pub fn new(transport: T) -> Self {
    Self {
      transport
    }
  }

  pub async fn register(
    &self,
    request: &RegisterRequest
  ) -> Result<()> {
    self
      .call(
        Method::Post,
        paths::USERS.to_string(),
        None,
        Some(request)
      )
      .await
      .map(drop)
  }

  pub async fn login(
    &self,
    credentials: &Credentials
  ) -> Result<Session> {
    self
      .call(
        Method::Post,
        paths::LOGIN.to_string(),
        None,
        Some(credentials)
      )
      .await?
      .json()
  }

  pub async fn list_categories(
    &self,
    token: &str
  ) -> Result<Vec<Category>> {
    self
      .call::<()>(
        Method::Get,
        paths::CATEGORIES.to_string(),
        Some(token),
        None
      )
      .await?
      .json()
  }

  pub async fn create_category(
    &self,
    token: &str,
    draft: &CategoryDraft
  ) -> Result<()> {
    self
      .call(
        Method::Post,
        paths::CATEGORIES.to_string(),
        Some(token),
        Some(draft)
      )
      .await
      .map(drop)
  }

  pub async fn update_category(
    &self,
    token: &str,
    id: CategoryId,
    draft: &CategoryDraft
  ) -> Result<()> {
    self
      .call(
        Method::Put,
        paths::category(id),
        Some(token),
        Some(draft)
      )
      .await
      .map(drop)
  }

  pub async fn delete_category(
    &self,
    token: &str,
    id: CategoryId
  ) -> Result<()> {
    self
      .call::<()>(
        Method::Delete,
        paths::category(id),
        Some(token),
        None
      )
      .await
      .map(drop)
  }

  pub async fn list_tasks(
    &self,
    token: &str
  ) -> Result<Vec<Task>> {
    self
      .call::<()>(
        Method::Get,
        paths::USER_TASKS.to_string(),
        Some(token),
        None
      )
      .await?
      .json()
  }

  pub async fn get_task(
    &self,
    token: &str,
    id: TaskId
  ) -> Result<Task> {
    self
      .call::<()>(
        Method::Get,
        paths::task(id),
        Some(token),
        None
      )
      .await?
      .json()
  }

  pub async fn create_task(
    &self,
    token: &str,
    task: &NewTask
  ) -> Result<()> {
    self
      .call(
        Method::Post,
        paths::TASKS.to_string(),
        Some(token),
        Some(task)
      )
      .await
      .map(drop)
  }

  pub async fn update_task(
    &self,
    token: &str,
    id: TaskId,
    update: &TaskUpdate
  ) -> Result<()> {
    self
      .call(
        Method::Put,
        paths::task(id),
        Some(token),
        Some(update)
      )
      .await
      .map(drop)
  }

  pub async fn delete_task(
    &self,
    token: &str,
    id: TaskId
  ) -> Result<()> {
    self
      .call::<()>(
        Method::Delete,
        paths::task(id),
        Some(token),
        None
      )
      .await
      .map(drop)
  }

  #[tracing::instrument(
    skip(self, method, token, body),
    fields(method = method.as_str())
  )]
  async fn call<B: Serialize>(
    &self,
    method: Method,
    path: String,
    token: Option<&str>,
    body: Option<&B>
  ) -> Result<ApiResponse> {
    let body = body
      .map(serde_json::to_string)
      .transpose()
      .map_err(|err| {
        ClientError::Decode(
          err.to_string()
        )
      })?;
    trace!(
      has_body = body.is_some(),
      "sending request"
    );

    let response = self
      .transport
      .send(ApiRequest {
        method,
        path,
        bearer: token
          .map(str::to_string),
        body
      })
      .await?;

    debug!(
      status = response.status,
      "backend responded"
    );
    response.into_result()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn server_message_prefers_message_then_error() {
    let both = ApiResponse {
      status: 401,
      body:   r#"{"message":"Invalid credentials","error":"x"}"#
        .to_string()
    };
    assert_eq!(
      both.server_message().as_deref(),
      Some("Invalid credentials")
    );

    let gin_style = ApiResponse {
      status: 409,
      body:   r#"{"error":"usuario ya existe"}"#
        .to_string()
    };
    assert_eq!(
      gin_style
        .server_message()
        .as_deref(),
      Some("usuario ya existe")
    );

    let html = ApiResponse {
      status: 502,
      body:   "<html>bad gateway</html>"
        .to_string()
    };
    assert_eq!(
      html.server_message(),
      None
    );
  }

  #[test]
  fn routes_embed_integer_ids() {
    assert_eq!(
      paths::task(TaskId(12)),
      "/tareas/12"
    );
    assert_eq!(
      paths::category(CategoryId(3)),
      "/categorias/3"
    );
  }
}
