//! Session-aware orchestration of every user action.
//!
//! Each mutation is followed by exactly one refetch of the affected
//! collection, and the fresh collection is handed back so the caller can
//! replace its [`Snapshot`](crate::snapshot::Snapshot) wholesale.

use tracing::{
  info,
  instrument,
  warn
};

use crate::api::{
  Api,
  Transport
};
use crate::error::{
  ClientError,
  Result
};
use crate::model::{
  Category,
  CategoryId,
  Credentials,
  RegisterRequest,
  Session,
  Task,
  TaskId
};
use crate::session::SessionStore;
use crate::snapshot::Snapshot;
use crate::validate::{
  CategoryForm,
  RegistrationForm,
  TaskForm
};

pub const DEFAULT_AVATAR_URL: &str = "https://png.pngtree.com/png-clipart/20210915/ourmid/pngtree-avatar-placeholder-abstract-white-blue-green-png-image_3918476.jpg";

pub mod fallback {
  pub const LOGIN: &str = "There was a problem signing in. Check your credentials.";
  pub const REGISTER: &str =
    "Registration could not be completed.";
  pub const LOAD_CATEGORIES: &str =
    "Could not load categories.";
  pub const CREATE_CATEGORY: &str =
    "Could not create the category.";
  pub const UPDATE_CATEGORY: &str =
    "Could not update the category.";
  pub const DELETE_CATEGORY: &str =
    "Could not delete the category.";
  pub const LOAD_TASKS: &str =
    "Could not load tasks.";
  pub const LOAD_TASK: &str =
    "Could not load the task.";
  pub const CREATE_TASK: &str =
    "Could not create the task.";
  pub const UPDATE_TASK: &str =
    "Could not update the task.";
  pub const DELETE_TASK: &str =
    "Could not delete the task.";
}

pub struct TaskClient<T, S> {
  api:        Api<T>,
  session:    S,
  avatar_url: String
}

impl<T, S> TaskClient<T, S>
where
  T: Transport,
  S: SessionStore
{
  pub fn new(
    transport: T,
    session: S
  ) -> Self {
    Self {
      api: Api::new(transport),
      session,
      avatar_url: DEFAULT_AVATAR_URL
        .to_string()
    }
  }

  pub fn with_avatar_url(
    mut self,
    avatar_url: impl Into<String>
  ) -> Self {
    self.avatar_url = avatar_url.into();
    self
  }

  pub fn session_store(&self) -> &S {
    &self.session
  }

  /// Session guard: every protected view or command starts here.
  pub fn require_session(
    &self
  ) -> Result<Session> {
    self
      .session
      .load()
      .filter(|session| {
        !session.token.trim().is_empty()
      })
      .ok_or(ClientError::NotAuthenticated)
  }

  #[instrument(skip(self, password))]
  pub async fn login(
    &self,
    username: &str,
    password: &str
  ) -> Result<Session> {
    let credentials = Credentials {
      username: username
        .trim()
        .to_string(),
      password: password
        .trim()
        .to_string()
    };
    let session = self
      .api
      .login(&credentials)
      .await
      .map_err(|err| {
        err.with_fallback(fallback::LOGIN)
      })?;

    if session.token.trim().is_empty() {
      return Err(ClientError::Decode(
        "login response carried no \
         token"
          .to_string()
      ));
    }

    self.session.save(&session)?;
    info!(user = %session.user_name, "logged in");
    Ok(session)
  }

  #[instrument(skip_all, fields(username = %form.username.trim()))]
  pub async fn register(
    &self,
    form: &RegistrationForm
  ) -> Result<()> {
    let (username, password) =
      form.validate()?;
    let request = RegisterRequest {
      username,
      password,
      picture_url: self
        .avatar_url
        .clone()
    };
    self
      .api
      .register(&request)
      .await
      .map_err(|err| {
        err.with_fallback(
          fallback::REGISTER
        )
      })?;
    info!("registered account");
    Ok(())
  }

  pub fn logout(&self) {
    self.session.clear();
    info!("logged out");
  }

  /// Categories first, then tasks, so rows can resolve category names.
  /// Either read failing ends the session.
  #[instrument(skip(self))]
  pub async fn load_board(
    &self
  ) -> Result<Snapshot> {
    let session = self.require_session()?;
    let categories = self
      .api
      .list_categories(&session.token)
      .await
      .map_err(|err| {
        self.session_lost(
          err.with_fallback(
            fallback::LOAD_CATEGORIES
          )
        )
      })?;
    let tasks =
      self.fetch_tasks(&session).await?;
    info!(
      categories = categories.len(),
      tasks = tasks.len(),
      "loaded task board"
    );
    Ok(Snapshot::new(categories, tasks))
  }

  #[instrument(skip(self))]
  pub async fn refresh_tasks(
    &self
  ) -> Result<Vec<Task>> {
    let session = self.require_session()?;
    self.fetch_tasks(&session).await
  }

  #[instrument(skip(self))]
  pub async fn get_task(
    &self,
    id: TaskId
  ) -> Result<Task> {
    let session = self.require_session()?;
    self
      .api
      .get_task(&session.token, id)
      .await
      .map_err(|err| {
        err.with_fallback(
          fallback::LOAD_TASK
        )
      })
  }

  #[instrument(skip(self, form))]
  pub async fn create_task(
    &self,
    form: &TaskForm
  ) -> Result<Vec<Task>> {
    let task = form.to_new_task()?;
    let session = self.require_session()?;
    self
      .api
      .create_task(&session.token, &task)
      .await
      .map_err(|err| {
        err.with_fallback(
          fallback::CREATE_TASK
        )
      })?;
    info!("created task");
    self.fetch_tasks(&session).await
  }

  #[instrument(skip(self, form))]
  pub async fn update_task(
    &self,
    id: TaskId,
    form: &TaskForm
  ) -> Result<Vec<Task>> {
    let update = form.to_update()?;
    let session = self.require_session()?;
    self
      .api
      .update_task(
        &session.token,
        id,
        &update
      )
      .await
      .map_err(|err| {
        err.with_fallback(
          fallback::UPDATE_TASK
        )
      })?;
    info!("updated task");
    self.fetch_tasks(&session).await
  }

  /// `Ok(None)` when the user declined the confirmation; nothing was sent.
  #[instrument(skip(self, confirm))]
  pub async fn delete_task(
    &self,
    id: TaskId,
    confirm: impl FnOnce() -> bool
  ) -> Result<Option<Vec<Task>>> {
    let session = self.require_session()?;
    if !confirm() {
      return Ok(None);
    }
    self
      .api
      .delete_task(&session.token, id)
      .await
      .map_err(|err| {
        err.with_fallback(
          fallback::DELETE_TASK
        )
      })?;
    info!("deleted task");
    self.fetch_tasks(&session).await.map(Some)
  }

  /// Category page listing. Failures stay inline; the session survives.
  #[instrument(skip(self))]
  pub async fn list_categories(
    &self
  ) -> Result<Vec<Category>> {
    let session = self.require_session()?;
    self.fetch_categories(&session).await
  }

  #[instrument(skip(self, form))]
  pub async fn create_category(
    &self,
    form: &CategoryForm
  ) -> Result<Vec<Category>> {
    let draft = form.validate()?;
    let session = self.require_session()?;
    self
      .api
      .create_category(
        &session.token,
        &draft
      )
      .await
      .map_err(|err| {
        err.with_fallback(
          fallback::CREATE_CATEGORY
        )
      })?;
    info!(name = %draft.name, "created category");
    self.fetch_categories(&session).await
  }

  #[instrument(skip(self, form))]
  pub async fn update_category(
    &self,
    id: CategoryId,
    form: &CategoryForm
  ) -> Result<Vec<Category>> {
    let draft = form.validate()?;
    let session = self.require_session()?;
    self
      .api
      .update_category(
        &session.token,
        id,
        &draft
      )
      .await
      .map_err(|err| {
        err.with_fallback(
          fallback::UPDATE_CATEGORY
        )
      })?;
    info!("updated category");
    self.fetch_categories(&session).await
  }

  #[instrument(skip(self, confirm))]
  pub async fn delete_category(
    &self,
    id: CategoryId,
    confirm: impl FnOnce() -> bool
  ) -> Result<Option<Vec<Category>>> {
    let session = self.require_session()?;
    if !confirm() {
      return Ok(None);
    }
    self
      .api
      .delete_category(&session.token, id)
      .await
      .map_err(|err| {
        err.with_fallback(
          fallback::DELETE_CATEGORY
        )
      })?;
    info!("deleted category");
    self
      .fetch_categories(&session)
      .await
      .map(Some)
  }

  async fn fetch_tasks(
    &self,
    session: &Session
  ) -> Result<Vec<Task>> {
    self
      .api
      .list_tasks(&session.token)
      .await
      .map_err(|err| {
        self.session_lost(
          err.with_fallback(
            fallback::LOAD_TASKS
          )
        )
      })
  }

  async fn fetch_categories(
    &self,
    session: &Session
  ) -> Result<Vec<Category>> {
    self
      .api
      .list_categories(&session.token)
      .await
      .map_err(|err| {
        err.with_fallback(
          fallback::LOAD_CATEGORIES
        )
      })
  }

  fn session_lost(
    &self,
    err: ClientError
  ) -> ClientError {
    warn!(error = %err, "protected read failed; clearing session");
    self.session.clear();
    ClientError::SessionLost(Box::new(err))
  }
}
