use std::cell::{
  Cell,
  RefCell
};

use chrono::NaiveDate;
use serde_json::{
  Value,
  json
};
use tareas_shared::api::paths;
use tareas_shared::{
  ApiRequest,
  ApiResponse,
  CategoryFilter,
  CategoryForm,
  CategoryId,
  ClientError,
  MemorySessionStore,
  Method,
  RegistrationForm,
  Session,
  SessionStore,
  StatusFilter,
  TaskClient,
  TaskFilter,
  TaskForm,
  TaskId,
  TaskStatus,
  Transport,
  ValidationError
};

const TOKEN: &str = "tok-1";

/// In-memory stand-in for the REST backend that records every request.
#[derive(Default)]
struct FakeBackend {
  log:        RefCell<Vec<ApiRequest>>,
  tasks:      RefCell<Vec<Value>>,
  categories: RefCell<Vec<Value>>,
  next_id:    Cell<i64>,
  fail_path:  RefCell<Option<(String, u16)>>
}

impl FakeBackend {
  fn with_data(
    categories: Vec<Value>,
    tasks: Vec<Value>
  ) -> Self {
    let backend = Self::default();
    *backend.categories.borrow_mut() =
      categories;
    *backend.tasks.borrow_mut() = tasks;
    backend.next_id.set(100);
    backend
  }

  fn fail(
    &self,
    path: &str,
    status: u16
  ) {
    *self.fail_path.borrow_mut() =
      Some((path.to_string(), status));
  }

  fn requests(&self) -> Vec<ApiRequest> {
    self.log.borrow().clone()
  }

  fn count(
    &self,
    method: Method,
    path: &str
  ) -> usize {
    self
      .log
      .borrow()
      .iter()
      .filter(|r| {
        r.method == method && r.path == path
      })
      .count()
  }

  fn next_id(&self) -> i64 {
    let id = self.next_id.get();
    self.next_id.set(id + 1);
    id
  }

  fn body(request: &ApiRequest) -> Value {
    request
      .body
      .as_deref()
      .map(|raw| {
        serde_json::from_str(raw).unwrap()
      })
      .unwrap_or(Value::Null)
  }

  fn reply(
    status: u16,
    body: Value
  ) -> ApiResponse {
    ApiResponse {
      status,
      body: body.to_string()
    }
  }

  fn handle(
    &self,
    request: &ApiRequest
  ) -> ApiResponse {
    if let Some((path, status)) =
      self.fail_path.borrow().as_ref()
      && *path == request.path
    {
      return Self::reply(
        *status,
        json!({})
      );
    }

    let public = request.path
      == paths::LOGIN
      || request.path == paths::USERS;
    if !public
      && request.bearer.as_deref()
        != Some(TOKEN)
    {
      return Self::reply(
        401,
        json!({"error": "token requerido"})
      );
    }

    let body = Self::body(request);
    let segments: Vec<&str> = request
      .path
      .trim_start_matches('/')
      .split('/')
      .collect();

    match (request.method, segments.as_slice()) {
      | (Method::Post, ["usuarios", "iniciar-sesion"]) => {
        if body["password"] == "secret" {
          Self::reply(
            200,
            json!({"token": TOKEN, "user_name": body["username"]})
          )
        } else {
          Self::reply(
            401,
            json!({"message": "Invalid credentials"})
          )
        }
      }
      | (Method::Post, ["usuarios"]) => {
        Self::reply(
          201,
          json!({"id": 1, "username": body["username"]})
        )
      }
      | (Method::Get, ["categorias"]) => {
        Self::reply(
          200,
          Value::Array(
            self.categories.borrow().clone()
          )
        )
      }
      | (Method::Post, ["categorias"]) => {
        let mut category = body.clone();
        category["id"] =
          json!(self.next_id());
        self
          .categories
          .borrow_mut()
          .push(category.clone());
        Self::reply(201, category)
      }
      | (Method::Put, ["categorias", id]) => {
        let id: i64 = id.parse().unwrap();
        for category in self
          .categories
          .borrow_mut()
          .iter_mut()
        {
          if category["id"] == id {
            category["name"] =
              body["name"].clone();
            category["description"] =
              body["description"].clone();
          }
        }
        Self::reply(200, json!({}))
      }
      | (Method::Delete, ["categorias", id]) => {
        let id: i64 = id.parse().unwrap();
        self
          .categories
          .borrow_mut()
          .retain(|c| c["id"] != id);
        Self::reply(204, Value::Null)
      }
      | (Method::Get, ["tareas", "usuario"]) => {
        Self::reply(
          200,
          Value::Array(
            self.tasks.borrow().clone()
          )
        )
      }
      | (Method::Get, ["tareas", id]) => {
        let id: i64 = id.parse().unwrap();
        match self
          .tasks
          .borrow()
          .iter()
          .find(|t| t["id"] == id)
        {
          | Some(task) => {
            Self::reply(200, task.clone())
          }
          | None => Self::reply(
            404,
            json!({"error": "no existe o no te pertenece"})
          )
        }
      }
      | (Method::Post, ["tareas"]) => {
        let mut task = body.clone();
        task["id"] = json!(self.next_id());
        self
          .tasks
          .borrow_mut()
          .push(task.clone());
        Self::reply(201, task)
      }
      | (Method::Put, ["tareas", id]) => {
        let id: i64 = id.parse().unwrap();
        for task in
          self.tasks.borrow_mut().iter_mut()
        {
          if task["id"] == id {
            let mut updated = body.clone();
            updated["id"] = json!(id);
            *task = updated;
          }
        }
        Self::reply(200, json!({}))
      }
      | (Method::Delete, ["tareas", id]) => {
        let id: i64 = id.parse().unwrap();
        self
          .tasks
          .borrow_mut()
          .retain(|t| t["id"] != id);
        Self::reply(204, Value::Null)
      }
      | _ => Self::reply(
        404,
        json!({"error": "not found"})
      )
    }
  }
}

impl Transport for &FakeBackend {
  async fn send(
    &self,
    request: ApiRequest
  ) -> tareas_shared::error::Result<ApiResponse>
  {
    let response = self.handle(&request);
    self.log.borrow_mut().push(request);
    Ok(response)
  }
}

fn logged_in()
-> MemorySessionStore {
  MemorySessionStore::with_session(
    Session {
      token:     TOKEN.to_string(),
      user_name: "ana".to_string()
    }
  )
}

fn day(d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 5, d)
    .unwrap()
}

fn seeded() -> FakeBackend {
  FakeBackend::with_data(
    vec![
      json!({"id": 1, "name": "Home"}),
      json!({"id": 2, "name": "Work", "description": "office"}),
    ],
    vec![
      json!({"id": 10, "description": "Buy milk", "tentative_due_date": "2024-05-01", "status": "Sin Empezar"}),
      json!({"id": 11, "description": "Report", "tentative_due_date": "2024-05-02", "status": "Empezada", "category_id": 2}),
      json!({"id": 12, "description": "Laundry", "tentative_due_date": "2024-05-01", "status": "Finalizada", "category_id": 1}),
    ]
  )
}

#[tokio::test]
async fn login_with_wrong_password_shows_server_message() {
  let backend = FakeBackend::default();
  let client = TaskClient::new(
    &backend,
    MemorySessionStore::default()
  );

  let err = client
    .login("ana", "wrong")
    .await
    .unwrap_err();

  assert_eq!(
    err.to_string(),
    "Invalid credentials"
  );
  assert!(
    client.session_store().load().is_none()
  );
  assert!(matches!(
    client.require_session(),
    Err(ClientError::NotAuthenticated)
  ));
}

#[tokio::test]
async fn login_persists_token_and_display_name() {
  let backend = FakeBackend::default();
  let client = TaskClient::new(
    &backend,
    MemorySessionStore::default()
  );

  let session = client
    .login("  ana ", "secret")
    .await
    .unwrap();

  assert_eq!(session.token, TOKEN);
  assert_eq!(session.user_name, "ana");
  assert_eq!(
    client.require_session().unwrap(),
    session
  );
  let sent = &backend.requests()[0];
  assert_eq!(sent.bearer, None);
  assert_eq!(
    FakeBackend::body(sent)["username"],
    "ana"
  );

  client.logout();
  assert!(client.require_session().is_err());
}

#[tokio::test]
async fn register_validates_before_any_request() {
  let backend = FakeBackend::default();
  let client = TaskClient::new(
    &backend,
    MemorySessionStore::default()
  );

  let mismatch = RegistrationForm {
    username: "ana".to_string(),
    password: "secret".to_string(),
    confirm:  "other".to_string()
  };
  let err = client
    .register(&mismatch)
    .await
    .unwrap_err();
  assert_eq!(
    err,
    ClientError::Validation(
      ValidationError::PasswordMismatch
    )
  );
  assert!(backend.requests().is_empty());

  let ok = RegistrationForm {
    confirm: "secret".to_string(),
    ..mismatch
  };
  client.register(&ok).await.unwrap();
  let body =
    FakeBackend::body(&backend.requests()[0]);
  assert_eq!(body["username"], "ana");
  assert!(body["picture_url"].is_string());
}

#[tokio::test]
async fn board_loads_categories_before_tasks() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let snapshot =
    client.load_board().await.unwrap();

  let order: Vec<String> = backend
    .requests()
    .into_iter()
    .map(|r| r.path)
    .collect();
  assert_eq!(
    order,
    vec![paths::CATEGORIES, paths::USER_TASKS]
  );
  assert!(
    backend
      .requests()
      .iter()
      .all(|r| r.bearer.as_deref()
        == Some(TOKEN))
  );

  let rows = snapshot
    .visible(&TaskFilter::default(), day(1));
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].description, "Buy milk");

  let today = snapshot.visible(
    &TaskFilter::default()
      .with_status(StatusFilter::Today),
    day(1)
  );
  let today_ids: Vec<TaskId> =
    today.iter().map(|r| r.id).collect();
  assert_eq!(
    today_ids,
    vec![TaskId(10), TaskId(12)]
  );
  assert_eq!(today[1].category, "Home");

  let work = snapshot.visible(
    &TaskFilter {
      status:   StatusFilter::Status(
        TaskStatus::InProgress
      ),
      category: CategoryFilter::Only(
        CategoryId(2)
      )
    },
    day(1)
  );
  assert_eq!(work.len(), 1);
  assert_eq!(work[0].category, "Work");
}

#[tokio::test]
async fn failed_board_read_purges_session() {
  let backend = seeded();
  backend.fail(paths::USER_TASKS, 500);
  let client =
    TaskClient::new(&backend, logged_in());

  let err =
    client.load_board().await.unwrap_err();

  assert!(err.is_session_lost());
  assert!(
    client.session_store().load().is_none()
  );
}

#[tokio::test]
async fn guard_blocks_board_without_session() {
  let backend = seeded();
  let client = TaskClient::new(
    &backend,
    MemorySessionStore::default()
  );

  let err =
    client.load_board().await.unwrap_err();
  assert_eq!(err, ClientError::NotAuthenticated);
  assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn create_task_omits_unset_category_and_refetches_once() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let form = TaskForm {
    description: " Walk dog ".to_string(),
    due_date:    "2024-05-03".to_string(),
    status:      TaskStatus::NotStarted,
    category:    None
  };
  let tasks =
    client.create_task(&form).await.unwrap();

  let create = backend
    .requests()
    .into_iter()
    .find(|r| r.method == Method::Post)
    .unwrap();
  let body = FakeBackend::body(&create);
  assert_eq!(body["description"], "Walk dog");
  assert!(
    body
      .as_object()
      .unwrap()
      .get("category_id")
      .is_none()
  );
  assert_eq!(
    backend
      .count(Method::Get, paths::USER_TASKS),
    1
  );
  assert_eq!(tasks.len(), 4);
  assert!(
    tasks
      .iter()
      .any(|t| t.description == "Walk dog")
  );
}

#[tokio::test]
async fn create_task_with_category_sends_number() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let form = TaskForm {
    description: "Slides".to_string(),
    due_date:    "2024-05-03".to_string(),
    status:      TaskStatus::InProgress,
    category:    Some(CategoryId(2))
  };
  client.create_task(&form).await.unwrap();

  let body = FakeBackend::body(
    &backend.requests()[0]
  );
  assert_eq!(body["category_id"], json!(2));
  assert_eq!(body["status"], "Empezada");
}

#[tokio::test]
async fn invalid_task_form_sends_nothing() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let err = client
    .create_task(&TaskForm::default())
    .await
    .unwrap_err();

  assert!(err.is_validation());
  assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn update_task_always_sends_category_field() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let form = TaskForm {
    description: "Buy oat milk".to_string(),
    due_date:    "2024-05-01".to_string(),
    status:      TaskStatus::Done,
    category:    None
  };
  let tasks = client
    .update_task(TaskId(10), &form)
    .await
    .unwrap();

  let put = &backend.requests()[0];
  assert_eq!(put.method, Method::Put);
  assert_eq!(put.path, "/tareas/10");
  assert_eq!(
    FakeBackend::body(put)["category_id"],
    Value::Null
  );
  assert_eq!(
    backend
      .count(Method::Get, paths::USER_TASKS),
    1
  );
  let updated = tasks
    .iter()
    .find(|t| t.id == TaskId(10))
    .unwrap();
  assert_eq!(updated.status, TaskStatus::Done);
  assert_eq!(updated.description, "Buy oat milk");
}

#[tokio::test]
async fn undated_task_status_can_be_edited() {
  let backend = FakeBackend::with_data(
    vec![],
    vec![json!({"id": 20, "description": "Someday", "tentative_due_date": null, "status": "Sin Empezar"})]
  );
  let client =
    TaskClient::new(&backend, logged_in());

  let snapshot =
    client.load_board().await.unwrap();
  let undated =
    snapshot.task(TaskId(20)).unwrap();
  assert_eq!(
    undated.tentative_due_date,
    None
  );

  let form = TaskForm {
    status: TaskStatus::Done,
    ..TaskForm::from_task(undated)
  };
  let tasks = client
    .update_task(TaskId(20), &form)
    .await
    .unwrap();

  let put = backend
    .requests()
    .into_iter()
    .find(|r| r.method == Method::Put)
    .unwrap();
  let body = FakeBackend::body(&put);
  assert_eq!(
    body["tentative_due_date"],
    Value::Null
  );
  assert_eq!(body["status"], "Finalizada");
  assert_eq!(tasks[0].status, TaskStatus::Done);
  assert_eq!(
    tasks[0].tentative_due_date,
    None
  );
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let outcome = client
    .delete_task(TaskId(10), || false)
    .await
    .unwrap();

  assert_eq!(outcome, None);
  assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn confirmed_delete_refetches_tasks() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let tasks = client
    .delete_task(TaskId(10), || true)
    .await
    .unwrap()
    .unwrap();

  assert_eq!(tasks.len(), 2);
  assert_eq!(
    backend.count(Method::Delete, "/tareas/10"),
    1
  );
  assert_eq!(
    backend
      .count(Method::Get, paths::USER_TASKS),
    1
  );
}

#[tokio::test]
async fn failed_mutation_keeps_session_and_uses_fallback() {
  let backend = seeded();
  backend.fail("/tareas/10", 500);
  let client =
    TaskClient::new(&backend, logged_in());

  let form = TaskForm {
    description: "x".to_string(),
    due_date:    "2024-05-01".to_string(),
    ..TaskForm::default()
  };
  let err = client
    .update_task(TaskId(10), &form)
    .await
    .unwrap_err();

  assert_eq!(
    err.to_string(),
    "Could not update the task."
  );
  assert!(!err.is_session_lost());
  assert!(client.require_session().is_ok());
  assert_eq!(
    backend
      .count(Method::Get, paths::USER_TASKS),
    0
  );
}

#[tokio::test]
async fn empty_category_name_never_hits_network() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let err = client
    .create_category(&CategoryForm {
      name:        "  ".to_string(),
      description: "misc".to_string()
    })
    .await
    .unwrap_err();

  assert_eq!(
    err,
    ClientError::Validation(
      ValidationError::EmptyName
    )
  );
  assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn renaming_category_to_blank_is_rejected() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let err = client
    .update_category(
      CategoryId(1),
      &CategoryForm {
        name:        String::new(),
        description: "kept".to_string()
      }
    )
    .await
    .unwrap_err();

  assert_eq!(
    err,
    ClientError::Validation(
      ValidationError::EmptyName
    )
  );
  assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn category_mutations_refetch_the_list() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let after_create = client
    .create_category(&CategoryForm {
      name:        "Garden".to_string(),
      description: String::new()
    })
    .await
    .unwrap();
  assert_eq!(after_create.len(), 3);

  let garden = after_create
    .iter()
    .find(|c| c.name == "Garden")
    .unwrap()
    .id;
  let after_update = client
    .update_category(
      garden,
      &CategoryForm {
        name:        "Yard".to_string(),
        description: "outside".to_string()
      }
    )
    .await
    .unwrap();
  assert!(
    after_update
      .iter()
      .any(|c| c.name == "Yard")
  );

  let after_delete = client
    .delete_category(garden, || true)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(after_delete.len(), 2);
  assert_eq!(
    backend
      .count(Method::Get, paths::CATEGORIES),
    3
  );
}

#[tokio::test]
async fn category_list_failure_keeps_session() {
  let backend = seeded();
  backend.fail(paths::CATEGORIES, 503);
  let client =
    TaskClient::new(&backend, logged_in());

  let err = client
    .list_categories()
    .await
    .unwrap_err();

  assert_eq!(
    err.to_string(),
    "Could not load categories."
  );
  assert!(client.require_session().is_ok());
}

#[tokio::test]
async fn get_task_reports_server_message() {
  let backend = seeded();
  let client =
    TaskClient::new(&backend, logged_in());

  let task = client
    .get_task(TaskId(11))
    .await
    .unwrap();
  assert_eq!(
    task.tentative_due_date,
    Some(day(2))
  );

  let err = client
    .get_task(TaskId(999))
    .await
    .unwrap_err();
  assert_eq!(
    err.to_string(),
    "no existe o no te pertenece"
  );
}
