//! Domain model and client logic shared by the command line and browser
//! front ends. Nothing in here touches a concrete HTTP stack or storage
//! medium; both arrive through [`api::Transport`] and
//! [`session::SessionStore`].

pub mod api;
pub mod client;
pub mod error;
pub mod filter;
pub mod model;
pub mod session;
pub mod snapshot;
pub mod validate;

pub use api::{
  Api,
  ApiRequest,
  ApiResponse,
  Method,
  Transport
};
pub use client::TaskClient;
pub use error::{
  ClientError,
  ValidationError
};
pub use filter::{
  CategoryFilter,
  StatusFilter,
  TaskFilter
};
pub use model::{
  Category,
  CategoryId,
  Session,
  Task,
  TaskId,
  TaskStatus
};
pub use session::{
  MemorySessionStore,
  SessionStore
};
pub use snapshot::{
  Snapshot,
  TaskRow
};
pub use validate::{
  CategoryForm,
  RegistrationForm,
  TaskForm
};
