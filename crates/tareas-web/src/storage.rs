use tareas_shared::error::{
  ClientError,
  Result
};
use tareas_shared::{
  Session,
  SessionStore
};

const TOKEN_KEY: &str = "authToken";
const USER_NAME_KEY: &str = "userName";

fn local_storage()
-> Option<web_sys::Storage> {
  web_sys::window().and_then(|window| {
    window
      .local_storage()
      .ok()
      .flatten()
  })
}

/// Session kept in the browser's local storage under `authToken` and
/// `userName`.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
)]
pub struct LocalStorageSession;

impl SessionStore for LocalStorageSession {
  fn load(&self) -> Option<Session> {
    let storage = local_storage()?;
    let token = storage
      .get_item(TOKEN_KEY)
      .ok()
      .flatten()?;
    let user_name = storage
      .get_item(USER_NAME_KEY)
      .ok()
      .flatten()
      .unwrap_or_default();

    Some(Session { token, user_name })
  }

  fn save(
    &self,
    session: &Session
  ) -> Result<()> {
    let storage = local_storage()
      .ok_or_else(|| {
        ClientError::Storage(
          "local storage is unavailable"
            .to_string()
        )
      })?;

    storage
      .set_item(
        TOKEN_KEY,
        &session.token
      )
      .and_then(|()| {
        storage.set_item(
          USER_NAME_KEY,
          &session.user_name
        )
      })
      .map_err(|err| {
        ClientError::Storage(format!(
          "{err:?}"
        ))
      })
  }

  fn clear(&self) {
    if let Some(storage) =
      local_storage()
    {
      let _ =
        storage.remove_item(TOKEN_KEY);
      let _ = storage
        .remove_item(USER_NAME_KEY);
    }
  }
}
