use std::cell::RefCell;

use crate::error::Result;
use crate::model::Session;

/// Persistent home of the login token and display name.
pub trait SessionStore {
  fn load(&self) -> Option<Session>;

  fn save(
    &self,
    session: &Session
  ) -> Result<()>;

  fn clear(&self);
}

/// Process-local store, used by tests and throwaway clients.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
  current: RefCell<Option<Session>>
}

impl MemorySessionStore {
  pub fn with_session(
    session: Session
  ) -> Self {
    Self {
      current: RefCell::new(Some(
        session
      ))
    }
  }
}

impl SessionStore for MemorySessionStore {
  fn load(&self) -> Option<Session> {
    self.current.borrow().clone()
  }

  fn save(
    &self,
    session: &Session
  ) -> Result<()> {
    *self.current.borrow_mut() =
      Some(session.clone());
    Ok(())
  }

  fn clear(&self) {
    self.current.borrow_mut().take();
  }
}
