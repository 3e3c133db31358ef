//! Error taxonomy shared by every front end.

use thiserror::Error;

/// Local input problems. Producing one of these never touches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("All fields are required.")]
  MissingFields,

  #[error("Passwords do not match.")]
  PasswordMismatch,

  #[error("Name is required.")]
  EmptyName,

  #[error("Please fill in the description and due date.")]
  MissingTaskFields,

  #[error("Invalid due date: {0}")]
  InvalidDueDate(String)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("{}", describe_http(.status, .message))]
  Http {
    status:  u16,
    message: Option<String>
  },

  #[error("request failed: {0}")]
  Transport(String),

  #[error("unexpected response: {0}")]
  Decode(String),

  #[error("session storage failed: {0}")]
  Storage(String),

  #[error("not logged in")]
  NotAuthenticated,

  #[error("session lost: {0}")]
  SessionLost(Box<ClientError>)
}

pub type Result<T> =
  std::result::Result<T, ClientError>;

impl ClientError {
  /// Front ends send the user back to login when this is true.
  pub fn is_session_lost(&self) -> bool {
    matches!(
      self,
      ClientError::SessionLost(_)
        | ClientError::NotAuthenticated
    )
  }

  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      ClientError::Validation(_)
    )
  }

  /// Fills in the operation's fallback text when the server sent no
  /// message of its own.
  pub fn with_fallback(
    self,
    fallback: &str
  ) -> Self {
    match self {
      | ClientError::Http {
        status,
        message: None
      } => ClientError::Http {
        status,
        message: Some(
          fallback.to_string()
        )
      },
      | other => other
    }
  }
}

fn describe_http(
  status: &u16,
  message: &Option<String>
) -> String {
  match message {
    | Some(message) => message.clone(),
    | None => {
      format!(
        "server responded with status \
         {status}"
      )
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fallback_only_fills_missing_message() {
    let bare = ClientError::Http {
      status:  500,
      message: None
    }
    .with_fallback("Could not save.");
    assert_eq!(
      bare.to_string(),
      "Could not save."
    );

    let server = ClientError::Http {
      status:  401,
      message: Some(
        "Invalid credentials".to_string()
      )
    }
    .with_fallback("Could not save.");
    assert_eq!(
      server.to_string(),
      "Invalid credentials"
    );
  }

  #[test]
  fn session_loss_is_detected() {
    let lost = ClientError::SessionLost(
      Box::new(ClientError::Transport(
        "offline".to_string()
      ))
    );
    assert!(lost.is_session_lost());
    assert!(
      !ClientError::Transport(
        "offline".to_string()
      )
      .is_session_lost()
    );
  }
}
