use gloo::net::http::{
  Method as HttpMethod,
  RequestBuilder
};
use tareas_shared::error::{
  ClientError,
  Result
};
use tareas_shared::{
  ApiRequest,
  ApiResponse,
  Method,
  Transport
};

pub const DEFAULT_BASE_URL: &str =
  "http://localhost:8080";

/// Backend root baked in at build time via `TAREAS_BASE_URL`.
pub fn base_url() -> &'static str {
  option_env!("TAREAS_BASE_URL")
    .unwrap_or(DEFAULT_BASE_URL)
    .trim_end_matches('/')
}

/// Browser `fetch` transport.
#[derive(Debug, Clone, PartialEq)]
pub struct GlooTransport {
  base_url: String
}

impl Default for GlooTransport {
  fn default() -> Self {
    Self::new(base_url())
  }
}

impl GlooTransport {
  pub fn new(base_url: &str) -> Self {
    Self {
      base_url: base_url
        .trim_end_matches('/')
        .to_string()
    }
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}{}",
      self.base_url, path
    )
  }
}

fn http_method(
  method: Method
) -> HttpMethod {
  match method {
    | Method::Get => HttpMethod::GET,
    | Method::Post => HttpMethod::POST,
    | Method::Put => HttpMethod::PUT,
    | Method::Delete => {
      HttpMethod::DELETE
    }
  }
}

fn transport_error(
  err: gloo::net::Error
) -> ClientError {
  ClientError::Transport(
    err.to_string()
  )
}

impl Transport for GlooTransport {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse> {
    let url = self.url(&request.path);
    tracing::debug!(
      method = request.method.as_str(),
      url = %url,
      "sending request"
    );

    let mut builder =
      RequestBuilder::new(&url)
        .method(http_method(
          request.method
        ))
        .header(
          "Accept",
          "application/json"
        );

    if let Some(token) =
      request.bearer.as_deref()
    {
      builder = builder.header(
        "Authorization",
        &format!("Bearer {token}")
      );
    }

    let prepared = match request.body {
      | Some(body) => builder
        .header(
          "Content-Type",
          "application/json"
        )
        .body(body),
      | None => builder.build()
    }
    .map_err(transport_error)?;

    let response = prepared
      .send()
      .await
      .map_err(|err| {
        tracing::warn!(url = %url, error = %err, "request failed");
        transport_error(err)
      })?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(transport_error)?;
    tracing::debug!(
      status,
      bytes = body.len(),
      "received response"
    );

    Ok(ApiResponse { status, body })
  }
}
