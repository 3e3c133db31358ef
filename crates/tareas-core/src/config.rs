use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use serde::Deserialize;
use tareas_shared::client::DEFAULT_AVATAR_URL;
use tracing::{
  debug,
  info,
  warn
};

pub const DEFAULT_BASE_URL: &str =
  "http://localhost:8080";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub base_url:     String,
  pub data_dir:     String,
  pub timeout_secs: u64,
  pub avatar_url:   String,
  pub color:        bool,
  #[serde(skip)]
  pub loaded_file:  Option<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base_url:     DEFAULT_BASE_URL
        .to_string(),
      data_dir:     "~/.tareas"
        .to_string(),
      timeout_secs: 30,
      avatar_url:   DEFAULT_AVATAR_URL
        .to_string(),
      color:        true,
      loaded_file:  None
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    config_override
  ))]
  pub fn load(
    config_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = match resolve_config_path(
      config_override
    )? {
      | Some(path) => {
        info!(config = %path.display(), "loading config");
        Self::load_file(&path)?
      }
      | None => {
        warn!(
          "no config file found; using \
           defaults"
        );
        Config::default()
      }
    };

    if let Ok(base_url) =
      std::env::var("TAREAS_BASE_URL")
    {
      debug!(base_url = %base_url, "base url from environment");
      cfg.base_url = base_url;
    }

    Ok(cfg)
  }

  fn load_file(
    path: &Path
  ) -> anyhow::Result<Self> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;
    let mut cfg: Config =
      toml::from_str(&text)
        .with_context(|| {
          format!(
            "failed to parse {}",
            path.display()
          )
        })?;
    cfg.loaded_file = Some(path);
    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      debug!(key = %key, value = %value, "applying override");
      match key.as_str() {
        | "base_url" => {
          self.base_url = value
        }
        | "data_dir" => {
          self.data_dir = value
        }
        | "avatar_url" => {
          self.avatar_url = value
        }
        | "timeout_secs" => {
          self.timeout_secs = value
            .parse()
            .with_context(|| {
              format!(
                "invalid timeout_secs: \
                 {value}"
              )
            })?
        }
        | "color" => {
          self.color = parse_bool(&value)
            .ok_or_else(|| {
              anyhow!(
                "invalid color setting: \
                 {value}"
              )
            })?
        }
        | other => {
          return Err(anyhow!(
            "unknown config key: {other}"
          ));
        }
      }
    }
    Ok(())
  }

  pub fn base_url(&self) -> &str {
    self.base_url.trim_end_matches('/')
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = if let Some(path) =
    override_dir
  {
    path.to_path_buf()
  } else {
    expand_tilde(Path::new(
      &cfg.data_dir
    ))
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_config_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(config_env) =
    std::env::var("TAREAS_CONFIG")
  {
    if config_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      config_env
    )));
  }

  let Some(config_dir) = dirs::config_dir()
  else {
    return Ok(None);
  };
  let candidate = config_dir
    .join("tareas")
    .join("config.toml");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Some(true),
    | "0" | "n" | "no" | "off"
    | "false" => Some(false),
    | _ => None
  }
}
