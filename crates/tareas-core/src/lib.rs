pub mod cli;
pub mod commands;
pub mod config;
pub mod http;
pub mod render;
pub mod session;

use std::ffi::OsString;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tareas_shared::TaskClient;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting tareas CLI"
  );

  let mut cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .rc_overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  )?;
  if let Some(base_url) = cli.base_url {
    cfg.base_url = base_url;
  }
  debug!(base_url = %cfg.base_url(), "resolved backend");

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let transport =
    http::HttpTransport::new(
      cfg.base_url(),
      Duration::from_secs(
        cfg.timeout_secs
      )
    )?;
  let client = TaskClient::new(
    transport,
    session::FileSessionStore::new(
      &data_dir
    )
  )
  .with_avatar_url(
    cfg.avatar_url.clone()
  );
  let renderer =
    render::Renderer::new(&cfg);

  let runtime =
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .context(
        "failed to start async runtime"
      )?;

  let today = Local::now().date_naive();
  runtime.block_on(commands::dispatch(
    &client,
    &renderer,
    cli.command,
    today
  ))?;

  info!("done");
  Ok(())
}
