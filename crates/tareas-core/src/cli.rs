use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use tareas_shared::{CategoryFilter, CategoryId, StatusFilter, TaskId, TaskStatus};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

/// Category argument for `edit`: a numeric id or `none` to unassign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryChoice {
    Unassigned,
    Id(CategoryId),
}

impl std::str::FromStr for CategoryChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("none") {
            return Ok(CategoryChoice::Unassigned);
        }
        s.parse::<CategoryId>().map(CategoryChoice::Id)
    }
}

impl CategoryChoice {
    pub fn into_option(self) -> Option<CategoryId> {
        match self {
            CategoryChoice::Unassigned => None,
            CategoryChoice::Id(id) => Some(id),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tareas",
    version,
    about = "Tareas: command-line client for the task/category backend",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Override a config key for this run.
    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in and store the session token.
    Login {
        username: String,
        #[arg(long, env = "TAREAS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account.
    Register {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Forget the stored session.
    Logout,
    /// Print the signed-in display name.
    Whoami,
    /// Show the task board.
    List {
        #[arg(long, default_value_t = StatusFilter::default())]
        status: StatusFilter,
        #[arg(long, default_value_t = CategoryFilter::All)]
        category: CategoryFilter,
    },
    /// Show a single task.
    Show { id: TaskId },
    /// Create a task.
    Add {
        description: String,
        #[arg(long)]
        due: String,
        #[arg(long, default_value = "not-started")]
        status: TaskStatus,
        #[arg(long)]
        category: Option<CategoryId>,
    },
    /// Edit a task; omitted fields keep their current values.
    Edit {
        id: TaskId,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        category: Option<CategoryChoice>,
    },
    /// Delete a task.
    Rm {
        id: TaskId,
        #[arg(long)]
        yes: bool,
    },
    /// List categories.
    Categories,
    /// Create a category.
    CategoryAdd {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a category; omitted fields keep their current values.
    CategoryEdit {
        id: CategoryId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a category.
    CategoryRm {
        id: CategoryId,
        #[arg(long)]
        yes: bool,
    },
}

impl Command {
    /// Subcommand name for log fields; never includes argument values.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Register { .. } => "register",
            Command::Logout => "logout",
            Command::Whoami => "whoami",
            Command::List { .. } => "list",
            Command::Show { .. } => "show",
            Command::Add { .. } => "add",
            Command::Edit { .. } => "edit",
            Command::Rm { .. } => "rm",
            Command::Categories => "categories",
            Command::CategoryAdd { .. } => "category-add",
            Command::CategoryEdit { .. } => "category-edit",
            Command::CategoryRm { .. } => "category-rm",
        }
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
