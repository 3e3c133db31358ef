use std::io::{self, BufRead, Write};

use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use tareas_shared::{
    CategoryForm, ClientError, RegistrationForm, SessionStore, Snapshot, TaskClient, TaskFilter,
    TaskForm, Transport,
};
use tracing::{debug, instrument, warn};

use crate::cli::Command;
use crate::render::Renderer;

fn explain(err: ClientError) -> anyhow::Error {
    if err.is_session_lost() {
        anyhow::Error::new(err).context("not signed in; run `tareas login <user>` first")
    } else {
        anyhow::Error::new(err)
    }
}

#[instrument(skip(client, renderer, command), fields(command = command.name()))]
pub async fn dispatch<T, S>(
    client: &TaskClient<T, S>,
    renderer: &Renderer,
    command: Command,
    today: NaiveDate,
) -> anyhow::Result<()>
where
    T: Transport,
    S: SessionStore,
{
    debug!("dispatching");

    match command {
        Command::Login { username, password } => {
            let session = client.login(&username, &password).await.map_err(explain)?;
            println!("Signed in as {}.", session.user_name);
        }
        Command::Register {
            username,
            password,
            confirm,
        } => {
            let form = RegistrationForm {
                username,
                password,
                confirm,
            };
            client.register(&form).await.map_err(explain)?;
            println!(
                "Registration complete. Sign in with `tareas login {}`.",
                form.username.trim()
            );
        }
        Command::Logout => {
            client.logout();
            println!("Signed out.");
        }
        Command::Whoami => {
            let session = client.require_session().map_err(explain)?;
            println!("{}", session.user_name);
        }
        Command::List { status, category } => {
            let snapshot = client.load_board().await.map_err(explain)?;
            let filter = TaskFilter { status, category };
            renderer.print_board(&snapshot, &filter, today)?;
        }
        Command::Show { id } => {
            let task = client.get_task(id).await.map_err(explain)?;
            let categories = match client.list_categories().await {
                Ok(categories) => categories,
                Err(err) => {
                    warn!(error = %err, "could not resolve category name");
                    Vec::new()
                }
            };
            let lookup = Snapshot::new(categories, Vec::new());
            renderer.print_task(&task, lookup.category_name(task.category_id))?;
        }
        Command::Add {
            description,
            due,
            status,
            category,
        } => {
            let form = TaskForm {
                description,
                due_date: due,
                status,
                category,
            };
            let tasks = client.create_task(&form).await.map_err(explain)?;
            println!("Created task. {} task(s) on the server.", tasks.len());
        }
        Command::Edit {
            id,
            description,
            due,
            status,
            category,
        } => {
            let snapshot = client.load_board().await.map_err(explain)?;
            let current = snapshot
                .task(id)
                .ok_or_else(|| anyhow!("task {id} not found"))?;

            let mut form = TaskForm::from_task(current);
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(due) = due {
                form.due_date = due;
            }
            if let Some(status) = status {
                form.status = status;
            }
            if let Some(category) = category {
                form.category = category.into_option();
            }

            client.update_task(id, &form).await.map_err(explain)?;
            println!("Updated task {id}.");
        }
        Command::Rm { id, yes } => {
            let outcome = client
                .delete_task(id, || yes || prompt(&format!("Delete task {id}?")))
                .await
                .map_err(explain)?;
            match outcome {
                Some(_) => println!("Deleted task {id}."),
                None => println!("Kept task {id}."),
            }
        }
        Command::Categories => {
            let categories = client.list_categories().await.map_err(explain)?;
            renderer.print_categories(&categories)?;
        }
        Command::CategoryAdd { name, description } => {
            let form = CategoryForm { name, description };
            let categories = client.create_category(&form).await.map_err(explain)?;
            renderer.print_categories(&categories)?;
        }
        Command::CategoryEdit {
            id,
            name,
            description,
        } => {
            let categories = client.list_categories().await.map_err(explain)?;
            let current = categories
                .iter()
                .find(|category| category.id == id)
                .ok_or_else(|| anyhow!("category {id} not found"))?;

            let mut form = CategoryForm::from_category(current);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(description) = description {
                form.description = description;
            }

            let categories = client.update_category(id, &form).await.map_err(explain)?;
            renderer.print_categories(&categories)?;
        }
        Command::CategoryRm { id, yes } => {
            let outcome = client
                .delete_category(id, || yes || prompt(&format!("Delete category {id}?")))
                .await
                .map_err(explain)?;
            match outcome {
                Some(categories) => renderer.print_categories(&categories)?,
                None => println!("Kept category {id}."),
            }
        }
    }

    Ok(())
}

fn prompt(question: &str) -> bool {
    match ask(question) {
        Ok(answer) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(err) => {
            warn!(error = %err, "could not read confirmation; treating as no");
            false
        }
    }
}

fn ask(question: &str) -> anyhow::Result<String> {
    let mut out = io::stdout().lock();
    write!(out, "{question} [y/N] ")?;
    out.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed reading confirmation")?;
    Ok(line.trim().to_string())
}
