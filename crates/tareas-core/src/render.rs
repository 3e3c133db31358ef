use std::io::{self, IsTerminal, Write};

use chrono::NaiveDate;
use tareas_shared::snapshot::empty_board_message;
use tareas_shared::{Category, Snapshot, Task, TaskFilter, TaskRow, TaskStatus};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            color: cfg.color && io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, snapshot))]
    pub fn print_board(
        &self,
        snapshot: &Snapshot,
        filter: &TaskFilter,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        let rows = snapshot.visible(filter, today);
        self.write_board(io::stdout().lock(), &rows, filter, today)
    }

    pub fn write_board<W: Write>(
        &self,
        mut out: W,
        rows: &[TaskRow],
        filter: &TaskFilter,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        if rows.is_empty() {
            writeln!(out, "{}", empty_board_message(filter))?;
            return Ok(());
        }

        let headers = vec![
            "ID".to_string(),
            "Due".to_string(),
            "Status".to_string(),
            "Category".to_string(),
            "Description".to_string(),
        ];

        let table = rows
            .iter()
            .map(|row| {
                let due = row
                    .due
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                let due = match row.due {
                    Some(date) if date < today && row.status != TaskStatus::Done => {
                        self.paint(&due, "31")
                    }
                    _ => due,
                };
                vec![
                    self.paint(&row.id.to_string(), "33"),
                    due,
                    row.status.label().to_string(),
                    row.category.clone(),
                    row.description.clone(),
                ]
            })
            .collect();

        write_table(&mut out, headers, table)?;
        writeln!(out, "{} task(s)", rows.len())?;
        Ok(())
    }

    #[tracing::instrument(skip(self, task, category))]
    pub fn print_task(&self, task: &Task, category: &str) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "id          {}", task.id)?;
        writeln!(out, "description {}", task.description)?;
        writeln!(out, "status      {}", task.status.label())?;
        writeln!(
            out,
            "due         {}",
            task.tentative_due_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string())
        )?;
        writeln!(out, "category    {category}")?;
        if let Some(created) = task.created_at {
            writeln!(out, "created     {}", created.format("%Y-%m-%d %H:%M"))?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, categories))]
    pub fn print_categories(&self, categories: &[Category]) -> anyhow::Result<()> {
        self.write_categories(io::stdout().lock(), categories)
    }

    pub fn write_categories<W: Write>(
        &self,
        mut out: W,
        categories: &[Category],
    ) -> anyhow::Result<()> {
        if categories.is_empty() {
            writeln!(out, "No categories yet.")?;
            return Ok(());
        }

        let rows = categories
            .iter()
            .map(|category| {
                vec![
                    self.paint(&category.id.to_string(), "33"),
                    category.name.clone(),
                    category.description.clone().unwrap_or_default(),
                ]
            })
            .collect();

        write_table(
            &mut out,
            vec!["ID".to_string(), "Name".to_string(), "Description".to_string()],
            rows,
        )
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths: Vec<usize> = headers
        .iter()
        .map(|header| UnicodeWidthStr::width(header.as_str()))
        .collect();

    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    let last = column_count.saturating_sub(1);
    for (idx, header) in headers.iter().enumerate() {
        if idx == last {
            writeln!(writer, "{header}")?;
        } else {
            write!(writer, "{:width$} ", header, width = widths[idx])?;
        }
    }

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    writeln!(writer, "{}", rule.join(" "))?;

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx == last {
                writeln!(writer, "{cell}")?;
            } else {
                let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
                let padding = widths[idx].saturating_sub(visible_width);
                write!(writer, "{}{} ", cell, " ".repeat(padding))?;
            }
        }
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
