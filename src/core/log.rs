use crate::core::access::Session;
use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const MAX_OP_WIDTH: usize = 60;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex"));

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Colour per audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "register" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "payroll" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)`, cut to the column width on visible characters.
fn op_target_cell(entry: &LogEntry) -> String {
    let color = color_for_operation(&entry.operation);
    let visible = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let truncated = if visible.chars().count() > MAX_OP_WIDTH {
        let mut s: String = visible.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    match truncated.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(truncated.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool, session: &Session) -> AppResult<()> {
        session.require_admin()?;
        let entries = load_log(&pool.conn)?;

        println!("📜 Internal log:\n");
        if entries.is_empty() {
            return Ok(());
        }

        let cells: Vec<String> = entries.iter().map(op_target_cell).collect();
        let op_w = cells
            .iter()
            .map(|c| strip_ansi(c).chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        for (entry, cell) in entries.iter().zip(cells) {
            let date = chrono::DateTime::parse_from_rfc3339(&entry.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or_else(|_| entry.date.clone());
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&cell).chars().count()));

            println!(
                "{:>id_w$}: {:<19} | {}{} => {}",
                entry.id,
                date,
                cell,
                padding,
                entry.message,
                id_w = id_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: &str, target: &str) -> LogEntry {
        LogEntry {
            id: 1,
            date: String::new(),
            operation: op.into(),
            target: target.into(),
            message: String::new(),
        }
    }

    #[test]
    fn long_targets_are_cut_to_the_column() {
        let cell = op_target_cell(&entry("backup", &"x".repeat(100)));
        let visible = strip_ansi(&cell);
        assert_eq!(visible.chars().count(), MAX_OP_WIDTH);
        assert!(visible.ends_with("..."));
    }

    #[test]
    fn operation_without_target() {
        assert_eq!(strip_ansi(&op_target_cell(&entry("init", ""))), "init");
    }
}
