// src/commands.rs

//! Line-oriented commands for terminals where the full-screen UI is not wanted.

use crate::{
    album::load_solutions,
    api::ApiClient,
    chat::{ChatSession, Delivery},
    config::get_config,
    models::{Analytics, Solution},
};
use anyhow::{anyhow, Result};
use colored::*;
use prettytable::{format, Cell, Row, Table};
use rustyline::{error::ReadlineError, DefaultEditor};
use textwrap::wrap;
use tracing::info;

const PROMPT: &str = "you> ";
const BOT_PREFIX: &str = "bot> ";
const DEFAULT_WIDTH: u16 = 80;
const QUIT_COMMAND: &str = "/quit";

/// Interactive chat on stdin. Ends on `/quit`, Ctrl-C or end of input.
pub async fn run_repl() -> Result<()> {
    let client = ApiClient::new(&get_config());
    let mut session = ChatSession::new();
    let mut rl = DefaultEditor::new().map_err(|e| anyhow!("failed to open line editor: {}", e))?;

    println!("{}", "Unified Web Platform chat".bright_cyan().bold());
    println!("{}", format!("Type {} to leave.", QUIT_COMMAND).dimmed());

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(anyhow!("failed to read input: {}", e)),
        };

        if line.trim() == QUIT_COMMAND {
            break;
        }
        let _ = rl.add_history_entry(line.as_str());

        session.set_input(line);
        let Some(pending) = session.begin_send() else {
            continue;
        };
        println!("{}", format!("(routed to backend {})", pending.target).dimmed());

        let delivery = pending.dispatch(&client).await;
        print_bot_reply(&delivery);
        session.complete(delivery.message);
    }

    info!("repl closed after {} messages", session.transcript().len());
    Ok(())
}

fn print_bot_reply(delivery: &Delivery) {
    let width = crossterm::terminal::size()
        .map(|(cols, _)| cols)
        .unwrap_or(DEFAULT_WIDTH);
    for line in reply_lines(&delivery.message.text, width) {
        if delivery.delivered {
            println!("{}", line.bright_green());
        } else {
            println!("{}", line.red());
        }
    }
}

/// Wraps a reply to the terminal width, prefixing the first line and
/// indenting the rest under it.
fn reply_lines(text: &str, terminal_width: u16) -> Vec<String> {
    let width = (terminal_width as usize)
        .saturating_sub(BOT_PREFIX.len())
        .max(20);
    let indent = " ".repeat(BOT_PREFIX.len());
    wrap(text, width)
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { BOT_PREFIX } else { indent.as_str() };
            format!("{}{}", prefix, line)
        })
        .collect()
}

pub async fn print_album() -> Result<()> {
    let config = get_config();
    let client = ApiClient::new(&config);
    match load_solutions(&client, &config.album_source).await {
        Ok(solutions) => {
            album_table(&solutions).printstd();
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("Failed to load solutions: {}", e).red());
            Err(e.into())
        }
    }
}

pub async fn print_analytics() -> Result<()> {
    let client = ApiClient::new(&get_config());
    match client.fetch_analytics().await {
        Ok(analytics) => {
            analytics_table(&analytics).printstd();
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", crate::app::ANALYTICS_ERROR.red());
            Err(e.into())
        }
    }
}

pub fn album_table(solutions: &[Solution]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("Id").style_spec("b"),
        Cell::new("Title").style_spec("b"),
        Cell::new("Description").style_spec("b"),
        Cell::new("Image").style_spec("b"),
    ]));
    for solution in solutions {
        table.add_row(Row::new(vec![
            Cell::new(&solution.id.to_string()),
            Cell::new(&solution.title),
            Cell::new(&wrap(&solution.description, 48).join("\n")),
            Cell::new(&solution.image),
        ]));
    }
    table
}

pub fn analytics_table(analytics: &Analytics) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![
        Cell::new("Total Tasks").style_spec("b"),
        Cell::new(&analytics.total_tasks.to_string()).style_spec("r"),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Avg. Messages per Task").style_spec("b"),
        Cell::new(&analytics.avg_display()).style_spec("r"),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Date").style_spec("bFc"),
        Cell::new("Task Count").style_spec("bFcr"),
    ]));
    for (day, count) in analytics.daily_rows() {
        table.add_row(Row::new(vec![
            Cell::new(day),
            Cell::new(&count.to_string()).style_spec("r"),
        ]));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SolutionId;
    use std::collections::BTreeMap;

    #[test]
    fn reply_lines_wrap_under_the_prefix() {
        let lines = reply_lines(&"word ".repeat(20), 30);
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with(BOT_PREFIX));
        assert!(lines[1..].iter().all(|l| l.starts_with("     ") && l.len() <= 30));
    }

    #[test]
    fn narrow_terminals_still_get_readable_lines() {
        let lines = reply_lines("a short reply", 4);
        assert_eq!(lines, vec!["bot> a short reply".to_string()]);
    }

    #[test]
    fn album_table_lists_every_solution_in_order() {
        let solutions = vec![
            Solution {
                id: SolutionId::Number(1),
                image: "/images/flow.png".to_string(),
                title: "Document Flow".to_string(),
                description: "Approvals and routing".to_string(),
            },
            Solution {
                id: SolutionId::Text("crm".to_string()),
                image: "/images/crm.png".to_string(),
                title: "CRM".to_string(),
                description: "Customer records".to_string(),
            },
        ];

        let table = album_table(&solutions);
        assert_eq!(table.len(), 2);

        let rendered = table.to_string();
        let first = rendered.find("Document Flow").unwrap();
        let second = rendered.find("CRM").unwrap();
        assert!(first < second);
        assert!(rendered.contains("crm"));
    }

    #[test]
    fn analytics_table_has_summary_then_sorted_days() {
        let mut tasks_per_day = BTreeMap::new();
        tasks_per_day.insert("2024-06-03".to_string(), 2);
        tasks_per_day.insert("2024-06-01".to_string(), 9);
        let analytics = Analytics {
            total_tasks: 11,
            avg_messages_per_task: 4.333333,
            tasks_per_day,
        };

        let table = analytics_table(&analytics);
        assert_eq!(table.len(), 5);

        let rendered = table.to_string();
        assert!(rendered.contains("4.33"));
        assert!(rendered.find("2024-06-01").unwrap() < rendered.find("2024-06-03").unwrap());
    }
}
