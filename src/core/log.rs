use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const OP_WIDTH_LIMIT: usize = 40;

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI pattern"));

fn visible_len(s: &str) -> usize {
    ANSI_ESCAPE.replace_all(s, "").chars().count()
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "reset" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "init" => Colour::Blue,
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);

        let labels: Vec<String> = entries
            .iter()
            .map(|(_, _, op, target, _)| {
                let painted = color_for_operation(op).paint(op.as_str()).to_string();
                if target.is_empty() {
                    painted
                } else {
                    let mut t: String = target.chars().take(OP_WIDTH_LIMIT).collect();
                    if target.chars().count() > OP_WIDTH_LIMIT {
                        t.push_str("...");
                    }
                    format!("{painted} ({t})")
                }
            })
            .collect();

        let op_w = labels.iter().map(|l| visible_len(l)).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for ((id, date, _, _, message), label) in entries.iter().zip(labels.iter()) {
            let padding = " ".repeat(op_w.saturating_sub(visible_len(label)));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id, date, label, padding, message
            );
        }

        Ok(())
    }
}
