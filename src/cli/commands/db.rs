use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::reset_db;
use crate::db::log::ttlog;
use crate::db::migrate::{applied_versions, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
        reset,
        yes,
    } = cmd
    {
        // Migrations are run explicitly below, so open without them.
        let mut pool = DbPool::with_timeout(&cfg.database, cfg.busy_timeout())?;

        //
        // 1) RESET
        //
        if *reset {
            let prompt = format!(
                "Reset {}? Every machine, driver, counterparty and record will be erased.",
                cfg.database
            );
            if !ask_confirmation(&prompt, *yes) {
                info("Operation cancelled.");
                return Ok(());
            }

            match reset_db(&mut pool)? {
                Some(backup) => {
                    success(format!("📦 Backup created: {}", backup.display()));
                    ttlog(
                        &pool.conn,
                        "reset",
                        "database",
                        &format!("Database reset, backup at {}", backup.display()),
                    )?;
                }
                None => warning("Database is not file backed: backup skipped."),
            }
            success("Database reset completed.");
        }

        //
        // 2) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = run_pending_migrations(&pool.conn)?;
            for v in applied_versions(&pool.conn)? {
                let marker = if applied.iter().any(|a| *a == v) { "new" } else { "ok" };
                println!("  {GREY}•{RESET} {v} ({marker})");
            }
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        //
        // 3) INFO
        //
        if *show_info {
            run_pending_migrations(&pool.conn)?;
            let i = stats::db_info(&pool)?;
            let size_kb = i.size_bytes as f64 / 1024.0;

            println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, i.path, RESET);
            println!("{}• Size:{} {:.1} KB", CYAN, RESET, size_kb);
            println!("{}• Machines:{} {}", CYAN, RESET, i.machines);
            println!("{}• Drivers:{} {}", CYAN, RESET, i.drivers);
            println!("{}• Counterparties:{} {}", CYAN, RESET, i.counterparties);
            println!("{}• Records:{} {}", CYAN, RESET, i.records);
            println!(
                "{}• Date range:{} {} → {}",
                CYAN,
                RESET,
                i.first_date.as_deref().unwrap_or("--"),
                i.last_date.as_deref().unwrap_or("--")
            );
        }

        //
        // 4) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);
            let problems = stats::integrity_problems(&pool)?;
            if problems.is_empty() {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{}", RED, RESET);
                for p in problems {
                    println!("  - {p}");
                }
            }
        }

        //
        // 5) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
