//! Store diagnostics command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Print store connectivity, tables, and provider configuration.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let report = state.status_report().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("  {} Chatlog v{}", style("⚡").bold(), env!("CARGO_PKG_VERSION"));
    println!();

    println!("  {}", style("── Store ──").dim());
    match &report.error {
        None => println!("  Database: {}", style(report.database).green()),
        Some(err) => {
            println!("  Database: {}", style(report.database).red());
            println!("  Error:    {}", style(err).red());
        }
    }
    if !report.tables.is_empty() {
        println!("  Tables:   {}", report.tables.join(", "));
    }
    println!();

    println!("  {}", style("── Replies ──").dim());
    match &report.provider {
        Some(name) => println!("  Provider: {} (local rules on failure)", style(name).cyan()),
        None => println!("  Provider: {}", style("local rules only").dim()),
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
