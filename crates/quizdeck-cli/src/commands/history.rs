//! The `quizdeck history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizdeck_core::report::load_history;
use quizdeck_providers::config::load_config_from;

pub fn execute(
    history: Option<PathBuf>,
    limit: usize,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let path = history.unwrap_or(config.history_path);

    if !path.exists() {
        println!("No scores recorded yet ({}).", path.display());
        return Ok(());
    }

    let mut entries = load_history(&path)?;
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries.truncate(limit);

    let mut table = Table::new();
    table.set_header(vec!["When", "Player", "Score", "Percent", "Time"]);

    for entry in &entries {
        table.add_row(vec![
            Cell::new(entry.created_at.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(&entry.username),
            Cell::new(format!("{}/{}", entry.score, entry.total)),
            Cell::new(format!("{:.1}%", entry.percent)),
            Cell::new(format!("{}s", entry.elapsed_secs)),
        ]);
    }

    println!("{table}");
    Ok(())
}
