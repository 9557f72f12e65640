// System status display: shows the export location, override store and
// when the export was last loaded.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::db::OverrideStore;

/// Load-state key for the last successful load time.
pub const LAST_LOADED_AT: &str = "last_loaded_at";
/// Load-state key for the CSV path of the last successful load.
pub const LAST_SOURCE: &str = "last_source";

/// Display system status to the terminal.
pub fn show(config: &Config, store: &dyn OverrideStore) -> Result<()> {
    // Export file
    if config.csv_path.exists() {
        let file_size = std::fs::metadata(&config.csv_path)
            .map(|m| format_bytes(m.len()))
            .unwrap_or_else(|_| "unknown".to_string());
        println!("Article export: {} ({})", config.csv_path.display(), file_size);
    } else {
        println!("Article export: not found at {}", config.csv_path.display());
    }

    println!("URL markers: {}", config.url_markers.join(", "));

    // Override database
    if Path::new(&config.db_path).exists() {
        let overrides = store.list_overrides()?;
        println!(
            "Override store: {} ({} overrides)",
            config.db_path,
            overrides.len()
        );
    } else {
        println!("Override store: not initialized");
        println!("  Run `blogfresh init` to create it");
    }

    match store.get_load_state(LAST_LOADED_AT)? {
        Some(at) => {
            let source = store.get_load_state(LAST_SOURCE)?.unwrap_or_default();
            println!("Last load: {at} ({source})");
        }
        None => println!("Last load: never"),
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
