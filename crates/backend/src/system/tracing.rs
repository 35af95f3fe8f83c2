use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_NAME: &str = "backend.log";
/// SQL-запросы sea-orm/sqlx слишком шумные для info
const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn";

fn open_log_file(log_dir: &Path) -> anyhow::Result<(PathBuf, File)> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| anyhow::anyhow!("Cannot create log directory {}: {}", log_dir.display(), e))?;
    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| anyhow::anyhow!("Cannot open log file {}: {}", path.display(), e))?;
    Ok((path, file))
}

/// Фильтр из RUST_LOG, иначе DEFAULT_FILTER
fn filter_directives(rust_log: Option<String>) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Подписчик tracing: stdout с цветами и `<log_dir>/backend.log` без них.
///
/// Вызывается до первого `tracing::info!`, иначе ранние сообщения теряются.
pub fn initialize(log_dir: &Path) -> anyhow::Result<()> {
    let (log_path, log_file) = match open_log_file(log_dir) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("✗ ERROR: {}", e);
            return Err(e);
        }
    };
    let directives = filter_directives(std::env::var("RUST_LOG").ok());

    tracing_subscriber::registry()
        .with(EnvFilter::new(&directives))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    println!("✓ Logging to stdout and {} ({})", log_path.display(), directives);
    Ok(())
}
