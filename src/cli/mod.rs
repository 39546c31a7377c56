pub mod analyze;
pub mod config;
pub mod dashboard;
pub mod status;
pub mod summary;
pub mod view;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::app::Dataset;
use crate::error::Result;
use crate::ingest::load_table;
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "finanalyzer",
    version,
    about = "Load a financial spreadsheet, summarise it and ask Gemini for a narrative analysis."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive dashboard (default).
    Dashboard {
        /// CSV, XLSX or XLS file to load on start
        file: Option<String>,
    },
    /// Print totals, expense breakdown and a data preview.
    Summary {
        /// CSV, XLSX or XLS file
        file: String,
    },
    /// Browse every row of a file interactively.
    View {
        /// CSV, XLSX or XLS file
        file: String,
    },
    /// Request a narrative analysis and print it as Markdown.
    Analyze {
        /// CSV, XLSX or XLS file
        file: String,
    },
    /// Show settings location, model and credential status.
    Status,
    /// Show or edit settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings as JSON.
    Show,
    /// Set a single value, e.g. `columns.amount "Amount"`.
    Set {
        /// model, api_key_env, base_url, columns.type, columns.amount,
        /// columns.category, columns.income or columns.expense
        key: String,
        value: String,
    },
}

/// Display name for a path: its file name, or the path itself.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse `file` and compute its report with the configured column mapping.
pub(crate) async fn load_dataset(file: &str, settings: &Settings) -> Result<Dataset> {
    let path = Path::new(file);
    let table = load_table(path).await?;
    Ok(Dataset::new(file_label(path), table, &settings.columns))
}
