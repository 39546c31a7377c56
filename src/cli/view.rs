use std::sync::Arc;

use crate::browser::DataBrowser;
use crate::cli::file_label;
use crate::error::Result;
use crate::ingest::load_table;
use crate::tui::run_view;

pub async fn run(file: &str) -> Result<()> {
    let path = std::path::Path::new(file);
    let table = load_table(path).await?;
    if table.is_empty() {
        println!("No rows found in {}.", file_label(path));
        return Ok(());
    }
    let mut browser = DataBrowser::new(file_label(path), Arc::new(table));
    run_view(&mut browser)
}
