use log::info;

use crate::cli::load_dataset;
use crate::error::Result;
use crate::narrative::{request_narrative, GeminiClient};
use crate::settings::load_settings;

/// Print the model's Markdown verbatim so it can be piped into a file.
pub async fn run(file: &str) -> Result<()> {
    let settings = load_settings();
    let dataset = load_dataset(file, &settings).await?;
    let client = GeminiClient::from_settings(&settings);
    info!("Analyzing {} with {}", dataset.file_name, client.model());
    let text = request_narrative(&client, &dataset.table).await?;
    println!("{text}");
    Ok(())
}
