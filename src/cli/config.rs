use colored::Colorize;

use crate::error::{AppError, Result};
use crate::settings::{load_settings, save_settings, settings_path};

pub fn show() -> Result<()> {
    let settings = load_settings();
    let json =
        serde_json::to_string_pretty(&settings).map_err(|e| AppError::Settings(e.to_string()))?;
    println!("{json}");
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let mut settings = load_settings();
    settings.set(key, value)?;
    save_settings(&settings)?;
    println!(
        "{} {key} = {value}  ({})",
        "Saved".green(),
        settings_path().display()
    );
    Ok(())
}
