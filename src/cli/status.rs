use crate::error::Result;
use crate::settings::{load_settings, settings_path, Settings, FALLBACK_API_KEY_ENV};

pub fn run() -> Result<()> {
    let path = settings_path();
    let settings = load_settings();

    println!("Settings:   {}", path.display());
    if !path.exists() {
        println!("            (not created yet, using defaults)");
    }
    println!("Model:      {}", settings.model);
    println!("Endpoint:   {}", settings.base_url);
    println!("API key:    {}", key_status(&settings));

    let c = &settings.columns;
    println!();
    println!("Type column:      {}", c.type_column);
    println!("Amount column:    {}", c.amount_column);
    println!("Category column:  {}", c.category_column);
    println!("Income marker:    {}", c.income_marker);
    println!("Expense marker:   {}", c.expense_marker);

    Ok(())
}

fn key_status(settings: &Settings) -> String {
    if settings.api_key().is_some() {
        format!("set (via ${} or ${FALLBACK_API_KEY_ENV})", settings.api_key_env)
    } else {
        format!("missing (set ${} or ${FALLBACK_API_KEY_ENV})", settings.api_key_env)
    }
}
