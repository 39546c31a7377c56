use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::aggregate::ColumnMapping;
use crate::app::{Dataset, PREVIEW_ROWS};
use crate::cli::load_dataset;
use crate::error::Result;
use crate::fmt::{number, rupiah};
use crate::models::FinancialReport;
use crate::settings::load_settings;

const BAR_WIDTH: f64 = 30.0;

pub async fn run(file: &str) -> Result<()> {
    let settings = load_settings();
    let dataset = load_dataset(file, &settings).await?;
    print!("{}", format_summary(&dataset, &settings.columns));
    Ok(())
}

// ---------------------------------------------------------------------------
// Pure formatting functions (dataset → String)
// ---------------------------------------------------------------------------

pub fn format_summary(dataset: &Dataset, mapping: &ColumnMapping) -> String {
    let table = &dataset.table;
    let mut out = format!(
        "{}\n{} rows, {} columns\n\n",
        dataset.file_name.bold(),
        number(table.len()),
        table.headers.len()
    );

    match &dataset.report {
        Some(report) => {
            out.push_str(&format_totals(report));
            out.push_str("\n\nExpense by Category\n");
            out.push_str(&format_categories(report));
            out.push('\n');
        }
        None => {
            let missing = mapping.missing_columns(table);
            out.push_str(&format!(
                "{}\n",
                format!(
                    "Financial summary unavailable: missing column(s) {}.",
                    missing.join(", ")
                )
                .yellow()
            ));
        }
    }

    out.push('\n');
    out.push_str(&format_preview(dataset));
    out.push('\n');
    out
}

fn format_totals(report: &FinancialReport) -> String {
    let s = &report.summary;
    let net = rupiah(s.net_balance);
    let net = if s.net_balance >= 0.0 {
        net.green().bold()
    } else {
        net.red().bold()
    };

    let mut table = Table::new();
    table.set_header(vec!["Total Income", "Total Expense", "Net Balance"]);
    table.add_row(vec![
        Cell::new(rupiah(s.total_income)),
        Cell::new(rupiah(s.total_expense)),
        Cell::new(net),
    ]);
    table.to_string()
}

fn format_categories(report: &FinancialReport) -> String {
    let ranked = report.ranked_categories();
    if ranked.is_empty() {
        return "No expense data to display.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "Share", ""]);
    for share in &ranked {
        let bar = "\u{2588}".repeat((share.pct / 100.0 * BAR_WIDTH).round() as usize);
        table.add_row(vec![
            Cell::new(&share.name),
            Cell::new(rupiah(share.amount)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", share.pct)).set_alignment(CellAlignment::Right),
            Cell::new(bar),
        ]);
    }
    table.to_string()
}

fn format_preview(dataset: &Dataset) -> String {
    let data = &dataset.table;
    let shown = data.len().min(PREVIEW_ROWS);
    let mut out = format!(
        "Data Preview (first {} of {} rows)\n",
        number(shown),
        number(data.len())
    );

    let mut table = Table::new();
    table.set_header(data.headers.clone());
    for idx in 0..shown {
        table.add_row(data.display_row(idx));
    }
    out.push_str(&table.to_string());
    out
}
