use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::{ExpenseByCategory, FinancialReport, FinancialSummary, Table};

// ---------------------------------------------------------------------------
// Recognised columns
// ---------------------------------------------------------------------------

/// Header names and type markers the aggregator looks for. Matching is exact
/// and case-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    #[serde(rename = "type")]
    pub type_column: String,
    #[serde(rename = "amount")]
    pub amount_column: String,
    #[serde(rename = "category")]
    pub category_column: String,
    #[serde(rename = "income")]
    pub income_marker: String,
    #[serde(rename = "expense")]
    pub expense_marker: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            type_column: "Tipe Transaksi".to_string(),
            amount_column: "Jumlah (IDR)".to_string(),
            category_column: "Kategori".to_string(),
            income_marker: "Pemasukan".to_string(),
            expense_marker: "Pengeluaran".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn missing_columns(&self, table: &Table) -> Vec<&str> {
        [
            self.type_column.as_str(),
            self.amount_column.as_str(),
            self.category_column.as_str(),
        ]
        .into_iter()
        .filter(|c| !table.has_column(c))
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Income/expense totals and the per-category expense breakdown.
///
/// Returns `None` when any recognised column is absent, so callers can tell
/// "no financial data" apart from "zero financial activity". Rows whose
/// amount has no leading number are skipped entirely; rows with an unrecognised
/// type contribute to neither total.
pub fn summarize(table: &Table, mapping: &ColumnMapping) -> Option<FinancialReport> {
    let missing = mapping.missing_columns(table);
    if !missing.is_empty() {
        warn!(
            "Missing financial column(s) {:?}; skipping financial summary",
            missing
        );
        return None;
    }

    let mut income = 0.0;
    let mut expense = 0.0;
    let mut expense_by_category = ExpenseByCategory::new();
    let mut skipped = 0usize;

    for row in &table.rows {
        let Some(amount) = row.get(&mapping.amount_column).as_number() else {
            skipped += 1;
            continue;
        };
        let kind = row.get(&mapping.type_column).to_string();
        if kind == mapping.income_marker {
            income += amount;
        } else if kind == mapping.expense_marker {
            expense += amount;
            let category = row.get(&mapping.category_column);
            if !category.is_empty() {
                *expense_by_category.entry(category.to_string()).or_default() += amount;
            }
        }
    }

    debug!(
        "Summarized {} rows ({} skipped for unparsable amounts)",
        table.len(),
        skipped
    );

    Some(FinancialReport {
        summary: FinancialSummary {
            total_income: income,
            total_expense: expense,
            net_balance: income - expense,
        },
        expense_by_category,
    })
}
