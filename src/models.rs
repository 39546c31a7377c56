use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single cell as read from the source file. Numeric-looking text stays
/// `Text`; coercion happens where a number is actually needed.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Explicit numeric coercion. Text yields its leading decimal number, so
    /// `"400 IDR"` is 400 and `"1,500"` is 1. No leading number, or a
    /// non-finite value, yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => leading_number(s)?,
            Self::Empty => return None,
        };
        n.is_finite().then_some(n)
    }
}

/// Longest `[+-]digits[.digits][e[+-]digits]` prefix after leading whitespace.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Empty => Ok(()),
        }
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// One record keyed by header name. Columns absent from the map read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, CellValue::text(v));
        }
        row
    }
}

/// Parsed rectangular data: ordered headers plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Cell values of one row in header order, rendered for display.
    pub fn display_row(&self, idx: usize) -> Vec<String> {
        let row = &self.rows[idx];
        self.headers.iter().map(|h| row.get(h).to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
}

pub type ExpenseByCategory = BTreeMap<String, f64>;

/// Aggregates derived from a table that carries the recognised financial columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialReport {
    pub summary: FinancialSummary,
    pub expense_by_category: ExpenseByCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub amount: f64,
    pub pct: f64,
}

impl FinancialReport {
    /// Categories sorted by amount (largest first) with their share of the category total.
    pub fn ranked_categories(&self) -> Vec<CategoryShare> {
        let total: f64 = self.expense_by_category.values().sum();
        let mut ranked: Vec<CategoryShare> = self
            .expense_by_category
            .iter()
            .map(|(name, &amount)| CategoryShare {
                name: name.clone(),
                amount,
                pct: if total > 0.0 { amount / total * 100.0 } else { 0.0 },
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_as_number() {
        assert_eq!(CellValue::text(" 1500.5 ").as_number(), Some(1500.5));
        assert_eq!(CellValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(CellValue::text("abc").as_number(), None);
        assert_eq!(CellValue::text("NaN").as_number(), None);
        assert_eq!(CellValue::text("inf").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_cell_as_number_reads_leading_number() {
        assert_eq!(CellValue::text("400 IDR").as_number(), Some(400.0));
        assert_eq!(CellValue::text("1,500").as_number(), Some(1.0));
        assert_eq!(CellValue::text("  -12.5abc").as_number(), Some(-12.5));
        assert_eq!(CellValue::text(".5").as_number(), Some(0.5));
        assert_eq!(CellValue::text("5.").as_number(), Some(5.0));
        assert_eq!(CellValue::text("2e3x").as_number(), Some(2000.0));
        assert_eq!(CellValue::text("7e").as_number(), Some(7.0));
        assert_eq!(CellValue::text("Rp 400").as_number(), None);
        assert_eq!(CellValue::text("-").as_number(), None);
        assert_eq!(CellValue::text(".").as_number(), None);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Number(1000.0).to_string(), "1000");
        assert_eq!(CellValue::Number(12.25).to_string(), "12.25");
        assert_eq!(CellValue::text("Food").to_string(), "Food");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert!(CellValue::text("").is_empty());
    }

    #[test]
    fn test_row_missing_column_is_empty() {
        let row: Row = [("Kategori", "Food")].into_iter().collect();
        assert_eq!(row.get("Kategori"), &CellValue::text("Food"));
        assert!(row.get("Jumlah (IDR)").is_empty());
    }

    #[test]
    fn test_display_row_follows_header_order() {
        let row: Row = [("b", "2"), ("a", "1")].into_iter().collect();
        let table = Table::new(vec!["a".into(), "b".into(), "c".into()], vec![row]);
        assert_eq!(table.display_row(0), vec!["1", "2", ""]);
    }

    #[test]
    fn test_ranked_categories() {
        let mut expense_by_category = ExpenseByCategory::new();
        expense_by_category.insert("Food".into(), 300.0);
        expense_by_category.insert("Rent".into(), 700.0);
        let report = FinancialReport {
            summary: FinancialSummary {
                total_income: 0.0,
                total_expense: 1000.0,
                net_balance: -1000.0,
            },
            expense_by_category,
        };
        let ranked = report.ranked_categories();
        assert_eq!(ranked[0].name, "Rent");
        assert!((ranked[0].pct - 70.0).abs() < 1e-9);
        assert_eq!(ranked[1].name, "Food");
        assert!((ranked[1].pct - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_ranked_categories_zero_total() {
        let mut expense_by_category = ExpenseByCategory::new();
        expense_by_category.insert("Refund".into(), 0.0);
        let report = FinancialReport {
            summary: FinancialSummary {
                total_income: 0.0,
                total_expense: 0.0,
                net_balance: 0.0,
            },
            expense_by_category,
        };
        assert_eq!(report.ranked_categories()[0].pct, 0.0);
    }
}
