//! Narrative analysis: a CSV sample of the table is embedded in a fixed
//! prompt and handed to a text-generation service.

pub mod gemini;

use async_trait::async_trait;
use log::{debug, error, info};

use crate::error::{AppError, Result};
use crate::models::Table;

pub use gemini::GeminiClient;

/// Rows serialised into the prompt. A deterministic prefix, not a random sample.
pub const SAMPLE_ROWS: usize = 100;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Serialise the header row plus the first `SAMPLE_ROWS` rows as CSV text.
pub fn sample_csv(table: &Table) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&table.headers)?;
    for idx in 0..table.len().min(SAMPLE_ROWS) {
        wtr.write_record(table.display_row(idx))?;
    }
    let bytes = wtr.into_inner().map_err(|e| AppError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Other(e.to_string()))
}

pub fn build_prompt(csv_data: &str) -> String {
    format!(
        "You are an expert financial analyst reviewing a personal or small business financial ledger.
A user has uploaded a spreadsheet containing their financial transactions.
Below is a sample of the data in CSV format (up to {SAMPLE_ROWS} rows).

Analyze this data and provide a detailed financial report in a clear, well-structured response. The response must include the following sections:
1.  **Executive Summary:** A brief, high-level overview of the financial health based on the data provided.
2.  **Income Analysis:** Briefly describe the main sources of income.
3.  **Expense Breakdown:** Identify the top 3-5 spending categories and mention their significance.
4.  **Key Observations & Potential Savings:** Highlight any notable spending patterns, trends, or anomalies. Suggest 1-2 specific and actionable areas where savings could be made.

Format your entire response in Markdown. Use bolding for headers and bullet points for lists.

Here is the data:
```csv
{csv_data}```
"
    )
}

/// Ask the generator for a Markdown report on `table`.
///
/// An empty table fails with [`AppError::NoData`] before any request is made.
/// Every other failure is logged and collapsed into [`AppError::AnalysisFailed`];
/// there is no retry.
pub async fn request_narrative<G: TextGenerator + ?Sized>(
    generator: &G,
    table: &Table,
) -> Result<String> {
    if table.is_empty() {
        return Err(AppError::NoData);
    }

    let csv_data = sample_csv(table)?;
    let prompt = build_prompt(&csv_data);
    debug!(
        "Narrative prompt: {} sampled rows, {} bytes",
        table.len().min(SAMPLE_ROWS),
        prompt.len()
    );

    info!("Requesting narrative analysis");
    match generator.generate(&prompt).await {
        Ok(text) => {
            info!("Narrative analysis received ({} bytes)", text.len());
            Ok(text)
        }
        Err(e) => {
            error!("Error calling text generation service: {e}");
            Err(AppError::AnalysisFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeGenerator {
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
        reply: std::result::Result<String, String>,
    }

    impl FakeGenerator {
        fn replying(text: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                reply: Ok(text.to_string()),
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                reply: Err(msg.to_string()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply.clone().map_err(AppError::Gemini)
        }
    }

    fn ledger(n: usize) -> Table {
        let headers = vec!["No".to_string(), "Kategori".to_string()];
        let rows = (0..n)
            .map(|i| {
                let no = (i + 1).to_string();
                let row: Row = [("No", no.as_str()), ("Kategori", "Food")].into_iter().collect();
                row
            })
            .collect();
        Table::new(headers, rows)
    }

    #[tokio::test]
    async fn test_empty_table_fails_without_call() {
        let generator = FakeGenerator::replying("unused");
        let err = request_narrative(&generator, &Table::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NoData));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_response_passed_through_verbatim() {
        let reply = "**Executive Summary:**\n- Healthy  \n";
        let generator = FakeGenerator::replying(reply);
        let text = request_narrative(&generator, &ledger(3)).await.unwrap();
        assert_eq!(text, reply);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_service_error_becomes_generic_failure() {
        let generator = FakeGenerator::failing("status 503: overloaded");
        let err = request_narrative(&generator, &ledger(1)).await.unwrap_err();
        assert!(matches!(err, AppError::AnalysisFailed));
        assert!(!err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_prompt_samples_first_hundred_rows() {
        let generator = FakeGenerator::replying("ok");
        request_narrative(&generator, &ledger(150)).await.unwrap();
        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("```csv\nNo,Kategori\n1,Food\n"));
        assert!(prompt.contains("\n100,Food\n```"));
        assert!(!prompt.contains("\n101,Food"));
        assert!(prompt.contains("**Executive Summary:**"));
        assert!(prompt.contains("**Key Observations & Potential Savings:**"));
    }

    #[test]
    fn test_sample_csv_quotes_and_blanks() {
        let headers = vec!["Desc".to_string(), "Amount".to_string(), "Note".to_string()];
        let row: Row = [("Desc", "Coffee, large"), ("Amount", "35000")].into_iter().collect();
        let csv = sample_csv(&Table::new(headers, vec![row])).unwrap();
        assert_eq!(csv, "Desc,Amount,Note\n\"Coffee, large\",35000,\n");
    }
}
