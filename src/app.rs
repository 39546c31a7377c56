//! Application state owned by the dashboard controller.
//!
//! The state is a single snapshot: a new file load replaces it wholesale and
//! outcomes from earlier loads are dropped by comparing generations.

use std::sync::Arc;

use log::{info, warn};

use crate::aggregate::{summarize, ColumnMapping};
use crate::error::{AppError, Result};
use crate::models::{FinancialReport, Table};

/// Rows shown in the dashboard and summary previews.
pub const PREVIEW_ROWS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Loading,
    Analyzing,
}

/// A successfully loaded file and everything derived from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub file_name: String,
    pub table: Arc<Table>,
    pub report: Option<FinancialReport>,
}

impl Dataset {
    pub fn new(file_name: String, table: Table, mapping: &ColumnMapping) -> Self {
        let report = summarize(&table, mapping);
        Self {
            file_name,
            table: Arc::new(table),
            report,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub pending_file: Option<String>,
    pub dataset: Option<Dataset>,
    pub analysis: Option<String>,
    pub error: Option<String>,
    pub activity: Activity,
    generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            pending_file: None,
            dataset: None,
            analysis: None,
            error: None,
            activity: Activity::Idle,
            generation: 0,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard everything. Outstanding load/analysis outcomes become stale.
    pub fn reset(&mut self) {
        let next = self.generation + 1;
        *self = Self {
            generation: next,
            ..Self::default()
        };
    }

    /// Start loading `file_name`, discarding the previous snapshot. Returns the
    /// generation the outcome must be reported with, or `None` while a load
    /// is already running.
    pub fn begin_load(&mut self, file_name: &str) -> Option<u64> {
        if self.activity == Activity::Loading {
            return None;
        }
        self.reset();
        self.pending_file = Some(file_name.to_string());
        self.activity = Activity::Loading;
        Some(self.generation)
    }

    pub fn finish_load(&mut self, generation: u64, outcome: Result<Dataset>) {
        if generation != self.generation {
            info!("Dropping stale load result (generation {generation})");
            return;
        }
        self.activity = Activity::Idle;
        self.pending_file = None;
        match outcome {
            Ok(dataset) => {
                self.error = None;
                self.dataset = Some(dataset);
            }
            Err(e) => {
                warn!("Load failed: {e}");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Start an analysis of the loaded table. Refused (with the error banner
    /// set) when nothing is loaded; refused silently while one is in flight.
    pub fn begin_analysis(&mut self) -> Option<(u64, Arc<Table>)> {
        if self.activity != Activity::Idle {
            return None;
        }
        let table = match &self.dataset {
            Some(d) if !d.table.is_empty() => Arc::clone(&d.table),
            _ => {
                self.error = Some("No data available to analyze.".to_string());
                return None;
            }
        };
        self.activity = Activity::Analyzing;
        self.error = None;
        self.analysis = None;
        Some((self.generation, table))
    }

    pub fn finish_analysis(&mut self, generation: u64, outcome: Result<String>) {
        if generation != self.generation {
            info!("Dropping stale analysis result (generation {generation})");
            return;
        }
        self.activity = Activity::Idle;
        match outcome {
            Ok(text) => self.analysis = Some(text),
            Err(e) => self.error = Some(analysis_error_message(&e)),
        }
    }
}

fn analysis_error_message(e: &AppError) -> String {
    format!("Analysis failed: {e}")
}
