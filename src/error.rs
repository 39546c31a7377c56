use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported file type: {0}. Please use a .csv, .xlsx or .xls file.")]
    UnsupportedFileType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Spreadsheet parse error: {0}")]
    SpreadsheetParse(String),

    #[error("Spreadsheet is empty or could not be read.")]
    EmptySheet,

    #[error("No data provided for analysis.")]
    NoData,

    #[error("Failed to get analysis from Gemini.")]
    AnalysisFailed,

    #[error("Gemini API error: {0}")]
    Gemini(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        Self::CsvParse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
