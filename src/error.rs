use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Not a PDF file: {0}")]
    #[diagnostic(help("only .pdf files can be uploaded"))]
    NotPdf(String),

    #[error("Contract text is empty")]
    EmptyText,

    #[error("File is too large ({size} bytes, max {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Analysis service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Analysis service response has no analysis")]
    MissingAnalysis,

    #[error("PDF extraction failed: {0}")]
    Extract(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}
