// agreewise library - contract risk analysis client and service

pub mod cli;
mod core;
mod error;
pub mod logging;
mod output;
mod server;
pub mod tui;

pub use core::{
    Analysis, Client, DEFAULT_ENDPOINT, InputMethod, MAX_UPLOAD_BYTES, PDF_MIME, PdfUpload,
    RateLimit, RateLimiter, RiskScore, analyze_contract, ensure_pdf, ensure_text, mime_type,
    parse_dropped_path, pdf_text,
};
pub use error::Error;
pub use server::{Server, ServerConfig};
