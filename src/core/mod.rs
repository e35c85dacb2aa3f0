// core logic - data model, validation, client, and the service side scoring

mod analysis;
mod client;
mod extract;
mod input;
mod limiter;
mod scoring;

pub use analysis::{Analysis, RiskScore};
pub use client::{Client, DEFAULT_ENDPOINT};
pub use extract::pdf_text;
pub use input::{
    InputMethod, MAX_UPLOAD_BYTES, PDF_MIME, PdfUpload, ensure_pdf, ensure_text, mime_type,
    parse_dropped_path,
};
pub use limiter::{RateLimit, RateLimiter};
pub use scoring::analyze_contract;
