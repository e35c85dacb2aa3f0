// http client for the analysis service

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::Error;
use crate::core::analysis::{Analysis, AnalysisEnvelope, ErrorBody};
use crate::core::input::{self, PDF_MIME, PdfUpload};

pub const DEFAULT_ENDPOINT: &str = "https://agreewise-lxez.onrender.com";

pub struct Client {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

impl Client {
    pub fn new(endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn upload(&self, pdf: PdfUpload) -> Result<Analysis, Error> {
        tracing::info!(file = %pdf.file_name, bytes = pdf.bytes.len(), "uploading contract");

        let part = Part::bytes(pdf.bytes)
            .file_name(pdf.file_name)
            .mime_str(PDF_MIME)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/upload", self.endpoint))
            .multipart(form)
            .send()
            .await?;

        read_analysis(response).await
    }

    pub async fn analyze_text(&self, text: &str) -> Result<Analysis, Error> {
        input::ensure_text(text)?;

        tracing::info!(chars = text.len(), "submitting contract text");

        let response = self
            .http
            .post(format!("{}/analyze", self.endpoint))
            .json(&AnalyzeRequest { text })
            .send()
            .await?;

        read_analysis(response).await
    }
}

async fn read_analysis(response: reqwest::Response) -> Result<Analysis, Error> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await?;
        // the service sends { "error": "..." }, anything else is passed through
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        tracing::warn!(status = status.as_u16(), %message, "analysis request failed");
        return Err(Error::Service {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: AnalysisEnvelope = response.json().await?;
    envelope.analysis.ok_or(Error::MissingAnalysis)
}
