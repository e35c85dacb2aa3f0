// pdf text extraction

use crate::Error;

/// Pulls the text layer out of a pdf. Runs on the blocking pool since
/// parsing is cpu bound, and a panic inside the parser becomes an error.
pub async fn pdf_text(bytes: Vec<u8>) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| Error::Extract(e.to_string()))?
        .map_err(|e| Error::Extract(e.to_string()))
}
