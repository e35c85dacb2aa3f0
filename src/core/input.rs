// input methods and the checks that run before anything hits the network

use std::path::{Path, PathBuf};

use crate::Error;

pub const PDF_MIME: &str = "application/pdf";

/// Same cap the service enforces.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMethod {
    #[default]
    Upload,
    Manual,
}

impl InputMethod {
    pub fn label(self) -> &'static str {
        match self {
            InputMethod::Upload => "Upload PDF",
            InputMethod::Manual => "Manual Input",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            InputMethod::Upload => InputMethod::Manual,
            InputMethod::Manual => InputMethod::Upload,
        }
    }
}

/// Mime type guessed from the file extension, like a browser file picker does.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    if ext.eq_ignore_ascii_case("pdf") {
        Some(PDF_MIME)
    } else {
        None
    }
}

pub fn ensure_pdf(path: &Path) -> Result<(), Error> {
    match mime_type(path) {
        Some(PDF_MIME) => Ok(()),
        _ => Err(Error::NotPdf(path.display().to_string())),
    }
}

pub fn ensure_text(text: &str) -> Result<(), Error> {
    if text.trim().is_empty() {
        Err(Error::EmptyText)
    } else {
        Ok(())
    }
}

/// A pdf that passed validation and is ready to send.
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    pub fn open(path: &Path) -> Result<Self, Error> {
        ensure_pdf(path)?;

        let size = std::fs::metadata(path)?.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(Error::FileTooLarge {
                size,
                max: MAX_UPLOAD_BYTES,
            });
        }

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "contract.pdf".to_string());

        Ok(Self { file_name, bytes })
    }
}

/// Terminals hand a dropped file over as a pasted path. Depending on the
/// emulator it may be quoted, a file:// url, or have escaped spaces.
pub fn parse_dropped_path(raw: &str) -> PathBuf {
    let mut s = raw.trim();

    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
            break;
        }
    }

    let s = s.strip_prefix("file://").unwrap_or(s);

    PathBuf::from(s.replace("\\ ", " "))
}
