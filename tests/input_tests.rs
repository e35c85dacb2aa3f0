// tests for the checks that run before a request is sent

use agreewise::{
    Client, Error, MAX_UPLOAD_BYTES, PDF_MIME, PdfUpload, ensure_pdf, ensure_text, mime_type,
    parse_dropped_path,
};
use std::io::Write;
use std::path::{Path, PathBuf};

// nothing listens here, so any request that got out would fail with Error::Http
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

#[test]
fn test_pdf_mime_from_extension() {
    assert_eq!(mime_type(Path::new("contract.pdf")), Some(PDF_MIME));
    assert_eq!(mime_type(Path::new("CONTRACT.PDF")), Some(PDF_MIME));
    assert_eq!(mime_type(Path::new("contract.docx")), None);
    assert_eq!(mime_type(Path::new("contract")), None);
}

#[test]
fn test_ensure_pdf() {
    assert!(ensure_pdf(Path::new("a/b/lease.pdf")).is_ok());
    assert!(matches!(
        ensure_pdf(Path::new("notes.txt")),
        Err(Error::NotPdf(_))
    ));
}

#[test]
fn test_ensure_text() {
    assert!(ensure_text("The parties agree").is_ok());
    assert!(matches!(ensure_text(""), Err(Error::EmptyText)));
    assert!(matches!(ensure_text("  \n\t "), Err(Error::EmptyText)));
}

#[test]
fn test_parse_dropped_path() {
    assert_eq!(
        parse_dropped_path("/tmp/lease.pdf\n"),
        PathBuf::from("/tmp/lease.pdf")
    );
    assert_eq!(
        parse_dropped_path("'/tmp/My Lease.pdf'"),
        PathBuf::from("/tmp/My Lease.pdf")
    );
    assert_eq!(
        parse_dropped_path("\"/tmp/My Lease.pdf\""),
        PathBuf::from("/tmp/My Lease.pdf")
    );
    assert_eq!(
        parse_dropped_path("/tmp/My\\ Lease.pdf"),
        PathBuf::from("/tmp/My Lease.pdf")
    );
    assert_eq!(
        parse_dropped_path("file:///tmp/lease.pdf"),
        PathBuf::from("/tmp/lease.pdf")
    );
}

#[test]
fn test_open_pdf() {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(b"%PDF-1.4 fake").unwrap();

    let pdf = PdfUpload::open(file.path()).unwrap();
    assert_eq!(pdf.bytes, b"%PDF-1.4 fake");
    assert!(pdf.file_name.ends_with(".pdf"));
}

#[test]
fn test_open_rejects_non_pdf() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    assert!(matches!(
        PdfUpload::open(file.path()),
        Err(Error::NotPdf(_))
    ));
}

#[test]
fn test_open_rejects_large_file() {
    let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.as_file().set_len(MAX_UPLOAD_BYTES + 1).unwrap();

    match PdfUpload::open(file.path()) {
        Err(Error::FileTooLarge { size, max }) => {
            assert_eq!(size, MAX_UPLOAD_BYTES + 1);
            assert_eq!(max, MAX_UPLOAD_BYTES);
        }
        other => panic!("expected FileTooLarge, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_text_never_reaches_network() {
    let client = Client::new(DEAD_ENDPOINT);
    let result = client.analyze_text("   ").await;
    assert!(matches!(result, Err(Error::EmptyText)));
}

#[test]
fn test_endpoint_trailing_slash() {
    let client = Client::new("http://localhost:5000/");
    assert_eq!(client.endpoint(), "http://localhost:5000");
}
