//! PDF text extraction

use lopdf::{Document, Object, ObjectId};

use crate::config::constants::MAX_PDF_SIZE;
use crate::error::{ReaderError, Result};

/// PDF magic bytes
const PDF_MAGIC: &[u8] = b"%PDF";

/// Check that the bytes plausibly hold a PDF the reader will accept
pub fn validate_pdf(bytes: &[u8]) -> Result<()> {
    if bytes.len() < PDF_MAGIC.len() || !bytes.starts_with(PDF_MAGIC) {
        return Err(ReaderError::InvalidPdf("missing %PDF header".to_string()));
    }

    if bytes.len() > MAX_PDF_SIZE {
        return Err(ReaderError::InvalidPdf(format!(
            "file too large: {} MB (max {} MB)",
            bytes.len() / (1024 * 1024),
            MAX_PDF_SIZE / (1024 * 1024)
        )));
    }

    Ok(())
}

/// Load a parsed document from memory
fn load_document(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(|e| {
        tracing::error!(error = %e, "PDF extraction error");
        ReaderError::from(e)
    })
}

/// Text of one page
///
/// lopdf skips content references it cannot resolve, so they are checked
/// here first: a dangling stream means the page is broken, not blank.
fn page_text(doc: &Document, page_number: u32, page_id: ObjectId) -> lopdf::Result<String> {
    for stream_id in doc.get_page_contents(page_id) {
        doc.get_object(stream_id).and_then(Object::as_stream)?;
    }
    doc.extract_text(&[page_number])
}

/// Extract the text of every page, each followed by a newline
///
/// `on_page` is called with `(page, total_pages)` after each page. Any page
/// that fails aborts the extraction.
pub fn extract_text<F>(bytes: &[u8], mut on_page: F) -> Result<String>
where
    F: FnMut(usize, usize),
{
    let doc = load_document(bytes)?;
    let pages = doc.get_pages();
    let total_pages = pages.len();

    tracing::debug!(total_pages, "Extracting PDF text");

    let mut text = String::new();
    for (i, (page_number, page_id)) in pages.iter().enumerate() {
        let content = page_text(&doc, *page_number, *page_id).map_err(|e| {
            tracing::error!(page = page_number, error = %e, "Failed to extract text from page");
            ReaderError::Extraction(format!("page {}: {}", page_number, e))
        })?;
        text.push_str(&content);
        text.push('\n');
        on_page(i + 1, total_pages);
    }

    tracing::info!(
        total_pages,
        extracted_chars = text.chars().count(),
        "PDF text extracted"
    );

    Ok(text)
}

/// In-memory PDFs for tests
#[doc(hidden)]
pub mod test_support {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    use crate::error::Result;

    /// Build a PDF with one page per entry, each showing that line of text
    pub fn build_pdf(pages: &[&str]) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page_text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*page_text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::build_pdf;
    use super::*;

    #[test]
    fn test_validate_rejects_non_pdf() {
        let result = validate_pdf(b"hello, not a pdf");
        assert!(matches!(result, Err(ReaderError::InvalidPdf(_))));

        let result = validate_pdf(b"");
        assert!(matches!(result, Err(ReaderError::InvalidPdf(_))));
    }

    #[test]
    fn test_validate_accepts_header() {
        assert!(validate_pdf(b"%PDF-1.5\n...").is_ok());
    }

    #[test]
    fn test_extract_reports_each_page() {
        let bytes = build_pdf(&["First page here", "Second page here"]).unwrap();
        let mut progress = Vec::new();

        let text = extract_text(&bytes, |page, total| progress.push((page, total))).unwrap();

        assert_eq!(progress, vec![(1, 2), (2, 2)]);
        assert!(text.contains("First page here"));
        assert!(text.contains("Second page here"));
        assert!(text.ends_with('\n'));
        let first = text.find("First").unwrap();
        let second = text.find("Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_broken_page_fails_extraction() {
        let bytes =
            build_pdf(&["First page text.", "Second page text.", "Third page text."]).unwrap();
        let mut doc = Document::load_mem(&bytes).unwrap();
        let page_id = doc.get_pages()[&2];
        doc.get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .set("Contents", Object::Reference((9999, 0)));
        let mut broken = Vec::new();
        doc.save_to(&mut broken).unwrap();

        let mut progress = Vec::new();
        let result = extract_text(&broken, |page, total| progress.push((page, total)));

        match result {
            Err(ReaderError::Extraction(message)) => assert!(message.starts_with("page 2:")),
            other => panic!("expected extraction error, got {:?}", other),
        }
        assert_eq!(progress, vec![(1, 3)]);
    }

    #[test]
    fn test_blank_page_is_not_an_error() {
        let bytes = build_pdf(&["Some text.", ""]).unwrap();
        let text = extract_text(&bytes, |_, _| {}).unwrap();
        assert!(text.contains("Some text."));
    }

    #[test]
    fn test_garbage_after_header_is_extraction_error() {
        let result = extract_text(b"%PDF-1.4 this is not really a pdf", |_, _| {});
        assert!(matches!(result, Err(ReaderError::Extraction(_))));
    }
}
