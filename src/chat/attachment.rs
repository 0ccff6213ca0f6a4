use base64::{Engine, engine::general_purpose::STANDARD};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum AttachmentError {
    #[error("El archivo PDF no es base64 válido: {0}")]
    Decode(String),
    #[error("No se pudo leer el archivo PDF: {0}")]
    Extract(String),
}

/// Pulls the text out of a document, one entry per page in document order.
pub trait TextExtractor: Send + Sync {
    fn pages(&self, document: &[u8]) -> Result<Vec<String>, AttachmentError>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn pages(&self, document: &[u8]) -> Result<Vec<String>, AttachmentError> {
        let document = lopdf::Document::load_mem(document)
            .map_err(|e| AttachmentError::Extract(e.to_string()))?;

        // get_pages is keyed by page number, so iteration is already in document order
        document
            .get_pages()
            .into_keys()
            .map(|page| {
                document
                    .extract_text(&[page])
                    // lopdf ends every text block with a line break of its own
                    .map(|text| text.trim_end_matches(['\n', '\r']).to_string())
                    .map_err(|e| AttachmentError::Extract(format!("page {page}: {e}")))
            })
            .collect()
    }
}

/// Builds the outbound user message from the typed text and an optional base64 PDF.
///
/// The attachment is all or nothing: any decode or extraction failure is
/// returned without touching the text. A PDF with no extractable text
/// leaves the message as typed.
pub fn assemble(
    user_text: &str,
    pdf_b64: Option<&str>,
    extractor: &dyn TextExtractor,
) -> Result<String, AttachmentError> {
    let Some(encoded) = pdf_b64.filter(|encoded| !encoded.is_empty()) else {
        return Ok(user_text.to_string());
    };

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| AttachmentError::Decode(e.to_string()))?;

    let text = extractor.pages(&bytes)?.concat();

    if text.is_empty() {
        log::debug!("attachment had no extractable text, sending message as typed");
        return Ok(user_text.to_string());
    }

    log::debug!("appending {} chars of attachment text", text.chars().count());

    Ok(format!("{user_text}\n\n{text}\n"))
}
