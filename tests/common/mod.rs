use fluxdom::{Document, DocumentError};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Initializes test logging once; repeat calls are harmless.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a handle with the given XML already loaded.
pub fn doc_from(xml: &str) -> Result<Document, DocumentError> {
    init_logging();
    let mut doc = Document::new()?;
    doc.load(xml)?;
    Ok(doc)
}
