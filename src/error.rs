use thiserror::Error;

/// Failures reported by the underlying DOM/XPath/XSLT engine. The engine's
/// own message is carried through unmodified.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("XML parsing error: {0}")]
    Parse(String),

    #[error("XPath evaluation error: {0}")]
    Query(String),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Node mutation error: {0}")]
    Mutate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised by the facade itself.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("No node matched target path '{0}'")]
    TargetNotFound(String),

    #[error("Target node has no parent")]
    NoParent,

    #[error("Replace requires an explicit target node or path")]
    MissingTarget,

    #[error("Stylesheet source 'db' is reserved for future use")]
    ReservedStylesheetSource,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
