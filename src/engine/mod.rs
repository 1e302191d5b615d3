//! The explicit contract with the underlying DOM/XPath/XSLT engine.
//!
//! The facade implements none of the hard parts itself. Parsing, tree
//! storage, XPath evaluation, and stylesheet execution are reached through
//! these traits, with every delegated operation enumerated rather than
//! forwarded dynamically. One backend ships with the crate; see
//! [`xrust::XrustEngine`].

use crate::error::EngineError;
use std::fmt::Debug;
use std::path::Path;

pub mod xrust;

/// Operations the facade delegates to the DOM engine.
///
/// Implementations must parse strictly: external entity resolution disabled,
/// no error recovery for malformed input, UTF-8 documents with standalone
/// declaration semantics.
pub trait DomEngine {
    /// A parsed document owned by the engine. Cloning a handle aliases the
    /// same underlying tree.
    type Document: Clone + Debug;
    /// A handle to one node of a document.
    type Node: Clone + Debug;
    /// The stateful transform processor paired with this engine.
    type Processor: TransformProcessor<Self::Document>;

    /// Creates a fresh empty document.
    fn new_document(&self) -> Result<Self::Document, EngineError>;

    fn parse_str(&self, xml: &str) -> Result<Self::Document, EngineError>;

    fn parse_file(&self, path: &Path) -> Result<Self::Document, EngineError>;

    /// Serializes a whole document, XML declaration included.
    fn serialize_document(&self, doc: &Self::Document) -> Result<String, EngineError>;

    /// Serializes a single node without a declaration.
    fn serialize_node(&self, node: &Self::Node) -> Result<String, EngineError>;

    /// The document node itself, usable as a mutation target.
    fn document_node(&self, doc: &Self::Document) -> Self::Node;

    /// The document's root element, if the document has content.
    fn document_element(&self, doc: &Self::Document) -> Option<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Evaluates an XPath expression against the document, returning matches
    /// in document order.
    fn query(&self, doc: &Self::Document, expr: &str) -> Result<Vec<Self::Node>, EngineError>;

    fn create_element(&self, doc: &Self::Document, name: &str)
        -> Result<Self::Node, EngineError>;

    fn create_text(&self, doc: &Self::Document, text: &str) -> Result<Self::Node, EngineError>;

    /// Deep-copies a node so it can be attached under `doc`. The source node
    /// is left untouched, wherever it came from.
    fn import_node(&self, doc: &Self::Document, node: &Self::Node)
        -> Result<Self::Node, EngineError>;

    /// Inserts `node` as the immediately preceding sibling of `target`.
    fn insert_before(&self, target: &Self::Node, node: Self::Node) -> Result<(), EngineError>;

    /// Appends `node` as the last child of `target`.
    fn append_child(&self, target: &Self::Node, node: Self::Node) -> Result<(), EngineError>;

    /// Replaces `target` with `node` under the target's parent.
    fn replace_node(&self, target: &Self::Node, node: Self::Node) -> Result<(), EngineError>;

    /// Creates the transform processor for this engine. `host_hooks` wires
    /// host-callable support into the processor, once, at creation.
    fn new_processor(&self, host_hooks: bool) -> Self::Processor;
}

/// A stateful transform processor holding one active stylesheet at a time.
///
/// Importing a stylesheet replaces the previous one; running a transform
/// while concurrently importing a different stylesheet is caller error.
pub trait TransformProcessor<D> {
    /// Makes `style` the active stylesheet, replacing any previous one.
    fn import_stylesheet(&mut self, style: &D) -> Result<(), EngineError>;

    /// Runs the active stylesheet over `source`, producing a new document.
    /// The source document is not modified.
    fn transform_to_document(&mut self, source: &D) -> Result<D, EngineError>;
}
