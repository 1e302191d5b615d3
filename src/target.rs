//! Tagged references for mutation targets and insertable content.
//!
//! Mutation operations accept either a live node handle or an XPath
//! expression; a single resolution step turns both into a concrete node of
//! the current document before any structural change happens.

/// Identifies a location in the current document: the document node itself,
/// the first match of an XPath expression, or a live node handle.
#[derive(Debug, Clone, Default)]
pub enum NodeTarget<N> {
    /// The document node. This is the default target for insert and append.
    #[default]
    Root,
    /// An XPath expression; resolution takes the first match in document
    /// order. No match yields a null target, and the mutation that needed
    /// the node fails.
    Path(String),
    /// A node handle of the current document.
    Node(N),
}

impl<N> NodeTarget<N> {
    pub fn path(expr: impl Into<String>) -> Self {
        NodeTarget::Path(expr.into())
    }

    pub fn node(node: N) -> Self {
        NodeTarget::Node(node)
    }
}

/// Content to attach into the tree: a live node handle or a serialized XML
/// fragment. Either form is deep-copied into the current document before
/// attachment; the caller's original is never modified.
#[derive(Debug, Clone)]
pub enum Insertable<N> {
    /// A node handle, possibly from another document.
    Node(N),
    /// A standalone XML fragment; its root element is what gets attached.
    Fragment(String),
}

impl<N> Insertable<N> {
    pub fn fragment(xml: impl Into<String>) -> Self {
        Insertable::Fragment(xml.into())
    }

    pub fn node(node: N) -> Self {
        Insertable::Node(node)
    }
}

impl<N> From<&str> for Insertable<N> {
    fn from(xml: &str) -> Self {
        Insertable::Fragment(xml.to_string())
    }
}

impl<N> From<String> for Insertable<N> {
    fn from(xml: String) -> Self {
        Insertable::Fragment(xml)
    }
}
