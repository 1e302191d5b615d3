//! Engine backend over the `xrust` crate: pure-Rust XML trees, XPath 1.0/2.0
//! evaluation, and XSLT transformation in a single engine.

use super::{DomEngine, TransformProcessor};
use crate::error::EngineError;
use std::path::Path;
use xrust::item::{Item, Node as NodeTrait, NodeType};
use xrust::parser::xml;
use xrust::parser::xpath;
use xrust::qname::QualifiedName;
use xrust::transform::context::{ContextBuilder, StaticContextBuilder};
use xrust::trees::smite::RNode;
use xrust::value::Value;
use xrust::xdmerror::{Error, ErrorKind};
use xrust::xslt::from_document;

/// Parses XML into a fresh smite document node.
fn parse_into_new_document(input: &str) -> Result<RNode, Error> {
    let doc = RNode::new_document();
    xml::parse(doc.clone(), input, None)?;
    Ok(doc)
}

fn unavailable(what: &str) -> Error {
    Error::new(ErrorKind::NotImplemented, String::from(what))
}

/// Engine implementation backed by `xrust` smite trees. Stateless; documents
/// and nodes are both `RNode` handles with shared-ownership semantics.
#[derive(Debug, Default, Clone, Copy)]
pub struct XrustEngine;

impl XrustEngine {
    pub fn new() -> Self {
        XrustEngine
    }
}

impl DomEngine for XrustEngine {
    type Document = RNode;
    type Node = RNode;
    type Processor = XrustProcessor;

    fn new_document(&self) -> Result<RNode, EngineError> {
        Ok(RNode::new_document())
    }

    fn parse_str(&self, xmltext: &str) -> Result<RNode, EngineError> {
        parse_into_new_document(xmltext).map_err(|e| EngineError::Parse(e.to_string()))
    }

    fn parse_file(&self, path: &Path) -> Result<RNode, EngineError> {
        let text = std::fs::read_to_string(path)?;
        parse_into_new_document(&text)
            .map_err(|e| EngineError::Parse(format!("{}: {}", path.display(), e)))
    }

    fn serialize_document(&self, doc: &RNode) -> Result<String, EngineError> {
        Ok(format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}",
            doc.to_xml()
        ))
    }

    fn serialize_node(&self, node: &RNode) -> Result<String, EngineError> {
        Ok(node.to_xml())
    }

    fn document_node(&self, doc: &RNode) -> RNode {
        doc.clone()
    }

    fn document_element(&self, doc: &RNode) -> Option<RNode> {
        doc.child_iter()
            .find(|child| child.node_type() == NodeType::Element)
    }

    fn parent(&self, node: &RNode) -> Option<RNode> {
        node.parent()
    }

    fn query(&self, doc: &RNode, expr: &str) -> Result<Vec<RNode>, EngineError> {
        let transform = xpath::parse::<RNode>(expr, None)
            .map_err(|e| EngineError::Query(format!("'{}': {}", expr, e)))?;
        let mut stctxt = StaticContextBuilder::new()
            .message(|_| Ok(()))
            .fetcher(|_| Err(unavailable("external fetch disabled")))
            .parser(|_| Err(unavailable("external parse disabled")))
            .build();
        let mut ctxt = ContextBuilder::new()
            .context(vec![Item::Node(doc.clone())])
            .build();
        let seq = ctxt
            .dispatch(&mut stctxt, &transform)
            .map_err(|e| EngineError::Query(format!("'{}': {}", expr, e)))?;
        Ok(seq
            .iter()
            .filter_map(|item| match item {
                Item::Node(n) => Some(n.clone()),
                _ => None,
            })
            .collect())
    }

    fn create_element(&self, doc: &RNode, name: &str) -> Result<RNode, EngineError> {
        doc.new_element(QualifiedName::new(None, None, name.to_string()).into())
            .map_err(|e| EngineError::Mutate(e.to_string()))
    }

    fn create_text(&self, doc: &RNode, text: &str) -> Result<RNode, EngineError> {
        doc.new_text(Value::from(text.to_string()).into())
            .map_err(|e| EngineError::Mutate(e.to_string()))
    }

    fn import_node(&self, _doc: &RNode, node: &RNode) -> Result<RNode, EngineError> {
        node.deep_copy()
            .map_err(|e| EngineError::Mutate(e.to_string()))
    }

    fn insert_before(&self, target: &RNode, node: RNode) -> Result<(), EngineError> {
        let mut target = target.clone();
        target
            .insert_before(node)
            .map_err(|e| EngineError::Mutate(e.to_string()))
    }

    fn append_child(&self, target: &RNode, node: RNode) -> Result<(), EngineError> {
        let mut target = target.clone();
        target
            .push(node)
            .map_err(|e| EngineError::Mutate(e.to_string()))
    }

    fn replace_node(&self, target: &RNode, node: RNode) -> Result<(), EngineError> {
        let mut target = target.clone();
        target
            .insert_before(node)
            .map_err(|e| EngineError::Mutate(e.to_string()))?;
        // pop detaches the target itself from its parent.
        target.pop().map_err(|e| EngineError::Mutate(e.to_string()))
    }

    fn new_processor(&self, host_hooks: bool) -> XrustProcessor {
        XrustProcessor {
            active: None,
            host_hooks,
        }
    }
}

/// Stateful XSLT processor. Holds the currently active stylesheet document;
/// each import replaces it. The stylesheet is compiled per transform run,
/// against a fresh result document.
pub struct XrustProcessor {
    active: Option<RNode>,
    host_hooks: bool,
}

impl TransformProcessor<RNode> for XrustProcessor {
    fn import_stylesheet(&mut self, style: &RNode) -> Result<(), EngineError> {
        self.active = Some(style.clone());
        Ok(())
    }

    fn transform_to_document(&mut self, source: &RNode) -> Result<RNode, EngineError> {
        let style = self
            .active
            .clone()
            .ok_or_else(|| EngineError::Transform(String::from("no active stylesheet")))?;

        let host_hooks = self.host_hooks;
        let mut stctxt = StaticContextBuilder::new()
            .message(|m| {
                log::debug!("stylesheet message: {}", m);
                Ok(())
            })
            .fetcher(move |url| {
                if host_hooks {
                    std::fs::read_to_string(url.path())
                        .map_err(|e| Error::new(ErrorKind::Unknown, e.to_string()))
                } else {
                    Err(unavailable("host fetch disabled"))
                }
            })
            .parser(move |s| {
                if host_hooks {
                    parse_into_new_document(s)
                } else {
                    Err(unavailable("host parse disabled"))
                }
            })
            .build();

        let mut ctxt = from_document(style, None, |s| parse_into_new_document(s), |_| {
            Err(unavailable("stylesheet inclusion fetch disabled"))
        })
        .map_err(|e| EngineError::Transform(e.to_string()))?;

        let mut result = RNode::new_document();
        ctxt.context(vec![Item::Node(source.clone())], 0);
        ctxt.result_document(result.clone());
        let seq = ctxt
            .evaluate(&mut stctxt)
            .map_err(|e| EngineError::Transform(e.to_string()))?;

        // Top-level result items become children of the result document.
        for item in seq {
            match item {
                Item::Node(n) => result
                    .push(n)
                    .map_err(|e| EngineError::Transform(e.to_string()))?,
                other => {
                    let text = result
                        .new_text(Value::from(other.to_string()).into())
                        .map_err(|e| EngineError::Transform(e.to_string()))?;
                    result
                        .push(text)
                        .map_err(|e| EngineError::Transform(e.to_string()))?;
                }
            }
        }
        Ok(result)
    }
}
