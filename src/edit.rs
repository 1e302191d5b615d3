//! Node resolution and structural mutation.
//!
//! Every mutation resolves its target and its insertable through one
//! protocol: targets become concrete nodes of the current document,
//! insertables are deep-copied into the document before attachment. A node
//! from another document is never attached directly.

use crate::engine::DomEngine;
use crate::error::{DocumentError, EngineError};
use crate::handle::DocumentHandle;
use crate::target::{Insertable, NodeTarget};

impl<E: DomEngine> DocumentHandle<E> {
    /// Resolves a target reference to a concrete node. An XPath expression
    /// that matches nothing yields `None`; the failure surfaces at the
    /// mutation that needed the node, not here.
    pub fn resolve_target(
        &self,
        target: &NodeTarget<E::Node>,
    ) -> Result<Option<E::Node>, DocumentError> {
        match target {
            NodeTarget::Root => Ok(Some(self.engine.document_node(&self.doc))),
            NodeTarget::Path(expr) => {
                Ok(self.engine.query(&self.doc, expr)?.into_iter().next())
            }
            NodeTarget::Node(node) => Ok(Some(node.clone())),
        }
    }

    /// Resolves insertable content and imports it into the current document.
    /// Fragments are parsed standalone and contribute their root element.
    /// The caller's node or fragment string is never modified.
    pub fn resolve_insertable(
        &self,
        insertable: &Insertable<E::Node>,
    ) -> Result<E::Node, DocumentError> {
        let node = match insertable {
            Insertable::Fragment(xml) => {
                let fragment_doc = self.engine.parse_str(xml)?;
                self.engine.document_element(&fragment_doc).ok_or_else(|| {
                    EngineError::Parse(String::from("fragment has no root element"))
                })?
            }
            Insertable::Node(node) => node.clone(),
        };
        Ok(self.engine.import_node(&self.doc, &node)?)
    }

    fn require_target(&self, target: &NodeTarget<E::Node>) -> Result<E::Node, DocumentError> {
        match self.resolve_target(target)? {
            Some(node) => Ok(node),
            None => {
                let path = match target {
                    NodeTarget::Path(expr) => expr.clone(),
                    _ => String::from("(node)"),
                };
                Err(DocumentError::TargetNotFound(path))
            }
        }
    }

    /// Inserts the insertable as the immediately preceding sibling of the
    /// target, under the target's parent. Fails before any mutation if the
    /// target resolves to nothing or has no parent.
    pub fn insert_before(
        &mut self,
        insertable: Insertable<E::Node>,
        target: NodeTarget<E::Node>,
    ) -> Result<(), DocumentError> {
        let node = self.require_target(&target)?;
        if self.engine.parent(&node).is_none() {
            return Err(DocumentError::NoParent);
        }
        let import = self.resolve_insertable(&insertable)?;
        Ok(self.engine.insert_before(&node, import)?)
    }

    /// Appends the insertable as the last child of the target.
    pub fn append_child(
        &mut self,
        insertable: Insertable<E::Node>,
        target: NodeTarget<E::Node>,
    ) -> Result<(), DocumentError> {
        let node = self.require_target(&target)?;
        let import = self.resolve_insertable(&insertable)?;
        Ok(self.engine.append_child(&node, import)?)
    }

    /// Replaces the target with the insertable under the target's parent.
    /// Unlike the other mutators the target is mandatory: `NodeTarget::Root`
    /// is a usage error, never defaulted.
    pub fn replace_node(
        &mut self,
        insertable: Insertable<E::Node>,
        target: NodeTarget<E::Node>,
    ) -> Result<(), DocumentError> {
        if matches!(target, NodeTarget::Root) {
            return Err(DocumentError::MissingTarget);
        }
        let node = self.require_target(&target)?;
        if self.engine.parent(&node).is_none() {
            return Err(DocumentError::NoParent);
        }
        let import = self.resolve_insertable(&insertable)?;
        Ok(self.engine.replace_node(&node, import)?)
    }
}
