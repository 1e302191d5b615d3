//! # fluxdom
//!
//! Convenience facade over a DOM/XPath/XSLT engine for loading, transforming,
//! serializing, and surgically editing XML/XHTML documents.
//!
//! Parsing, tree storage, XPath evaluation, and XSLT execution are delegated
//! to an engine backend behind the [`engine::DomEngine`] contract; the crate
//! ships one backend built on `xrust`. What the facade adds on top:
//!
//! - **Document handle**: one unified interface over a live document, its
//!   configuration, and its caches ([`DocumentHandle`], [`Document`])
//! - **Serialization options**: friendly post-processing of serialized XML
//!   text ([`SaveOptions`])
//! - **Stylesheet cache and auto-framing**: stylesheets registered once under
//!   a logical name and reused across chained transforms
//!   ([`StylesheetCache`], [`ensure_framed`])
//! - **Node resolution**: a live node handle or an XPath expression, used
//!   interchangeably in mutation operations ([`NodeTarget`], [`Insertable`])
//!
//! ## Quick start
//!
//! ```ignore
//! use fluxdom::{Document, Insertable, NodeTarget};
//!
//! let mut doc = Document::new()?;
//! doc.load("<catalog><item>first</item></catalog>")?;
//! doc.append_child(
//!     Insertable::fragment("<item>second</item>"),
//!     NodeTarget::path("/catalog"),
//! )?;
//! let xml = doc.save_xml("cutXmlHead")?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod frame;
pub mod serialize;
pub mod source;
pub mod stylesheet;
pub mod target;

mod edit;
mod handle;
mod transform;

pub use config::{debug_default, ConfigUpdate, DocumentConfig};
pub use error::{DocumentError, EngineError};
pub use frame::{ensure_framed, OutputSpec, EXTENSION_NAMESPACE};
pub use handle::{Document, DocumentHandle};
pub use serialize::SaveOptions;
pub use source::XmlSource;
pub use stylesheet::{StylesheetCache, RESERVED_DB_SOURCE};
pub use target::{Insertable, NodeTarget};
