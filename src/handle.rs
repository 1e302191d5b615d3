//! The document handle: one live document plus its configuration and caches.

use crate::config::{ConfigUpdate, DocumentConfig};
use crate::engine::xrust::XrustEngine;
use crate::engine::DomEngine;
use crate::error::DocumentError;
use crate::serialize::SaveOptions;
use crate::source::XmlSource;
use crate::stylesheet::StylesheetCache;

/// Facade over one DOM document.
///
/// Wraps an engine document together with a configuration record, a
/// name-keyed stylesheet cache, and a lazily-created transform processor.
/// Exactly one document is live at a time; loading or restarting replaces it.
///
/// Not designed for concurrent mutation. Callers sharing a handle across
/// threads of control must serialize access externally.
pub struct DocumentHandle<E: DomEngine> {
    pub(crate) engine: E,
    pub(crate) doc: E::Document,
    pub(crate) config: DocumentConfig,
    pub(crate) styles: StylesheetCache<E::Document>,
    pub(crate) processor: Option<E::Processor>,
}

/// Document handle over the default engine backend.
pub type Document = DocumentHandle<XrustEngine>;

impl Document {
    /// Creates a handle with default configuration over the default backend.
    pub fn new() -> Result<Self, DocumentError> {
        Self::with_engine(XrustEngine::new(), None)
    }

    /// Creates a handle, merging a partial configuration update into the
    /// defaults first.
    pub fn with_config(update: ConfigUpdate) -> Result<Self, DocumentError> {
        Self::with_engine(XrustEngine::new(), Some(update))
    }
}

impl<E: DomEngine> DocumentHandle<E> {
    /// Creates a handle over a specific engine backend.
    pub fn with_engine(engine: E, update: Option<ConfigUpdate>) -> Result<Self, DocumentError> {
        let mut config = DocumentConfig::default();
        if let Some(update) = &update {
            config.merge(update);
        }
        let doc = engine.new_document()?;
        Ok(DocumentHandle {
            engine,
            doc,
            config,
            styles: StylesheetCache::new(),
            processor: None,
        })
    }

    /// Re-merges configuration and, when `discard` is set, replaces the
    /// current document with a fresh empty one. Lookups resolved against the
    /// old tree are invalid afterwards. Stylesheet cache entries persist
    /// until overwritten or the handle is dropped.
    pub fn restart(
        &mut self,
        update: Option<&ConfigUpdate>,
        discard: bool,
    ) -> Result<(), DocumentError> {
        if let Some(update) = update {
            self.config.merge(update);
        }
        if discard {
            if self.config.debug {
                log::debug!("discarding current document");
            }
            self.doc = self.engine.new_document()?;
        }
        Ok(())
    }

    /// Loads XML into a fresh document. Sources longer than 500 bytes are
    /// taken as inline content; shorter ones as inline only if they contain
    /// `<`, otherwise as a file path.
    pub fn load(&mut self, source: &str) -> Result<(), DocumentError> {
        self.doc = match XmlSource::classify(source) {
            XmlSource::Inline(text) => self.engine.parse_str(text)?,
            XmlSource::File(path) => {
                if self.config.debug {
                    log::debug!("loading document from {}", path.display());
                }
                self.engine.parse_file(path)?
            }
        };
        Ok(())
    }

    /// Takes ownership of an externally built engine document, keeping the
    /// stylesheet cache and merging an optional configuration update.
    pub fn adopt(
        &mut self,
        doc: E::Document,
        update: Option<&ConfigUpdate>,
    ) -> Result<(), DocumentError> {
        self.doc = doc;
        self.restart(update, false)
    }

    /// Serializes the current document, post-processed per the option string
    /// (`cutXmlHead omitDoctype trimRoot`, any separator, case-insensitive).
    pub fn save_xml(&self, options: &str) -> Result<String, DocumentError> {
        let opts = SaveOptions::parse(options);
        let text = if opts.cut_xml_head {
            match self.root_element() {
                Some(root) => self.engine.serialize_node(&root)?,
                None => String::new(),
            }
        } else {
            self.engine.serialize_document(&self.doc)?
        };
        Ok(opts.apply(text))
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Merges a partial configuration update; absent keys keep their values,
    /// an unset `debug` re-inherits the process-wide default.
    pub fn set_config(&mut self, update: &ConfigUpdate) {
        self.config.merge(update);
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The wrapped engine document.
    pub fn document(&self) -> &E::Document {
        &self.doc
    }

    // Enumerated engine passthroughs. Anything else the engine offers is
    // reachable through `engine()` and `document()`.

    pub fn root_element(&self) -> Option<E::Node> {
        self.engine.document_element(&self.doc)
    }

    /// All matches for an XPath expression, in document order.
    pub fn query(&self, expr: &str) -> Result<Vec<E::Node>, DocumentError> {
        Ok(self.engine.query(&self.doc, expr)?)
    }

    /// First match for an XPath expression, if any.
    pub fn query_first(&self, expr: &str) -> Result<Option<E::Node>, DocumentError> {
        Ok(self.engine.query(&self.doc, expr)?.into_iter().next())
    }

    pub fn create_element(&self, name: &str) -> Result<E::Node, DocumentError> {
        Ok(self.engine.create_element(&self.doc, name)?)
    }

    pub fn create_text(&self, text: &str) -> Result<E::Node, DocumentError> {
        Ok(self.engine.create_text(&self.doc, text)?)
    }
}
