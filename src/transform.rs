//! Stylesheet resolution and named transforms.

use crate::engine::{DomEngine, TransformProcessor};
use crate::error::{DocumentError, EngineError};
use crate::frame::{ensure_framed, OutputSpec};
use crate::handle::DocumentHandle;
use crate::serialize::SaveOptions;
use crate::source::XmlSource;
use crate::stylesheet::RESERVED_DB_SOURCE;

impl<E: DomEngine> DocumentHandle<E> {
    /// Resolves a stylesheet by logical name and makes it the processor's
    /// active stylesheet, replacing whatever was active before.
    ///
    /// With no `source`, a cached entry is reused; a miss loads
    /// `{stylesheet_dir}/{name}.xsl`. Inline source content is auto-framed,
    /// parsed, and cached under `name`, overwriting any prior entry; any
    /// other source string is loaded as a file path. The transform processor
    /// is created on first call, with host-callable hooks wired once if
    /// `use_extensions` is set.
    pub fn resolve_stylesheet(
        &mut self,
        name: &str,
        source: Option<&str>,
    ) -> Result<(), DocumentError> {
        let style = self.resolve_stylesheet_document(name, source)?;
        let engine = &self.engine;
        let host_hooks = self.config.use_extensions;
        let processor = self
            .processor
            .get_or_insert_with(|| engine.new_processor(host_hooks));
        processor.import_stylesheet(&style)?;
        Ok(())
    }

    fn resolve_stylesheet_document(
        &mut self,
        name: &str,
        source: Option<&str>,
    ) -> Result<E::Document, DocumentError> {
        match source {
            Some(RESERVED_DB_SOURCE) => Err(DocumentError::ReservedStylesheetSource),
            Some(content) => {
                let style = match XmlSource::classify(content) {
                    XmlSource::Inline(fragment) => {
                        let framed = ensure_framed(fragment, &OutputSpec::default());
                        self.engine.parse_str(&framed)?
                    }
                    XmlSource::File(path) => self.engine.parse_file(path)?,
                };
                self.styles.insert(name, style.clone());
                Ok(style)
            }
            None => {
                if let Some(cached) = self.styles.get(name) {
                    return Ok(cached.clone());
                }
                let path = self.config.stylesheet_dir.join(format!("{}.xsl", name));
                if self.config.debug {
                    log::debug!("loading stylesheet '{}' from {}", name, path.display());
                }
                let style = self.engine.parse_file(&path)?;
                self.styles.insert(name, style.clone());
                Ok(style)
            }
        }
    }

    fn active_processor(&mut self) -> Result<&mut E::Processor, DocumentError> {
        match self.processor.as_mut() {
            Some(processor) => Ok(processor),
            None => Err(DocumentError::Engine(EngineError::Transform(String::from(
                "transform processor not initialized",
            )))),
        }
    }

    /// Runs the named transform over the current document and replaces the
    /// document with the result. Returns the handle so transforms chain:
    ///
    /// ```ignore
    /// doc.transform_in_place("clean", Some(CLEAN_XSL))?
    ///    .transform_in_place("render", None)?;
    /// ```
    pub fn transform_in_place(
        &mut self,
        name: &str,
        source: Option<&str>,
    ) -> Result<&mut Self, DocumentError> {
        self.resolve_stylesheet(name, source)?;
        let doc = self.doc.clone();
        self.doc = self.active_processor()?.transform_to_document(&doc)?;
        Ok(self)
    }

    /// Runs the named transform and returns the result as a new document,
    /// leaving the current document untouched.
    pub fn transform_to_document(
        &mut self,
        name: &str,
        source: Option<&str>,
    ) -> Result<E::Document, DocumentError> {
        self.resolve_stylesheet(name, source)?;
        let doc = self.doc.clone();
        Ok(self.active_processor()?.transform_to_document(&doc)?)
    }

    /// Runs the named transform and returns the result serialized, then
    /// post-processed per the option string. `cutxmlhead` has no effect on
    /// this path; the text is already detached from any live document.
    pub fn transform_to_text(
        &mut self,
        name: &str,
        source: Option<&str>,
        options: &str,
    ) -> Result<String, DocumentError> {
        let result = self.transform_to_document(name, source)?;
        let text = self.engine.serialize_document(&result)?;
        Ok(SaveOptions::parse(options).apply(text))
    }
}
