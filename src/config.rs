//! Document-level configuration and merge semantics.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Process-wide debug default, read once from the `FLUXDOM_DEBUG` environment
/// variable on first use and never consulted again.
static DEBUG_DEFAULT: Lazy<bool> = Lazy::new(|| {
    std::env::var("FLUXDOM_DEBUG")
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
});

/// The process-wide debug default.
pub fn debug_default() -> bool {
    *DEBUG_DEFAULT
}

/// Recognized options for a document handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Enables verbose facade logging through the `log` crate.
    pub debug: bool,
    /// Enables host-callable hooks inside stylesheet processing.
    pub use_extensions: bool,
    /// Directory used to resolve bare stylesheet names to files.
    pub stylesheet_dir: PathBuf,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        DocumentConfig {
            debug: debug_default(),
            use_extensions: true,
            stylesheet_dir: PathBuf::from("./xsl"),
        }
    }
}

/// A partial configuration update. Keys left as `None` keep their previous
/// value, except `debug`, which re-inherits the process-wide default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub debug: Option<bool>,
    pub use_extensions: Option<bool>,
    pub stylesheet_dir: Option<PathBuf>,
}

impl DocumentConfig {
    /// Merges a partial update into this record. An unset `debug` resolves to
    /// the process-wide default at merge time, not at use time.
    pub fn merge(&mut self, update: &ConfigUpdate) {
        self.debug = update.debug.unwrap_or_else(debug_default);
        if let Some(use_extensions) = update.use_extensions {
            self.use_extensions = use_extensions;
        }
        if let Some(dir) = &update.stylesheet_dir {
            self.stylesheet_dir = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_absent_keys() {
        let mut config = DocumentConfig::default();
        config.merge(&ConfigUpdate {
            stylesheet_dir: Some(PathBuf::from("/tmp/styles")),
            ..Default::default()
        });
        assert_eq!(config.stylesheet_dir, PathBuf::from("/tmp/styles"));
        assert!(config.use_extensions);

        config.merge(&ConfigUpdate {
            use_extensions: Some(false),
            ..Default::default()
        });
        assert!(!config.use_extensions);
        // The earlier directory update survives the second merge.
        assert_eq!(config.stylesheet_dir, PathBuf::from("/tmp/styles"));
    }

    #[test]
    fn unset_debug_reinherits_process_default() {
        let mut config = DocumentConfig::default();
        config.merge(&ConfigUpdate {
            debug: Some(true),
            ..Default::default()
        });
        assert!(config.debug);

        // A merge without an explicit debug value falls back to the
        // process-wide default rather than keeping the prior value.
        config.merge(&ConfigUpdate::default());
        assert_eq!(config.debug, debug_default());
    }

    #[test]
    fn default_stylesheet_dir() {
        assert_eq!(
            DocumentConfig::default().stylesheet_dir,
            PathBuf::from("./xsl")
        );
    }
}
