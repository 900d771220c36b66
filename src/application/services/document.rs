//! Element document service
//!
//! Loads JSON element documents into element trees and writes them back.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{Children, ElementBuilder, ElementDocument, ElementNode, RandomIdGenerator};
use crate::infrastructure::traits::FileSystem;

/// Service for reading and writing element documents.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
    id_range: u32,
}

impl DocumentService {
    /// Create a new document service; anonymous elements get identities in
    /// `[0, settings.id_range)`.
    pub fn new(fs: Arc<dyn FileSystem>, settings: &Settings) -> Self {
        Self {
            fs,
            id_range: settings.id_range,
        }
    }

    /// Load and build the element tree stored at `path`.
    ///
    /// The tree is returned only if the whole document deserializes and the
    /// resulting tree passes the child collection invariants
    /// (`DomainError::Invariant` otherwise).
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<ElementNode> {
        if !self.fs.exists(path) || !self.fs.is_file(path) {
            return Err(ApplicationError::DocumentNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read document", path)?;

        let mut builder =
            ElementBuilder::with_id_generator(RandomIdGenerator::new(self.id_range));
        let root = builder.build_from_json_str(&content)?;
        root.check_invariants()?;

        debug!("loaded {} with {} children", root, root.child_count());
        Ok(root)
    }

    /// Write `root` as a pretty-printed element document.
    #[instrument(level = "debug", skip(self, root))]
    pub fn save(&self, root: &ElementNode, path: &Path) -> ApplicationResult<()> {
        let json = ElementDocument::from_element(root).to_json()?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &json)
            .with_path_context("write document", path)?;
        Ok(())
    }

    /// Resolve `id` within `root` by deep search; `None` selects the root.
    pub fn select<'a>(
        &self,
        root: &'a ElementNode,
        id: Option<&str>,
    ) -> ApplicationResult<&'a ElementNode> {
        match id {
            None => Ok(root),
            Some(id) => root
                .search_children_by_id(id)
                .ok_or_else(|| ApplicationError::ElementNotFound(id.to_string())),
        }
    }
}
