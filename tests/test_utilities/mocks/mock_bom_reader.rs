use async_trait::async_trait;
use cdx_merge::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock BomReader serving in-memory documents by path
///
/// Paths that were never added fail with `MergeError::InputLoad`, like a
/// missing file would.
#[derive(Default, Clone)]
pub struct MockBomReader {
    documents: HashMap<PathBuf, Option<Bom>>,
}

impl MockBomReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: &str, bom: Bom) -> Self {
        self.documents.insert(PathBuf::from(path), Some(bom));
        self
    }

    pub fn with_empty(mut self, path: &str) -> Self {
        self.documents.insert(PathBuf::from(path), None);
        self
    }
}

#[async_trait]
impl BomReader for MockBomReader {
    async fn read_bom(&self, path: &Path) -> Result<Option<Bom>> {
        self.documents.get(path).cloned().ok_or_else(|| {
            MergeError::InputLoad {
                path: path.to_path_buf(),
                details: "Mock document not found".to_string(),
            }
            .into()
        })
    }
}
