use crate::adapters::outbound::codec::CycloneDxJsonCodec;
use crate::bom_merge::domain::Bom;
use crate::ports::outbound::{BomReader, InputListReader};
use crate::shared::error::MergeError;
use crate::shared::security::{check_readable_file, MAX_FILE_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use tracing::debug;

/// FileSystemReader adapter for reading files from the file system
///
/// This adapter implements both BomReader and InputListReader ports. Input
/// documents are read with tokio so the use case can load them concurrently;
/// list files are small and read synchronously.
pub struct FileSystemReader {
    codec: CycloneDxJsonCodec,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            codec: CycloneDxJsonCodec::new(),
        }
    }

    async fn read_document(path: &Path) -> Result<String> {
        // Get file metadata without following symlinks
        let metadata = tokio::fs::symlink_metadata(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read file metadata: {}", e))?;
        check_readable_file(&metadata, path, "Input BOM", MAX_FILE_SIZE)?;

        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read file: {}", e))
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BomReader for FileSystemReader {
    async fn read_bom(&self, path: &Path) -> Result<Option<Bom>> {
        let to_load_error = |e: anyhow::Error| -> anyhow::Error {
            MergeError::InputLoad {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        };

        let content = Self::read_document(path).await.map_err(to_load_error)?;
        let bom = self.codec.parse(&content).map_err(to_load_error)?;

        debug!(
            path = %path.display(),
            components = bom.as_ref().map_or(0, Bom::component_count),
            "Loaded input document"
        );
        Ok(bom)
    }
}

impl InputListReader for FileSystemReader {
    fn read_list(&self, path: &Path) -> Result<String> {
        let metadata = fs::symlink_metadata(path).map_err(|e| MergeError::FileReadError {
            path: path.to_path_buf(),
            details: format!("Failed to read file metadata: {}", e),
        })?;
        check_readable_file(&metadata, path, "Input list file", MAX_FILE_SIZE)?;

        fs::read_to_string(path).map_err(|e| {
            MergeError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
