use crate::bom_merge::domain::Bom;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// BomReader port for loading input BOM documents
///
/// This port abstracts where input documents come from and how they are
/// decoded. The merge use case issues every read at once and waits for all
/// of them before merging.
///
/// # Async Support
/// Reads are async so that many inputs can be loaded concurrently.
/// Implementations must be `Send + Sync` to support concurrent access.
#[async_trait]
pub trait BomReader: Send + Sync {
    /// Reads and decodes one input document
    ///
    /// # Arguments
    /// * `path` - Path of the input document
    ///
    /// # Returns
    /// `Some(bom)` for a document, or `None` when the input is empty
    /// (a placeholder that the merge skips and counts)
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read or fails the security checks
    /// - The content is not a valid CycloneDX document
    async fn read_bom(&self, path: &Path) -> Result<Option<Bom>>;
}
