use crate::application::dto::{MergeRequest, MergeResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// BomMergePort - Inbound port for the BOM merge use case
///
/// This port defines the interface that external adapters (CLI, API, etc.)
/// use to trigger a merge. It represents the application's public API.
///
/// Futures returned by this port are not required to be `Send`: the
/// console reporter behind it keeps its progress bar in a `RefCell`.
#[async_trait(?Send)]
pub trait BomMergePort {
    /// Merges the documents named by the request into one BOM
    ///
    /// # Arguments
    /// * `request` - Validated merge request
    ///
    /// # Returns
    /// The merged document, its serialized content, statistics and the
    /// validation report (when validation ran)
    ///
    /// # Errors
    /// Returns an error if:
    /// - Any input document fails to load (no merge is attempted)
    /// - Hierarchical merge is requested without a subject name and version
    /// - Serialization fails
    /// - The output fails schema validation (see `ValidationMode`)
    /// - Presenting the output fails
    async fn merge(&self, request: MergeRequest) -> Result<MergeResponse>;
}
