use crate::bom_merge::domain::{Bom, MergeStatistics, ValidationReport};

/// MergeResponse - Result of a successful merge
#[derive(Debug, Clone)]
pub struct MergeResponse {
    /// The normalized merged document
    pub bom: Bom,
    /// Serialized form of `bom`, exactly as presented
    pub content: String,
    pub statistics: MergeStatistics,
    /// Present when validation ran
    pub validation: Option<ValidationReport>,
}

impl MergeResponse {
    pub fn new(
        bom: Bom,
        content: String,
        statistics: MergeStatistics,
        validation: Option<ValidationReport>,
    ) -> Self {
        Self {
            bom,
            content,
            statistics,
            validation,
        }
    }
}
