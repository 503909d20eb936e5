use crate::bom_merge::domain::{SpecVersion, ValidationReport};
use crate::shared::Result;

/// SchemaValidator port for checking serialized output against a schema
pub trait SchemaValidator {
    /// Validates serialized content against the schema of `spec_version`
    ///
    /// # Arguments
    /// * `content` - Serialized document
    /// * `spec_version` - Spec version whose rules apply
    ///
    /// # Returns
    /// A report; an invalid document is a successful call with messages
    ///
    /// # Errors
    /// Returns an error only if validation could not be performed at all
    fn validate(&self, content: &str, spec_version: SpecVersion) -> Result<ValidationReport>;
}
