use crate::bom_merge::domain::Bom;
use crate::shared::Result;

/// BomSerializer port for encoding the merged document
///
/// The serialized content is what gets validated and what gets presented,
/// so validation always sees exactly the bytes that would be written.
pub trait BomSerializer {
    /// Serializes a document in its declared spec version
    ///
    /// # Arguments
    /// * `bom` - The normalized merged document
    ///
    /// # Returns
    /// The encoded document
    ///
    /// # Errors
    /// Returns an error if encoding fails
    fn serialize(&self, bom: &Bom) -> Result<String>;
}
