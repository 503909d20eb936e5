use crate::shared::Result;
use std::path::Path;

/// InputListReader port for reading files that list input paths
///
/// List files are either newline-separated or NUL-separated; splitting is
/// done by the caller, this port only returns the raw content.
pub trait InputListReader {
    /// Reads the content of a list file
    ///
    /// # Arguments
    /// * `path` - Path of the list file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails the security checks
    fn read_list(&self, path: &Path) -> Result<String>;
}
