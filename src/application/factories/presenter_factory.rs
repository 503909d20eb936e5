use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Where the merged BOM is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// Maps an `--output-file` value to a presenter type; absent or `-` means stdout
    pub fn from_output_file(output_file: Option<PathBuf>) -> Self {
        match output_file {
            Some(path) if path.as_os_str() != "-" => PresenterType::File(path),
            _ => PresenterType::Stdout,
        }
    }
}

/// Factory for creating output presenters
///
/// Selects the infrastructure adapter for the merged document's
/// destination, so the CLI never names adapters directly.
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use cdx_merge::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::from_output_file(None));
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}
