/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod codec;
pub mod console;
pub mod filesystem;
pub mod validation;

pub use codec::CycloneDxJsonCodec;
pub use console::StderrProgressReporter;
pub use filesystem::{FileSystemReader, FileSystemWriter, StdoutPresenter};
pub use validation::CycloneDxSchemaValidator;
