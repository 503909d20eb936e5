/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, codecs, console, etc.).
pub mod bom_reader;
pub mod bom_serializer;
pub mod input_list_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod schema_validator;

pub use bom_reader::BomReader;
pub use bom_serializer::BomSerializer;
pub use input_list_reader::InputListReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use schema_validator::SchemaValidator;
