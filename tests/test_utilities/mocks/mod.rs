/// Mock implementations for testing
mod mock_bom_reader;
mod mock_output_presenter;
mod mock_progress_reporter;
mod mock_schema_validator;

pub use mock_bom_reader::MockBomReader;
pub use mock_output_presenter::MockOutputPresenter;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_schema_validator::MockSchemaValidator;
