//! Validation of serialized merge output

mod cyclonedx_schema_validator;

pub use cyclonedx_schema_validator::CycloneDxSchemaValidator;
