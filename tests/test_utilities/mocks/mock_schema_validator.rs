use cdx_merge::prelude::*;

/// Mock SchemaValidator returning a fixed set of messages
#[derive(Default, Clone)]
pub struct MockSchemaValidator {
    messages: Vec<String>,
}

impl MockSchemaValidator {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn failing(messages: &[&str]) -> Self {
        Self {
            messages: messages.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl SchemaValidator for MockSchemaValidator {
    fn validate(&self, _content: &str, _spec_version: SpecVersion) -> Result<ValidationReport> {
        Ok(ValidationReport::with_messages(self.messages.clone()))
    }
}
