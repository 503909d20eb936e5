use std::fmt;
use std::str::FromStr;

/// Whether, and how strictly, the merged output is schema-validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Output is written without validation
    #[default]
    None,
    /// Invalid output is suppressed
    Strict,
    /// Invalid output is still written, but the merge reports failure
    Relaxed,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(ValidationMode::None),
            "strict" => Ok(ValidationMode::Strict),
            "relaxed" => Ok(ValidationMode::Relaxed),
            _ => Err(format!(
                "Invalid validation mode: {}. Please specify 'none', 'strict' or 'relaxed'",
                s
            )),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::None => write!(f, "none"),
            ValidationMode::Strict => write!(f, "strict"),
            ValidationMode::Relaxed => write!(f, "relaxed"),
        }
    }
}

/// Outcome of validating one serialized document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    messages: Vec<String>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn with_messages(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_mode_from_str() {
        assert_eq!(ValidationMode::from_str("none").unwrap(), ValidationMode::None);
        assert_eq!(ValidationMode::from_str("STRICT").unwrap(), ValidationMode::Strict);
        assert_eq!(ValidationMode::from_str("relaxed").unwrap(), ValidationMode::Relaxed);
        assert!(ValidationMode::from_str("lenient").is_err());
    }

    #[test]
    fn test_validation_mode_display() {
        assert_eq!(ValidationMode::Strict.to_string(), "strict");
        assert_eq!(ValidationMode::default().to_string(), "none");
    }

    #[test]
    fn test_report_validity_follows_messages() {
        let mut report = ValidationReport::valid();
        assert!(report.is_valid());
        report.push("components[0]: missing name");
        assert!(!report.is_valid());
        assert_eq!(report.messages().len(), 1);
    }
}
