use std::fmt;
use std::str::FromStr;

/// CycloneDX specification versions understood by the merge engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SpecVersion {
    V1_2,
    V1_3,
    V1_4,
    V1_5,
    #[default]
    V1_6,
}

impl SpecVersion {
    pub const ALL: [SpecVersion; 5] = [
        SpecVersion::V1_2,
        SpecVersion::V1_3,
        SpecVersion::V1_4,
        SpecVersion::V1_5,
        SpecVersion::V1_6,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecVersion::V1_2 => "1.2",
            SpecVersion::V1_3 => "1.3",
            SpecVersion::V1_4 => "1.4",
            SpecVersion::V1_5 => "1.5",
            SpecVersion::V1_6 => "1.6",
        }
    }

    /// Whether a component type is allowed by this version of the schema
    pub fn supports(&self, component_type: ComponentType) -> bool {
        *self >= component_type.introduced_in()
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpecVersion::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| {
                format!(
                    "Unsupported CycloneDX spec version: '{}'. Supported versions: 1.2, 1.3, 1.4, 1.5, 1.6",
                    s
                )
            })
    }
}

/// CycloneDX component classification (`type` field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentType {
    Application,
    Framework,
    Library,
    Container,
    Platform,
    OperatingSystem,
    Device,
    DeviceDriver,
    Firmware,
    File,
    MachineLearningModel,
    Data,
    CryptographicAsset,
}

impl ComponentType {
    pub const ALL: [ComponentType; 13] = [
        ComponentType::Application,
        ComponentType::Framework,
        ComponentType::Library,
        ComponentType::Container,
        ComponentType::Platform,
        ComponentType::OperatingSystem,
        ComponentType::Device,
        ComponentType::DeviceDriver,
        ComponentType::Firmware,
        ComponentType::File,
        ComponentType::MachineLearningModel,
        ComponentType::Data,
        ComponentType::CryptographicAsset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Application => "application",
            ComponentType::Framework => "framework",
            ComponentType::Library => "library",
            ComponentType::Container => "container",
            ComponentType::Platform => "platform",
            ComponentType::OperatingSystem => "operating-system",
            ComponentType::Device => "device",
            ComponentType::DeviceDriver => "device-driver",
            ComponentType::Firmware => "firmware",
            ComponentType::File => "file",
            ComponentType::MachineLearningModel => "machine-learning-model",
            ComponentType::Data => "data",
            ComponentType::CryptographicAsset => "cryptographic-asset",
        }
    }

    /// First spec version whose schema accepts this type
    pub fn introduced_in(&self) -> SpecVersion {
        match self {
            ComponentType::Container => SpecVersion::V1_2,
            ComponentType::Platform
            | ComponentType::DeviceDriver
            | ComponentType::MachineLearningModel
            | ComponentType::Data => SpecVersion::V1_5,
            ComponentType::CryptographicAsset => SpecVersion::V1_6,
            _ => SpecVersion::V1_2,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown component type: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_version_from_str() {
        assert_eq!(SpecVersion::from_str("1.4").unwrap(), SpecVersion::V1_4);
        assert_eq!(SpecVersion::from_str(" 1.6 ").unwrap(), SpecVersion::V1_6);
    }

    #[test]
    fn test_spec_version_from_str_unsupported() {
        let err = SpecVersion::from_str("1.1").unwrap_err();
        assert!(err.contains("Unsupported CycloneDX spec version"));
        assert!(SpecVersion::from_str("").is_err());
    }

    #[test]
    fn test_spec_version_default_is_latest() {
        assert_eq!(SpecVersion::default(), SpecVersion::V1_6);
    }

    #[test]
    fn test_spec_version_ordering() {
        assert!(SpecVersion::V1_2 < SpecVersion::V1_5);
        assert!(SpecVersion::V1_6 > SpecVersion::V1_5);
    }

    #[test]
    fn test_component_type_round_trip_names() {
        for t in ComponentType::ALL {
            assert_eq!(ComponentType::from_str(t.as_str()).unwrap(), t);
        }
        assert!(ComponentType::from_str("widget").is_err());
    }

    #[test]
    fn test_supports_by_version() {
        assert!(SpecVersion::V1_2.supports(ComponentType::Library));
        assert!(!SpecVersion::V1_4.supports(ComponentType::Data));
        assert!(SpecVersion::V1_5.supports(ComponentType::MachineLearningModel));
        assert!(!SpecVersion::V1_5.supports(ComponentType::CryptographicAsset));
        assert!(SpecVersion::V1_6.supports(ComponentType::CryptographicAsset));
    }
}
