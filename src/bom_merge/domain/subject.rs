use super::{Component, ComponentType};
use crate::shared::error::MergeError;
use crate::shared::Result;

/// SubjectDescriptor value object: caller-supplied group/name/version
///
/// Describes the component a merged document is about when the caller
/// wants to override whatever the inputs claim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectDescriptor {
    group: Option<String>,
    name: Option<String>,
    version: Option<String>,
}

impl SubjectDescriptor {
    /// Builds a descriptor, treating blank strings as absent
    pub fn new(group: Option<String>, name: Option<String>, version: Option<String>) -> Self {
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            group: clean(group),
            name: clean(name),
            version: clean(version),
        }
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// True when any of group, name or version was supplied
    pub fn is_specified(&self) -> bool {
        self.group.is_some() || self.name.is_some() || self.version.is_some()
    }

    /// Hierarchical merges hang every input under this subject, so it must
    /// be fully identifiable.
    pub fn require_name_and_version(&self) -> Result<()> {
        match (&self.name, &self.version) {
            (Some(_), Some(_)) => Ok(()),
            (None, Some(_)) => Err(MergeError::parameter(
                "Hierarchical merge requires a subject name (--name)",
            )
            .into()),
            (Some(_), None) => Err(MergeError::parameter(
                "Hierarchical merge requires a subject version (--version)",
            )
            .into()),
            (None, None) => Err(MergeError::parameter(
                "Hierarchical merge requires both a subject name (--name) and version (--version)",
            )
            .into()),
        }
    }

    /// bom-ref for the subject: `group.name@version`, parts omitted when absent
    pub fn bom_ref(&self) -> String {
        let mut bom_ref = String::new();
        if let Some(group) = &self.group {
            bom_ref.push_str(group);
            bom_ref.push('.');
        }
        bom_ref.push_str(self.name.as_deref().unwrap_or("merged-bom"));
        if let Some(version) = &self.version {
            bom_ref.push('@');
            bom_ref.push_str(version);
        }
        bom_ref
    }

    /// Materializes the descriptor as an `application` component
    pub fn to_component(&self) -> Component {
        let mut component = Component::new(
            ComponentType::Application,
            self.name.clone().unwrap_or_else(|| "merged-bom".to_string()),
        )
        .with_bom_ref(self.bom_ref());
        if let Some(group) = &self.group {
            component = component.with_group(group.clone());
        }
        if let Some(version) = &self.version {
            component = component.with_version(version.clone());
        }
        component
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(group: Option<&str>, name: Option<&str>, version: Option<&str>) -> SubjectDescriptor {
        SubjectDescriptor::new(
            group.map(String::from),
            name.map(String::from),
            version.map(String::from),
        )
    }

    #[test]
    fn test_blank_values_are_absent() {
        let d = descriptor(Some("  "), Some(""), None);
        assert!(!d.is_specified());
        assert!(d.group().is_none());
        assert!(d.name().is_none());
    }

    #[test]
    fn test_require_name_and_version() {
        assert!(descriptor(None, Some("app"), Some("1.0")).require_name_and_version().is_ok());

        let err = descriptor(None, Some("app"), None)
            .require_name_and_version()
            .unwrap_err();
        assert!(err.to_string().contains("--version"));

        let err = descriptor(Some("org"), None, None)
            .require_name_and_version()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MergeError>(),
            Some(MergeError::ParameterValidation { .. })
        ));
    }

    #[test]
    fn test_bom_ref_format() {
        assert_eq!(descriptor(Some("org.acme"), Some("app"), Some("2.0")).bom_ref(), "org.acme.app@2.0");
        assert_eq!(descriptor(None, Some("app"), Some("2.0")).bom_ref(), "app@2.0");
        assert_eq!(descriptor(None, Some("app"), None).bom_ref(), "app");
    }

    #[test]
    fn test_to_component() {
        let component = descriptor(Some("org.acme"), Some("app"), Some("2.0")).to_component();
        assert_eq!(component.component_type(), ComponentType::Application);
        assert_eq!(component.group(), Some("org.acme"));
        assert_eq!(component.name(), "app");
        assert_eq!(component.version(), Some("2.0"));
        assert_eq!(component.bom_ref(), Some("org.acme.app@2.0"));
    }
}
