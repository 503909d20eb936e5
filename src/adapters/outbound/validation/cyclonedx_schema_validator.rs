use crate::bom_merge::domain::{ComponentType, SpecVersion, ValidationReport};
use crate::ports::outbound::SchemaValidator;
use crate::shared::Result;
use chrono::DateTime;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

const SERIAL_NUMBER_PREFIX: &str = "urn:uuid:";

/// CycloneDxSchemaValidator adapter for checking merged documents
///
/// Applies the structural rules of the CycloneDX JSON schema that a merge
/// can break: envelope fields, component names and types for the target
/// version, bom-ref uniqueness across components and services, and
/// dependency resolution.
///
/// Validation problems are collected into the report. Only content that is
/// not JSON at all is reported as an issue too; the adapter never fails.
pub struct CycloneDxSchemaValidator;

impl CycloneDxSchemaValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_document(document: &Map<String, Value>, spec_version: SpecVersion) -> ValidationReport {
        let mut report = ValidationReport::valid();

        Self::check_envelope(document, spec_version, &mut report);

        let mut bom_refs = HashSet::new();
        if let Some(metadata) = document.get("metadata") {
            Self::check_metadata(metadata, spec_version, &mut bom_refs, &mut report);
        }
        match document.get("components") {
            Some(Value::Array(components)) => {
                Self::check_components(components, "components", spec_version, &mut bom_refs, &mut report)
            }
            Some(_) => report.push("components: must be an array"),
            None => {}
        }
        match document.get("services") {
            Some(Value::Array(services)) => {
                Self::check_services(services, "services", &mut bom_refs, &mut report)
            }
            Some(_) => report.push("services: must be an array"),
            None => {}
        }
        match document.get("dependencies") {
            Some(Value::Array(dependencies)) => {
                Self::check_dependencies(dependencies, &bom_refs, &mut report)
            }
            Some(_) => report.push("dependencies: must be an array"),
            None => {}
        }

        report
    }

    fn check_envelope(
        document: &Map<String, Value>,
        spec_version: SpecVersion,
        report: &mut ValidationReport,
    ) {
        if document.get("bomFormat").and_then(Value::as_str) != Some("CycloneDX") {
            report.push("bomFormat: must be \"CycloneDX\"");
        }

        match document.get("specVersion").and_then(Value::as_str) {
            Some(declared) if declared == spec_version.as_str() => {}
            Some(declared) => report.push(format!(
                "specVersion: '{}' does not match the expected version {}",
                declared, spec_version
            )),
            None => report.push("specVersion: required"),
        }

        match document.get("serialNumber") {
            None => {}
            Some(Value::String(serial)) if is_urn_uuid(serial) => {}
            Some(other) => report.push(format!(
                "serialNumber: {} is not of the form urn:uuid:<uuid>",
                other
            )),
        }

        match document.get("version") {
            None => {}
            Some(version) if version.as_u64().is_some_and(|v| v >= 1) => {}
            Some(other) => report.push(format!("version: {} must be an integer >= 1", other)),
        }
    }

    fn check_metadata(
        metadata: &Value,
        spec_version: SpecVersion,
        bom_refs: &mut HashSet<String>,
        report: &mut ValidationReport,
    ) {
        let Some(metadata) = metadata.as_object() else {
            report.push("metadata: must be an object");
            return;
        };

        match metadata.get("timestamp") {
            None => {}
            Some(Value::String(ts)) if DateTime::parse_from_rfc3339(ts).is_ok() => {}
            Some(other) => report.push(format!(
                "metadata.timestamp: {} is not an RFC 3339 date-time",
                other
            )),
        }

        if let Some(component) = metadata.get("component") {
            Self::check_component(component, "metadata.component", spec_version, bom_refs, report);
        }
    }

    fn check_components(
        components: &[Value],
        path: &str,
        spec_version: SpecVersion,
        bom_refs: &mut HashSet<String>,
        report: &mut ValidationReport,
    ) {
        for (index, component) in components.iter().enumerate() {
            let path = format!("{}[{}]", path, index);
            Self::check_component(component, &path, spec_version, bom_refs, report);
        }
    }

    fn check_component(
        component: &Value,
        path: &str,
        spec_version: SpecVersion,
        bom_refs: &mut HashSet<String>,
        report: &mut ValidationReport,
    ) {
        let Some(component) = component.as_object() else {
            report.push(format!("{}: must be an object", path));
            return;
        };

        match component.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => {}
            _ => report.push(format!("{}.name: required and must not be empty", path)),
        }

        match component.get("type").and_then(Value::as_str) {
            Some(raw) => match ComponentType::from_str(raw) {
                Ok(component_type) if spec_version.supports(component_type) => {}
                Ok(component_type) => report.push(format!(
                    "{}.type: '{}' requires CycloneDX {} or later",
                    path,
                    component_type,
                    component_type.introduced_in()
                )),
                Err(e) => report.push(format!("{}.type: {}", path, e)),
            },
            None => report.push(format!("{}.type: required", path)),
        }

        if let Some(bom_ref) = component.get("bom-ref").and_then(Value::as_str) {
            if !bom_refs.insert(bom_ref.to_string()) {
                report.push(format!("{}.bom-ref: '{}' is not unique", path, bom_ref));
            }
        }

        match component.get("components") {
            Some(Value::Array(children)) => {
                let path = format!("{}.components", path);
                Self::check_components(children, &path, spec_version, bom_refs, report);
            }
            Some(_) => report.push(format!("{}.components: must be an array", path)),
            None => {}
        }
    }

    fn check_services(
        services: &[Value],
        path: &str,
        bom_refs: &mut HashSet<String>,
        report: &mut ValidationReport,
    ) {
        for (index, service) in services.iter().enumerate() {
            let path = format!("{}[{}]", path, index);
            let Some(service) = service.as_object() else {
                report.push(format!("{}: must be an object", path));
                continue;
            };

            match service.get("name").and_then(Value::as_str) {
                Some(name) if !name.trim().is_empty() => {}
                _ => report.push(format!("{}.name: required and must not be empty", path)),
            }
            if let Some(bom_ref) = service.get("bom-ref").and_then(Value::as_str) {
                if !bom_refs.insert(bom_ref.to_string()) {
                    report.push(format!("{}.bom-ref: '{}' is not unique", path, bom_ref));
                }
            }
            match service.get("services") {
                Some(Value::Array(children)) => {
                    let path = format!("{}.services", path);
                    Self::check_services(children, &path, bom_refs, report);
                }
                Some(_) => report.push(format!("{}.services: must be an array", path)),
                None => {}
            }
        }
    }

    fn check_dependencies(
        dependencies: &[Value],
        bom_refs: &HashSet<String>,
        report: &mut ValidationReport,
    ) {
        let mut seen = HashSet::new();
        for (index, dependency) in dependencies.iter().enumerate() {
            let path = format!("dependencies[{}]", index);
            let Some(bom_ref) = dependency.get("ref").and_then(Value::as_str) else {
                report.push(format!("{}.ref: required", path));
                continue;
            };

            if !seen.insert(bom_ref) {
                report.push(format!("{}.ref: '{}' is listed more than once", path, bom_ref));
            }
            if !bom_refs.contains(bom_ref) {
                report.push(format!("{}.ref: '{}' does not match any bom-ref", path, bom_ref));
            }

            let targets = dependency
                .get("dependsOn")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for target in targets {
                match target.as_str() {
                    Some(target) if bom_refs.contains(target) => {}
                    Some(target) => report.push(format!(
                        "{}.dependsOn: '{}' does not match any bom-ref",
                        path, target
                    )),
                    None => report.push(format!("{}.dependsOn: entries must be strings", path)),
                }
            }
        }
    }
}

fn is_urn_uuid(serial: &str) -> bool {
    serial
        .strip_prefix(SERIAL_NUMBER_PREFIX)
        .is_some_and(|uuid| Uuid::parse_str(uuid).is_ok())
}

impl Default for CycloneDxSchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidator for CycloneDxSchemaValidator {
    fn validate(&self, content: &str, spec_version: SpecVersion) -> Result<ValidationReport> {
        let report = match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(document)) => Self::check_document(&document, spec_version),
            Ok(_) => ValidationReport::with_messages(vec![
                "document: must be a JSON object".to_string()
            ]),
            Err(e) => ValidationReport::with_messages(vec![format!("document: invalid JSON: {}", e)]),
        };
        Ok(report)
    }
}
