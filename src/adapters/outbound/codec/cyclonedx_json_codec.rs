use crate::bom_merge::domain::{
    Bom, Component, ComponentType, Dependency, Metadata, Service, SpecVersion, Tool,
};
use crate::ports::outbound::BomSerializer;
use crate::shared::error::MergeError;
use crate::shared::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::warn;

// CycloneDX JSON wire structures
// Only the fields the merge engine works with are modelled; any other
// component or service field is carried through `extra` untouched.

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxBom {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    #[serde(default)]
    bom_format: Option<String>,
    #[serde(default)]
    spec_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    serial_number: Option<String>,
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<CdxMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    components: Option<Vec<CdxComponent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    services: Option<Vec<CdxService>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dependencies: Option<Vec<CdxDependency>>,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tools: Option<CdxTools>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    component: Option<CdxComponent>,
}

/// `metadata.tools` is an array up to 1.4 and an object of components and
/// services from 1.5 on. Both are accepted; the array form is written.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum CdxTools {
    Legacy(Vec<CdxTool>),
    Structured(CdxToolsObject),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxTool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vendor: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CdxToolsObject {
    #[serde(default)]
    components: Vec<CdxToolComponent>,
    #[serde(default)]
    services: Vec<CdxToolComponent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CdxToolComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponent {
    #[serde(rename = "type")]
    component_type: String,
    #[serde(rename = "bom-ref", default, skip_serializing_if = "Option::is_none")]
    bom_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    components: Option<Vec<CdxComponent>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CdxService {
    #[serde(rename = "bom-ref", default, skip_serializing_if = "Option::is_none")]
    bom_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    services: Option<Vec<CdxService>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxDependency {
    #[serde(rename = "ref")]
    bom_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    depends_on: Option<Vec<String>>,
}

impl TryFrom<CdxComponent> for Component {
    type Error = String;

    fn try_from(cdx: CdxComponent) -> std::result::Result<Self, Self::Error> {
        let component_type = ComponentType::from_str(&cdx.component_type)?;
        let mut component = Component::new(component_type, cdx.name).with_attributes(cdx.extra);
        if let Some(bom_ref) = cdx.bom_ref {
            component = component.with_bom_ref(bom_ref);
        }
        if let Some(group) = cdx.group {
            component = component.with_group(group);
        }
        if let Some(version) = cdx.version {
            component = component.with_version(version);
        }
        if let Some(description) = cdx.description {
            component = component.with_description(description);
        }
        if let Some(purl) = cdx.purl {
            component = component.with_purl(purl);
        }
        if let Some(children) = cdx.components {
            let children = children
                .into_iter()
                .map(Component::try_from)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            component = component.with_components(children);
        }
        Ok(component)
    }
}

impl From<&Component> for CdxComponent {
    fn from(component: &Component) -> Self {
        Self {
            component_type: component.component_type().as_str().to_string(),
            bom_ref: component.bom_ref().map(String::from),
            group: component.group().map(String::from),
            name: component.name().to_string(),
            version: component.version().map(String::from),
            description: component.description().map(String::from),
            purl: component.purl().map(String::from),
            components: component
                .components_option()
                .map(|children| children.iter().map(CdxComponent::from).collect()),
            extra: component.attributes().clone(),
        }
    }
}

impl From<CdxService> for Service {
    fn from(cdx: CdxService) -> Self {
        let mut service = Service::new(cdx.name).with_attributes(cdx.extra);
        if let Some(bom_ref) = cdx.bom_ref {
            service = service.with_bom_ref(bom_ref);
        }
        if let Some(group) = cdx.group {
            service = service.with_group(group);
        }
        if let Some(version) = cdx.version {
            service = service.with_version(version);
        }
        if let Some(children) = cdx.services {
            service = service.with_services(children.into_iter().map(Service::from).collect());
        }
        service
    }
}

impl From<&Service> for CdxService {
    fn from(service: &Service) -> Self {
        Self {
            bom_ref: service.bom_ref().map(String::from),
            group: service.group().map(String::from),
            name: service.name().to_string(),
            version: service.version().map(String::from),
            services: service
                .services_option()
                .map(|children| children.iter().map(CdxService::from).collect()),
            extra: service.attributes().clone(),
        }
    }
}

impl CdxTools {
    fn into_tools(self) -> Vec<Tool> {
        match self {
            CdxTools::Legacy(tools) => tools
                .into_iter()
                .map(|t| Tool::new(t.vendor, t.name, t.version))
                .collect(),
            CdxTools::Structured(object) => object
                .components
                .into_iter()
                .chain(object.services)
                .map(|t| Tool::new(t.group, t.name, t.version))
                .collect(),
        }
    }
}

/// CycloneDxJsonCodec adapter for reading and writing CycloneDX JSON
///
/// Decodes input documents for the filesystem reader and implements the
/// BomSerializer port for the merged output.
pub struct CycloneDxJsonCodec;

impl CycloneDxJsonCodec {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a CycloneDX JSON document
    ///
    /// Blank content and a bare `null` are empty inputs and decode to `None`.
    ///
    /// # Errors
    /// Returns an error if the content is not JSON, declares a `bomFormat`
    /// other than `CycloneDX`, or has a component with an unknown `type`.
    pub fn parse(&self, content: &str) -> Result<Option<Bom>> {
        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }

        let cdx: CdxBom = serde_json::from_str(trimmed)
            .map_err(|e| anyhow::anyhow!("Invalid CycloneDX JSON: {}", e))?;

        if let Some(format) = cdx.bom_format.as_deref() {
            if format != "CycloneDX" {
                anyhow::bail!("Unsupported bomFormat '{}', expected 'CycloneDX'", format);
            }
        }

        Self::to_domain(cdx).map(Some)
    }

    fn to_domain(cdx: CdxBom) -> Result<Bom> {
        let spec_version = match cdx.spec_version.as_deref() {
            Some(declared) => SpecVersion::from_str(declared).unwrap_or_else(|_| {
                warn!(declared, "Unsupported input specVersion, reading as the default");
                SpecVersion::default()
            }),
            None => SpecVersion::default(),
        };

        let mut bom = Bom::new(spec_version).with_version(cdx.version);
        if let Some(serial_number) = cdx.serial_number {
            bom = bom.with_serial_number(serial_number);
        }
        if let Some(metadata) = cdx.metadata {
            bom = bom.with_metadata(Self::metadata_to_domain(metadata)?);
        }
        if let Some(components) = cdx.components {
            let components = components
                .into_iter()
                .map(Component::try_from)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| anyhow::anyhow!("Invalid component: {}", e))?;
            bom = bom.with_components(components);
        }
        if let Some(services) = cdx.services {
            bom = bom.with_services(services.into_iter().map(Service::from).collect());
        }
        if let Some(dependencies) = cdx.dependencies {
            let dependencies = dependencies
                .into_iter()
                .map(|d| match d.depends_on {
                    Some(targets) => Dependency::new(d.bom_ref, targets),
                    None => Dependency::leaf(d.bom_ref),
                })
                .collect();
            bom = bom.with_dependencies(dependencies);
        }
        Ok(bom)
    }

    fn metadata_to_domain(cdx: CdxMetadata) -> Result<Metadata> {
        let mut metadata = Metadata::new();
        if let Some(raw) = cdx.timestamp {
            match DateTime::parse_from_rfc3339(&raw) {
                Ok(timestamp) => metadata = metadata.with_timestamp(timestamp.with_timezone(&Utc)),
                Err(e) => warn!(timestamp = %raw, error = %e, "Ignoring unparseable metadata timestamp"),
            }
        }
        if let Some(tools) = cdx.tools {
            metadata = metadata.with_tools(tools.into_tools());
        }
        if let Some(component) = cdx.component {
            let subject = Component::try_from(component)
                .map_err(|e| anyhow::anyhow!("Invalid metadata component: {}", e))?;
            metadata = metadata.with_component(subject);
        }
        Ok(metadata)
    }

    fn from_domain(bom: &Bom) -> CdxBom {
        let spec_version = bom.spec_version();
        CdxBom {
            schema: Some(format!(
                "http://cyclonedx.org/schema/bom-{}.schema.json",
                spec_version
            )),
            bom_format: Some("CycloneDX".to_string()),
            spec_version: Some(spec_version.as_str().to_string()),
            serial_number: bom.serial_number().map(String::from),
            version: bom.version(),
            metadata: bom.metadata().map(|metadata| CdxMetadata {
                timestamp: metadata
                    .timestamp()
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
                tools: metadata.tools_option().map(|tools| {
                    CdxTools::Legacy(
                        tools
                            .iter()
                            .map(|t| CdxTool {
                                vendor: t.vendor().map(String::from),
                                name: t.name().to_string(),
                                version: t.version().map(String::from),
                            })
                            .collect(),
                    )
                }),
                component: metadata.component().map(CdxComponent::from),
            }),
            components: bom
                .components_option()
                .map(|components| components.iter().map(CdxComponent::from).collect()),
            services: bom
                .services_option()
                .map(|services| services.iter().map(CdxService::from).collect()),
            dependencies: bom.dependencies_option().map(|dependencies| {
                dependencies
                    .iter()
                    .map(|d| CdxDependency {
                        bom_ref: d.bom_ref().to_string(),
                        depends_on: d.depends_on_option().cloned(),
                    })
                    .collect()
            }),
        }
    }
}

impl Default for CycloneDxJsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl BomSerializer for CycloneDxJsonCodec {
    fn serialize(&self, bom: &Bom) -> Result<String> {
        serde_json::to_string_pretty(&Self::from_domain(bom)).map_err(|e| {
            MergeError::Serialization {
                details: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"{
        "bomFormat": "CycloneDX",
        "specVersion": "1.5",
        "serialNumber": "urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79",
        "version": 3,
        "metadata": {
            "timestamp": "2024-05-01T12:00:00Z",
            "tools": { "components": [ { "group": "acme", "name": "scanner", "version": "2.0" } ] },
            "component": { "type": "application", "bom-ref": "app", "name": "app", "version": "1.0" }
        },
        "components": [
            {
                "type": "library",
                "bom-ref": "pkg:cargo/serde@1.0.0",
                "name": "serde",
                "version": "1.0.0",
                "purl": "pkg:cargo/serde@1.0.0",
                "licenses": [ { "license": { "id": "MIT" } } ],
                "components": [ { "type": "library", "name": "serde_derive" } ]
            }
        ],
        "dependencies": [
            { "ref": "app", "dependsOn": [ "pkg:cargo/serde@1.0.0" ] },
            { "ref": "pkg:cargo/serde@1.0.0" }
        ]
    }"#;

    #[test]
    fn test_parse_reads_core_fields() {
        let bom = CycloneDxJsonCodec::new().parse(SAMPLE).unwrap().unwrap();

        assert_eq!(bom.spec_version(), SpecVersion::V1_5);
        assert_eq!(bom.version(), 3);
        assert_eq!(bom.subject().unwrap().bom_ref(), Some("app"));
        assert_eq!(
            bom.metadata().unwrap().timestamp(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(bom.tools()[0].vendor(), Some("acme"));
        assert_eq!(bom.component_count(), 2);
        assert_eq!(bom.dependencies()[0].depends_on().len(), 1);
        assert!(bom.dependencies()[1].depends_on_option().is_none());
    }

    #[test]
    fn test_parse_keeps_unmodelled_fields() {
        let bom = CycloneDxJsonCodec::new().parse(SAMPLE).unwrap().unwrap();
        let serde = &bom.components()[0];
        assert!(serde.attributes().contains_key("licenses"));

        let output = CycloneDxJsonCodec::new().serialize(&bom).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value["components"][0]["licenses"][0]["license"]["id"],
            "MIT"
        );
    }

    #[test]
    fn test_parse_empty_content_is_none() {
        let codec = CycloneDxJsonCodec::new();
        assert!(codec.parse("").unwrap().is_none());
        assert!(codec.parse("  \n").unwrap().is_none());
        assert!(codec.parse("null").unwrap().is_none());
    }

    #[test]
    fn test_parse_rejects_invalid_documents() {
        let codec = CycloneDxJsonCodec::new();
        assert!(codec.parse("{ not json").is_err());
        assert!(codec.parse(r#"{"bomFormat": "SPDX"}"#).is_err());

        let err = codec
            .parse(r#"{"components": [ { "type": "gadget", "name": "x" } ]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid component"));
    }

    #[test]
    fn test_parse_legacy_tools_array() {
        let bom = CycloneDxJsonCodec::new()
            .parse(r#"{"metadata": {"tools": [ {"vendor": "v", "name": "t", "version": "1"} ]}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            bom.tools(),
            [Tool::new(Some("v".into()), "t", Some("1".into()))]
        );
    }

    #[test]
    fn test_serialize_writes_cyclonedx_envelope() {
        let bom = Bom::new(SpecVersion::V1_4)
            .with_serial_number("urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79")
            .with_metadata(
                Metadata::new()
                    .with_timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
                    .with_tools(vec![Tool::this_tool()]),
            )
            .with_components(vec![Component::new(ComponentType::Library, "a").with_bom_ref("a")])
            .with_dependencies(vec![Dependency::leaf("a")]);

        let output = CycloneDxJsonCodec::new().serialize(&bom).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["bomFormat"], "CycloneDX");
        assert_eq!(value["specVersion"], "1.4");
        assert_eq!(value["$schema"], "http://cyclonedx.org/schema/bom-1.4.schema.json");
        assert_eq!(value["version"], 1);
        assert_eq!(value["metadata"]["timestamp"], "2024-05-01T12:00:00Z");
        assert!(value["metadata"]["tools"].is_array());
        assert_eq!(value["components"][0]["bom-ref"], "a");
        assert!(value["dependencies"][0].get("dependsOn").is_none());
    }

    #[test]
    fn test_serialize_omits_absent_collections() {
        let output = CycloneDxJsonCodec::new()
            .serialize(&Bom::default())
            .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert!(value.get("components").is_none());
        assert!(value.get("dependencies").is_none());
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_services_round_trip() {
        let content = r#"{
            "bomFormat": "CycloneDX",
            "specVersion": "1.5",
            "components": [ { "type": "application", "bom-ref": "app", "name": "app" } ],
            "services": [
                {
                    "bom-ref": "svc-api",
                    "name": "api",
                    "endpoints": [ "https://api.example.com/v1" ],
                    "services": [ { "bom-ref": "svc-auth", "name": "auth" } ]
                }
            ],
            "dependencies": [ { "ref": "app", "dependsOn": [ "svc-api" ] } ]
        }"#;

        let codec = CycloneDxJsonCodec::new();
        let bom = codec.parse(content).unwrap().unwrap();
        assert_eq!(bom.services()[0].bom_ref(), Some("svc-api"));
        assert_eq!(bom.all_bom_refs(), vec!["app", "svc-api", "svc-auth"]);

        let value: Value = serde_json::from_str(&codec.serialize(&bom).unwrap()).unwrap();
        assert_eq!(value["services"][0]["bom-ref"], "svc-api");
        assert_eq!(value["services"][0]["endpoints"][0], "https://api.example.com/v1");
        assert_eq!(value["services"][0]["services"][0]["name"], "auth");
    }
}
