use super::{Component, Dependency, Service, SpecVersion};
use chrono::{DateTime, Utc};

/// Tool recorded in `metadata.tools`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    vendor: Option<String>,
    name: String,
    version: Option<String>,
}

impl Tool {
    pub fn new(vendor: Option<String>, name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            vendor,
            name: name.into(),
            version,
        }
    }

    /// The tool entry this crate stamps on every merged document
    pub fn this_tool() -> Self {
        Self::new(
            None,
            env!("CARGO_PKG_NAME"),
            Some(env!("CARGO_PKG_VERSION").to_string()),
        )
    }

    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// BOM metadata: timestamp, tools and the subject component
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    timestamp: Option<DateTime<Utc>>,
    tools: Option<Vec<Tool>>,
    component: Option<Component>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.component = Some(component);
        self
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn tools(&self) -> &[Tool] {
        self.tools.as_deref().unwrap_or_default()
    }

    pub fn tools_option(&self) -> Option<&Vec<Tool>> {
        self.tools.as_ref()
    }

    pub fn component(&self) -> Option<&Component> {
        self.component.as_ref()
    }

    pub fn set_timestamp(&mut self, timestamp: Option<DateTime<Utc>>) {
        self.timestamp = timestamp;
    }

    pub fn set_component(&mut self, component: Option<Component>) {
        self.component = component;
    }

    pub fn component_mut(&mut self) -> Option<&mut Component> {
        self.component.as_mut()
    }

    pub fn tools_mut(&mut self) -> &mut Option<Vec<Tool>> {
        &mut self.tools
    }

    /// Adds a tool unless an identical entry is already listed
    pub fn add_tool(&mut self, tool: Tool) {
        let tools = self.tools.get_or_insert_with(Vec::new);
        if !tools.contains(&tool) {
            tools.push(tool);
        }
    }
}

/// Bom aggregate: one CycloneDX document held in memory
///
/// Collections that CycloneDX treats as optional are `Option<Vec<_>>` so that
/// "absent" and "present but empty" survive a round trip through the engine
/// until the normalizer decides what to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct Bom {
    spec_version: SpecVersion,
    serial_number: Option<String>,
    version: u32,
    metadata: Option<Metadata>,
    components: Option<Vec<Component>>,
    services: Option<Vec<Service>>,
    dependencies: Option<Vec<Dependency>>,
}

impl Default for Bom {
    fn default() -> Self {
        Self::new(SpecVersion::default())
    }
}

impl Bom {
    pub fn new(spec_version: SpecVersion) -> Self {
        Self {
            spec_version,
            serial_number: None,
            version: 1,
            metadata: None,
            components: None,
            services: None,
            dependencies: None,
        }
    }

    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = Some(components);
        self
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = Some(services);
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    pub fn spec_version(&self) -> SpecVersion {
        self.spec_version
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// The component this document is about (`metadata.component`)
    pub fn subject(&self) -> Option<&Component> {
        self.metadata.as_ref().and_then(Metadata::component)
    }

    pub fn tools(&self) -> &[Tool] {
        self.metadata.as_ref().map(Metadata::tools).unwrap_or_default()
    }

    pub fn components(&self) -> &[Component] {
        self.components.as_deref().unwrap_or_default()
    }

    pub fn components_option(&self) -> Option<&Vec<Component>> {
        self.components.as_ref()
    }

    pub fn services(&self) -> &[Service] {
        self.services.as_deref().unwrap_or_default()
    }

    pub fn services_option(&self) -> Option<&Vec<Service>> {
        self.services.as_ref()
    }

    pub fn dependencies(&self) -> &[Dependency] {
        self.dependencies.as_deref().unwrap_or_default()
    }

    pub fn dependencies_option(&self) -> Option<&Vec<Dependency>> {
        self.dependencies.as_ref()
    }

    /// Number of components, nested ones included (the subject is not counted)
    pub fn component_count(&self) -> usize {
        self.components().iter().map(Component::subtree_size).sum()
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies().len()
    }

    /// Every bom-ref declared in the document: subject, components, services
    /// and their nested entries
    pub fn all_bom_refs(&self) -> Vec<&str> {
        let component_refs = self
            .subject()
            .into_iter()
            .chain(self.components())
            .flat_map(Component::descendants)
            .filter_map(Component::bom_ref);
        let service_refs = self
            .services()
            .iter()
            .flat_map(Service::descendants)
            .filter_map(Service::bom_ref);
        component_refs.chain(service_refs).collect()
    }

    pub fn set_spec_version(&mut self, spec_version: SpecVersion) {
        self.spec_version = spec_version;
    }

    pub fn set_serial_number(&mut self, serial_number: Option<String>) {
        self.serial_number = serial_number;
    }

    pub fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    pub fn metadata_mut(&mut self) -> &mut Option<Metadata> {
        &mut self.metadata
    }

    pub fn components_mut(&mut self) -> &mut Option<Vec<Component>> {
        &mut self.components
    }

    pub fn services_mut(&mut self) -> &mut Option<Vec<Service>> {
        &mut self.services
    }

    pub fn dependencies_mut(&mut self) -> &mut Option<Vec<Dependency>> {
        &mut self.dependencies
    }
}
