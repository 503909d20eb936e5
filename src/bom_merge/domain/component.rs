use super::ComponentType;
use serde_json::{Map, Value};

/// Descriptive identity of a component: `(type, group, name, version)`
///
/// This is the field set that makes two components "the same software"
/// regardless of how the generating tool labelled them with a bom-ref.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DescriptiveKey {
    pub component_type: ComponentType,
    pub group: Option<String>,
    pub name: String,
    pub version: Option<String>,
}

/// Component entity representing one inventoried software unit
///
/// Fields the merge engine does not reason about (licenses, hashes,
/// properties, ...) travel untouched in `attributes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    component_type: ComponentType,
    bom_ref: Option<String>,
    group: Option<String>,
    name: String,
    version: Option<String>,
    description: Option<String>,
    purl: Option<String>,
    components: Option<Vec<Component>>,
    attributes: Map<String, Value>,
}

impl Component {
    pub fn new(component_type: ComponentType, name: impl Into<String>) -> Self {
        Self {
            component_type,
            bom_ref: None,
            group: None,
            name: name.into(),
            version: None,
            description: None,
            purl: None,
            components: None,
            attributes: Map::new(),
        }
    }

    pub fn with_bom_ref(mut self, bom_ref: impl Into<String>) -> Self {
        self.bom_ref = Some(bom_ref.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(purl.into());
        self
    }

    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = Some(components);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn bom_ref(&self) -> Option<&str> {
        self.bom_ref.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn purl(&self) -> Option<&str> {
        self.purl.as_deref()
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Nested child components (empty slice when absent)
    pub fn components(&self) -> &[Component] {
        self.components.as_deref().unwrap_or_default()
    }

    /// Raw nested collection, distinguishing "absent" from "empty"
    pub fn components_option(&self) -> Option<&Vec<Component>> {
        self.components.as_ref()
    }

    pub fn components_mut(&mut self) -> &mut Option<Vec<Component>> {
        &mut self.components
    }

    /// Detaches and returns the nested components
    pub fn take_components(&mut self) -> Vec<Component> {
        self.components.take().unwrap_or_default()
    }

    pub fn set_bom_ref(&mut self, bom_ref: Option<String>) {
        self.bom_ref = bom_ref;
    }

    pub fn descriptive_key(&self) -> DescriptiveKey {
        DescriptiveKey {
            component_type: self.component_type,
            group: self.group.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }

    /// Number of components in this subtree, including `self`
    pub fn subtree_size(&self) -> usize {
        1 + self
            .components()
            .iter()
            .map(Component::subtree_size)
            .sum::<usize>()
    }

    /// Depth-first pre-order walk over `self` and all nested components
    pub fn descendants(&self) -> Vec<&Component> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Component>) {
        out.push(self);
        for child in self.components() {
            child.collect_descendants(out);
        }
    }

    /// Applies `f` to every bom-ref in this subtree
    pub fn rewrite_bom_refs(&mut self, f: &mut impl FnMut(&str) -> String) {
        if let Some(rewritten) = self.bom_ref.as_deref().map(|r| f(r)) {
            self.bom_ref = Some(rewritten);
        }
        if let Some(children) = self.components.as_mut() {
            for child in children {
                child.rewrite_bom_refs(f);
            }
        }
    }

    /// Human-readable label used in diagnostics: `group/name@version`
    pub fn display_name(&self) -> String {
        let mut label = String::new();
        if let Some(group) = &self.group {
            label.push_str(group);
            label.push('/');
        }
        label.push_str(&self.name);
        if let Some(version) = &self.version {
            label.push('@');
            label.push_str(version);
        }
        label
    }
}
