use serde_json::{Map, Value};

/// Descriptive identity of a service: `(group, name, version)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    pub group: Option<String>,
    pub name: String,
    pub version: Option<String>,
}

/// Service entity: an external or internal service the software relies on
///
/// Services own bom-refs just like components, so dependency entries may
/// point at them. Fields the merge engine does not reason about travel in
/// `attributes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    bom_ref: Option<String>,
    group: Option<String>,
    name: String,
    version: Option<String>,
    services: Option<Vec<Service>>,
    attributes: Map<String, Value>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            bom_ref: None,
            group: None,
            name: name.into(),
            version: None,
            services: None,
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

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = Some(services);
        self
    }

    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
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

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Nested services (empty slice when absent)
    pub fn services(&self) -> &[Service] {
        self.services.as_deref().unwrap_or_default()
    }

    pub fn services_option(&self) -> Option<&Vec<Service>> {
        self.services.as_ref()
    }

    pub fn services_mut(&mut self) -> &mut Option<Vec<Service>> {
        &mut self.services
    }

    pub fn take_services(&mut self) -> Vec<Service> {
        self.services.take().unwrap_or_default()
    }

    pub fn set_bom_ref(&mut self, bom_ref: Option<String>) {
        self.bom_ref = bom_ref;
    }

    pub fn key(&self) -> ServiceKey {
        ServiceKey {
            group: self.group.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }

    pub fn subtree_size(&self) -> usize {
        1 + self
            .services()
            .iter()
            .map(Service::subtree_size)
            .sum::<usize>()
    }

    /// Depth-first pre-order walk over `self` and all nested services
    pub fn descendants(&self) -> Vec<&Service> {
        let mut out = vec![self];
        for child in self.services() {
            out.extend(child.descendants());
        }
        out
    }

    pub fn rewrite_bom_refs(&mut self, f: &mut impl FnMut(&str) -> String) {
        if let Some(rewritten) = self.bom_ref.as_deref().map(|r| f(r)) {
            self.bom_ref = Some(rewritten);
        }
        if let Some(children) = self.services.as_mut() {
            for child in children {
                child.rewrite_bom_refs(f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> Service {
        Service::new("gateway").with_bom_ref("gw").with_services(vec![
            Service::new("auth").with_bom_ref("auth"),
            Service::new("billing").with_bom_ref("billing"),
        ])
    }

    #[test]
    fn test_descendants_and_subtree_size() {
        let service = gateway();
        let names: Vec<&str> = service.descendants().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["gateway", "auth", "billing"]);
        assert_eq!(service.subtree_size(), 3);
    }

    #[test]
    fn test_key_ignores_bom_ref() {
        let a = Service::new("api").with_version("2").with_bom_ref("a");
        let b = Service::new("api").with_version("2").with_bom_ref("b");
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), Service::new("api").key());
    }

    #[test]
    fn test_rewrite_bom_refs_recurses() {
        let mut service = gateway();
        service.rewrite_bom_refs(&mut |r| format!("ns:{}", r));
        let refs: Vec<&str> = service
            .descendants()
            .iter()
            .filter_map(|s| s.bom_ref())
            .collect();
        assert_eq!(refs, vec!["ns:gw", "ns:auth", "ns:billing"]);
    }
}
