use super::component_set::unique_ref;
use crate::bom_merge::domain::Service;
use crate::bom_merge::policies::IdentityPolicy;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Ordered, deduplicated service list
///
/// Services are few per document, so duplicates are found with a linear
/// scan under [`IdentityPolicy::is_duplicate_service`]. A bom-ref that was
/// collapsed onto another service stays reserved.
pub(crate) struct ServiceSet {
    policy: IdentityPolicy,
    services: Vec<Service>,
    refs: HashSet<String>,
    aliases: HashMap<String, String>,
}

impl ServiceSet {
    pub(crate) fn new(policy: IdentityPolicy) -> Self {
        Self {
            policy,
            services: Vec::new(),
            refs: HashSet::new(),
            aliases: HashMap::new(),
        }
    }

    /// Absorbs the services of one document, nested ones flattened
    ///
    /// Returns the renames the document's own dependency entries must go
    /// through, as [`ComponentSet::absorb_document`](super::component_set::ComponentSet::absorb_document) does.
    pub(crate) fn absorb_document(
        &mut self,
        services: &[Service],
        reserved: &dyn Fn(&str) -> bool,
    ) -> HashMap<String, String> {
        let mut document_refs = HashSet::new();
        let mut renames = HashMap::new();
        for service in services.iter().flat_map(flatten) {
            let original = service.bom_ref().map(String::from);
            if let Some((from, to)) = self.absorb(service, reserved) {
                if !document_refs.contains(&from) {
                    renames.entry(from).or_insert(to);
                }
            }
            if let Some(original) = original {
                document_refs.insert(original);
            }
        }
        renames
    }

    /// Adds `service` unless a duplicate is present; returns a rename if one happened
    fn absorb(
        &mut self,
        mut service: Service,
        reserved: &dyn Fn(&str) -> bool,
    ) -> Option<(String, String)> {
        let policy = self.policy;
        if let Some(kept) = self
            .services
            .iter_mut()
            .find(|kept| policy.is_duplicate_service(&service, kept))
        {
            let dropped = service.bom_ref().map(String::from);
            match (dropped, kept.bom_ref().map(String::from)) {
                (Some(dropped), Some(canonical)) if dropped != canonical => {
                    debug!(%dropped, %canonical, "Collapsing duplicate service onto canonical bom-ref");
                    self.aliases.entry(dropped.clone()).or_insert(canonical);
                    self.refs.insert(dropped);
                }
                (Some(dropped), None) => {
                    kept.set_bom_ref(Some(dropped.clone()));
                    self.refs.insert(dropped);
                }
                _ => {}
            }
            return None;
        }

        let mut rename = None;
        if let Some(taken) = service
            .bom_ref()
            .filter(|&r| self.refs.contains(r) || reserved(r))
            .map(String::from)
        {
            let renamed = unique_ref(&taken, |r| self.refs.contains(r) || reserved(r));
            warn!(
                service = %service.name(),
                bom_ref = %taken,
                renamed = %renamed,
                "bom-ref already used by a different service, renamed"
            );
            service.set_bom_ref(Some(renamed.clone()));
            rename = Some((taken, renamed));
        }
        if let Some(bom_ref) = service.bom_ref() {
            self.refs.insert(bom_ref.to_string());
        }
        self.services.push(service);
        rename
    }

    pub(crate) fn contains_ref(&self, bom_ref: &str) -> bool {
        self.refs.contains(bom_ref)
    }

    pub(crate) fn into_parts(self) -> (Vec<Service>, HashMap<String, String>) {
        (self.services, self.aliases)
    }
}

/// Splits a service tree into a depth-first list of services without children
pub(crate) fn flatten(service: &Service) -> Vec<Service> {
    let mut out = Vec::with_capacity(service.subtree_size());
    flatten_into(service.clone(), &mut out);
    out
}

fn flatten_into(mut service: Service, out: &mut Vec<Service>) {
    let children = service.take_services();
    out.push(service);
    for child in children {
        flatten_into(child, out);
    }
}
