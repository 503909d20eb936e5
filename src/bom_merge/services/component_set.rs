use crate::bom_merge::domain::Component;
use crate::bom_merge::policies::{IdentityIndex, IdentityPolicy};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// What [`ComponentSet::absorb`] did with a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Absorbed {
    Added,
    /// Kept, but its bom-ref was taken by a different component
    Renamed { from: String, to: String },
    Merged,
}

/// Ordered, deduplicated component list with the bom-ref aliases produced
/// by dropping duplicates
pub(crate) struct ComponentSet {
    components: Vec<Component>,
    index: IdentityIndex,
    aliases: HashMap<String, String>,
}

impl ComponentSet {
    pub(crate) fn new(policy: IdentityPolicy) -> Self {
        Self {
            components: Vec::new(),
            index: IdentityIndex::new(policy),
            aliases: HashMap::new(),
        }
    }

    /// Adds `component` unless an equal one is already present.
    ///
    /// When the component is dropped, its bom-ref is made to resolve to the
    /// kept component: either as an alias, or adopted by a kept component
    /// that had no bom-ref of its own. A component that is kept while its
    /// bom-ref is already in use (here or in `reserved`) gets `<ref>#<n>`.
    pub(crate) fn absorb(
        &mut self,
        mut component: Component,
        reserved: &dyn Fn(&str) -> bool,
    ) -> Absorbed {
        let Some(position) = self.index.find(&component) else {
            let mut outcome = Absorbed::Added;
            if let Some(taken) = component
                .bom_ref()
                .filter(|&r| self.index.contains_ref(r) || reserved(r))
                .map(String::from)
            {
                let renamed = unique_ref(&taken, |r| self.index.contains_ref(r) || reserved(r));
                warn!(
                    component = %component.display_name(),
                    bom_ref = %taken,
                    renamed = %renamed,
                    "bom-ref already used by a different component, renamed"
                );
                component.set_bom_ref(Some(renamed.clone()));
                outcome = Absorbed::Renamed {
                    from: taken,
                    to: renamed,
                };
            }
            self.index.insert(&component, self.components.len());
            self.components.push(component);
            return outcome;
        };

        let canonical = &mut self.components[position];
        let dropped = component.bom_ref().map(String::from);
        match (dropped, canonical.bom_ref().map(String::from)) {
            (Some(dropped), Some(kept)) if dropped != kept => {
                debug!(%dropped, %kept, "Collapsing duplicate component onto canonical bom-ref");
                self.index.alias(&dropped, position);
                self.aliases.entry(dropped).or_insert(kept);
            }
            (Some(dropped), None) => {
                canonical.set_bom_ref(Some(dropped.clone()));
                self.index
                    .adopt(&dropped, &canonical.descriptive_key(), position);
            }
            _ => {}
        }
        Absorbed::Merged
    }

    /// Absorbs every component of one document, nested ones flattened
    ///
    /// Returns the renames the document's own dependency entries must go
    /// through. A ref clashing with another component of the same document
    /// is renamed without being mapped.
    pub(crate) fn absorb_document(
        &mut self,
        components: &[Component],
        reserved: &dyn Fn(&str) -> bool,
    ) -> HashMap<String, String> {
        let mut document_refs = HashSet::new();
        let mut renames = HashMap::new();
        for flat in components.iter().flat_map(flatten) {
            let original = flat.bom_ref().map(String::from);
            match self.absorb(flat, reserved) {
                Absorbed::Renamed { from, to } if !document_refs.contains(&from) => {
                    renames.entry(from).or_insert(to);
                }
                _ => {}
            }
            if let Some(original) = original {
                document_refs.insert(original);
            }
        }
        renames
    }

    pub(crate) fn contains_ref(&self, bom_ref: &str) -> bool {
        self.index.contains_ref(bom_ref)
    }

    pub(crate) fn record_alias(&mut self, dropped: &str, kept: &str) {
        if dropped != kept {
            self.aliases
                .entry(dropped.to_string())
                .or_insert_with(|| kept.to_string());
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Component>, HashMap<String, String>) {
        (self.components, self.aliases)
    }
}

/// `base#2`, `base#3`, ... whichever is first free
pub(crate) fn unique_ref(base: &str, taken: impl Fn(&str) -> bool) -> String {
    (2..)
        .map(|n| format!("{}#{}", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Splits a component tree into a depth-first list of childless components
pub(crate) fn flatten(component: &Component) -> Vec<Component> {
    let mut out = Vec::with_capacity(component.subtree_size());
    flatten_into(component.clone(), &mut out);
    out
}

fn flatten_into(mut component: Component, out: &mut Vec<Component>) {
    let children = component.take_components();
    out.push(component);
    for child in children {
        flatten_into(child, out);
    }
}

/// Follows the alias chain for `bom_ref` to its canonical ref
pub(crate) fn resolve_alias(aliases: &HashMap<String, String>, bom_ref: &str) -> String {
    let mut current = bom_ref;
    for _ in 0..=aliases.len() {
        match aliases.get(current) {
            Some(next) if next != current => current = next,
            _ => break,
        }
    }
    current.to_string()
}
