use crate::bom_merge::domain::{Component, DescriptiveKey, Service};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// IdentityPolicy - which fields decide that two components are the same
///
/// | Policy        | Duplicate when                                                       |
/// |---------------|----------------------------------------------------------------------|
/// | `Descriptive` | bom-refs are equal, or `(type, group, name, version)` is equal        |
/// | `BomRef`      | bom-refs are equal; components lacking a bom-ref use the tuple above |
/// | `Exact`       | the tuple and the bom-ref are both equal                             |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityPolicy {
    #[default]
    Descriptive,
    BomRef,
    Exact,
}

impl IdentityPolicy {
    /// Equality predicate used for deduplication
    pub fn is_duplicate(self, a: &Component, b: &Component) -> bool {
        self.matches(
            a.bom_ref(),
            b.bom_ref(),
            a.descriptive_key() == b.descriptive_key(),
        )
    }

    /// Same predicate for services, keyed by `(group, name, version)`
    pub fn is_duplicate_service(self, a: &Service, b: &Service) -> bool {
        self.matches(a.bom_ref(), b.bom_ref(), a.key() == b.key())
    }

    fn matches(self, a: Option<&str>, b: Option<&str>, same_key: bool) -> bool {
        match self {
            IdentityPolicy::Descriptive => {
                matches!((a, b), (Some(x), Some(y)) if x == y) || same_key
            }
            IdentityPolicy::BomRef => match (a, b) {
                (Some(x), Some(y)) => x == y,
                _ => same_key,
            },
            IdentityPolicy::Exact => a == b && same_key,
        }
    }
}

impl FromStr for IdentityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "descriptive" => Ok(IdentityPolicy::Descriptive),
            "bom-ref" | "bomref" => Ok(IdentityPolicy::BomRef),
            "exact" => Ok(IdentityPolicy::Exact),
            _ => Err(format!(
                "Invalid identity policy: {}. Please specify 'descriptive', 'bom-ref' or 'exact'",
                s
            )),
        }
    }
}

impl fmt::Display for IdentityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityPolicy::Descriptive => write!(f, "descriptive"),
            IdentityPolicy::BomRef => write!(f, "bom-ref"),
            IdentityPolicy::Exact => write!(f, "exact"),
        }
    }
}

/// Hash index answering "is there already a component equal to this one?"
/// under a given [`IdentityPolicy`], in O(1) per lookup.
///
/// Positions refer to whatever list the caller keeps alongside the index.
#[derive(Debug)]
pub struct IdentityIndex {
    policy: IdentityPolicy,
    by_ref: HashMap<String, usize>,
    by_key: HashMap<DescriptiveKey, usize>,
    by_key_without_ref: HashMap<DescriptiveKey, usize>,
    by_exact: HashMap<(DescriptiveKey, Option<String>), usize>,
}

impl IdentityIndex {
    pub fn new(policy: IdentityPolicy) -> Self {
        Self {
            policy,
            by_ref: HashMap::new(),
            by_key: HashMap::new(),
            by_key_without_ref: HashMap::new(),
            by_exact: HashMap::new(),
        }
    }

    pub fn policy(&self) -> IdentityPolicy {
        self.policy
    }

    /// Position of the first indexed component equal to `component`
    pub fn find(&self, component: &Component) -> Option<usize> {
        let key = component.descriptive_key();
        match self.policy {
            IdentityPolicy::Descriptive => component
                .bom_ref()
                .and_then(|r| self.by_ref.get(r))
                .or_else(|| self.by_key.get(&key))
                .copied(),
            IdentityPolicy::BomRef => match component.bom_ref() {
                Some(r) => self
                    .by_ref
                    .get(r)
                    .or_else(|| self.by_key_without_ref.get(&key))
                    .copied(),
                None => self.by_key.get(&key).copied(),
            },
            IdentityPolicy::Exact => self
                .by_exact
                .get(&(key, component.bom_ref().map(String::from)))
                .copied(),
        }
    }

    /// Records `component` at `position`; earlier entries win on conflict
    pub fn insert(&mut self, component: &Component, position: usize) {
        let key = component.descriptive_key();
        if let Some(r) = component.bom_ref() {
            self.by_ref.entry(r.to_string()).or_insert(position);
        } else {
            self.by_key_without_ref
                .entry(key.clone())
                .or_insert(position);
        }
        self.by_exact
            .entry((key.clone(), component.bom_ref().map(String::from)))
            .or_insert(position);
        self.by_key.entry(key).or_insert(position);
    }

    /// Makes `bom_ref` resolve to the component at `position`
    ///
    /// Used when a duplicate is dropped (its bom-ref becomes an alias) or
    /// when a kept component adopts a bom-ref it did not have.
    pub fn alias(&mut self, bom_ref: &str, position: usize) {
        self.by_ref.entry(bom_ref.to_string()).or_insert(position);
    }

    /// Records that the ref-less component at `position` now carries `bom_ref`
    ///
    /// The component stops answering ref-less lookups, so a later component
    /// with the same tuple and a different bom-ref is no longer matched to it.
    pub fn adopt(&mut self, bom_ref: &str, key: &DescriptiveKey, position: usize) {
        self.alias(bom_ref, position);
        if self.by_key_without_ref.get(key) == Some(&position) {
            self.by_key_without_ref.remove(key);
        }
        let without_ref = (key.clone(), None);
        if self.by_exact.get(&without_ref) == Some(&position) {
            self.by_exact.remove(&without_ref);
        }
        self.by_exact
            .entry((key.clone(), Some(bom_ref.to_string())))
            .or_insert(position);
    }

    /// Whether `bom_ref` already resolves to an indexed component
    pub fn contains_ref(&self, bom_ref: &str) -> bool {
        self.by_ref.contains_key(bom_ref)
    }
}
