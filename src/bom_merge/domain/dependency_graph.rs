use std::collections::{HashMap, HashSet};

/// One CycloneDX dependency entry: `ref` and its `dependsOn` targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    bom_ref: String,
    depends_on: Option<Vec<String>>,
}

impl Dependency {
    pub fn new(bom_ref: impl Into<String>, depends_on: Vec<String>) -> Self {
        Self {
            bom_ref: bom_ref.into(),
            depends_on: Some(depends_on),
        }
    }

    /// A dependency entry declaring no `dependsOn` list at all
    pub fn leaf(bom_ref: impl Into<String>) -> Self {
        Self {
            bom_ref: bom_ref.into(),
            depends_on: None,
        }
    }

    pub fn bom_ref(&self) -> &str {
        &self.bom_ref
    }

    pub fn depends_on(&self) -> &[String] {
        self.depends_on.as_deref().unwrap_or_default()
    }

    pub fn depends_on_option(&self) -> Option<&Vec<String>> {
        self.depends_on.as_ref()
    }

    pub fn depends_on_mut(&mut self) -> &mut Option<Vec<String>> {
        &mut self.depends_on
    }
}

/// DependencyGraph aggregate: ordered union of dependency edges keyed by bom-ref
///
/// Entries keep first-seen order, and so do the targets inside each entry.
/// Adding an entry for a ref that is already present unions the target
/// sets instead of overwriting them.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
    declared: HashSet<String>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dependencies(dependencies: &[Dependency]) -> Self {
        let mut graph = Self::new();
        for dependency in dependencies {
            graph.add(dependency);
        }
        graph
    }

    /// Unions a dependency entry into the graph
    pub fn add(&mut self, dependency: &Dependency) {
        let slot = self.slot(dependency.bom_ref());
        if dependency.depends_on_option().is_some() {
            self.declared.insert(dependency.bom_ref().to_string());
        }
        for target in dependency.depends_on() {
            Self::push_unique(&mut self.entries[slot].1, target);
        }
    }

    /// Adds a single `from -> to` edge, creating the entry if needed
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let slot = self.slot(from);
        self.declared.insert(from.to_string());
        Self::push_unique(&mut self.entries[slot].1, to);
    }

    pub fn contains(&self, bom_ref: &str) -> bool {
        self.index.contains_key(bom_ref)
    }

    pub fn targets(&self, bom_ref: &str) -> &[String] {
        self.index
            .get(bom_ref)
            .map(|&i| self.entries[i].1.as_slice())
            .unwrap_or_default()
    }

    pub fn refs(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(r, _)| r.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|(_, targets)| targets.len()).sum()
    }

    /// Every ref that appears as the target of some edge
    pub fn referenced_targets(&self) -> HashSet<&str> {
        self.entries
            .iter()
            .flat_map(|(_, targets)| targets.iter().map(String::as_str))
            .collect()
    }

    /// Rewrites every ref (entry keys and targets) through `resolve`.
    ///
    /// Entries that collapse onto the same ref are unioned. Self-loops
    /// produced by the rewrite are dropped.
    pub fn remap(&self, resolve: impl Fn(&str) -> String) -> DependencyGraph {
        let mut remapped = DependencyGraph::new();
        for (from, targets) in &self.entries {
            let new_from = resolve(from);
            let slot = remapped.slot(&new_from);
            if self.declared.contains(from) {
                remapped.declared.insert(new_from.clone());
            }
            for target in targets {
                let new_target = resolve(target);
                if new_target != new_from {
                    Self::push_unique(&mut remapped.entries[slot].1, &new_target);
                }
            }
        }
        remapped
    }

    /// Converts back to CycloneDX dependency entries.
    ///
    /// An entry that never declared a `dependsOn` list stays a leaf.
    pub fn into_dependencies(self) -> Vec<Dependency> {
        let declared = self.declared;
        self.entries
            .into_iter()
            .map(|(bom_ref, targets)| {
                if targets.is_empty() && !declared.contains(&bom_ref) {
                    Dependency::leaf(bom_ref)
                } else {
                    Dependency::new(bom_ref, targets)
                }
            })
            .collect()
    }

    fn slot(&mut self, bom_ref: &str) -> usize {
        if let Some(&i) = self.index.get(bom_ref) {
            return i;
        }
        self.entries.push((bom_ref.to_string(), Vec::new()));
        let i = self.entries.len() - 1;
        self.index.insert(bom_ref.to_string(), i);
        i
    }

    fn push_unique(targets: &mut Vec<String>, target: &str) {
        if !targets.iter().any(|t| t == target) {
            targets.push(target.to_string());
        }
    }
}
