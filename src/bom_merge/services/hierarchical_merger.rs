use crate::bom_merge::domain::{
    Bom, Component, ComponentType, Dependency, DependencyGraph, Metadata, MergeOutcome,
    MergeStatistics, Service, SubjectDescriptor, Tool,
};
use crate::shared::Result;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// HierarchicalMerger domain service
///
/// Turns every input document into its own sub-tree under one subject. Each
/// document is represented by a boundary component (its own subject, or a
/// synthesized `bom-<n>` application) whose nested components are the
/// document's components. Every bom-ref inside a document is namespaced with
/// `<boundary-ref>:` so that sub-trees never collide, and no deduplication
/// happens across documents. Services cannot nest under a component, so each
/// document's namespaced services are listed at the top level.
pub struct HierarchicalMerger;

impl HierarchicalMerger {
    /// Merges `inputs` under `subject`; `None` entries are skipped
    ///
    /// # Errors
    /// Returns `MergeError::ParameterValidation` when `subject` lacks a name
    /// or a version.
    pub fn merge(inputs: &[Option<Bom>], subject: &SubjectDescriptor) -> Result<MergeOutcome> {
        subject.require_name_and_version()?;

        let subject_ref = subject.bom_ref();
        let mut statistics = MergeStatistics::default();
        let mut used_namespaces: HashSet<String> = HashSet::from([subject_ref.clone()]);
        let mut boundaries = Vec::new();
        let mut services = Vec::new();
        let mut tools: Vec<Tool> = Vec::new();
        let mut graph = DependencyGraph::new();
        graph.add(&Dependency::new(subject_ref.clone(), Vec::new()));

        for (position, input) in inputs.iter().enumerate() {
            let Some(bom) = input else {
                debug!(position, "Skipping empty input document");
                statistics.documents_skipped += 1;
                continue;
            };
            statistics.documents_loaded += 1;
            statistics.components_loaded += bom.component_count();

            for tool in bom.tools() {
                if !tools.contains(tool) {
                    tools.push(tool.clone());
                }
            }

            let (boundary, document_services, document_graph) =
                Self::build_subtree(bom, statistics.documents_loaded, &mut used_namespaces);
            services.extend(document_services);
            let boundary_ref = boundary.bom_ref().unwrap_or_default().to_string();

            for dependency in document_graph.into_dependencies() {
                graph.add(&dependency);
            }
            graph.add_edge(&subject_ref, &boundary_ref);
            boundaries.push(boundary);
        }

        statistics.components_merged = boundaries.iter().map(Component::subtree_size).sum();
        debug!(
            boundaries = boundaries.len(),
            components = statistics.components_merged,
            "Hierarchical merge complete"
        );

        let mut metadata = Metadata::new().with_component(subject.to_component());
        if !tools.is_empty() {
            metadata = metadata.with_tools(tools);
        }
        let mut bom = Bom::default()
            .with_metadata(metadata)
            .with_components(boundaries)
            .with_dependencies(graph.into_dependencies());
        if !services.is_empty() {
            bom = bom.with_services(services);
        }

        Ok(MergeOutcome {
            bom,
            input_subjects: Vec::new(),
            aliases: HashMap::new(),
            statistics,
        })
    }

    /// Builds the namespaced boundary node, services and dependency graph for one document
    fn build_subtree(
        bom: &Bom,
        ordinal: usize,
        used_namespaces: &mut HashSet<String>,
    ) -> (Component, Vec<Service>, DependencyGraph) {
        let mut boundary = bom
            .subject()
            .cloned()
            .unwrap_or_else(|| Self::synthesize_boundary(bom, ordinal));
        let original_ref = boundary.bom_ref().map(String::from);
        let base_ref = original_ref
            .clone()
            .unwrap_or_else(|| Self::fallback_ref(&boundary));
        let namespace = Self::claim_namespace(base_ref, used_namespaces);

        let prefix = format!("{}:", namespace);
        let rewrite = |bom_ref: &str| -> String {
            if original_ref.as_deref() == Some(bom_ref) {
                namespace.clone()
            } else {
                format!("{}{}", prefix, bom_ref)
            }
        };

        boundary.rewrite_bom_refs(&mut |r: &str| rewrite(r));
        boundary.set_bom_ref(Some(namespace.clone()));

        let mut nested = boundary.take_components();
        for component in bom.components() {
            let mut component = component.clone();
            component.rewrite_bom_refs(&mut |r: &str| rewrite(r));
            if component.bom_ref() == Some(namespace.as_str()) {
                // the document lists its own subject as a component
                nested.extend(component.take_components());
                continue;
            }
            nested.push(component);
        }

        let services: Vec<Service> = bom
            .services()
            .iter()
            .map(|service| {
                let mut service = service.clone();
                service.rewrite_bom_refs(&mut |r: &str| rewrite(r));
                service
            })
            .collect();

        let mut graph = DependencyGraph::from_dependencies(bom.dependencies()).remap(&rewrite);
        if !graph.contains(&namespace) {
            let roots = Self::root_refs(&nested, &graph);
            graph.add(&Dependency::new(namespace.clone(), roots));
        }

        if !nested.is_empty() {
            *boundary.components_mut() = Some(nested);
        }
        (boundary, services, graph)
    }

    /// Components of a document that nothing else in it depends on
    fn root_refs(components: &[Component], graph: &DependencyGraph) -> Vec<String> {
        let referenced = graph.referenced_targets();
        components
            .iter()
            .filter_map(Component::bom_ref)
            .filter(|r| !referenced.contains(r))
            .map(String::from)
            .collect()
    }

    fn synthesize_boundary(bom: &Bom, ordinal: usize) -> Component {
        let name = format!("bom-{}", ordinal);
        let bom_ref = bom
            .serial_number()
            .map(String::from)
            .unwrap_or_else(|| name.clone());
        Component::new(ComponentType::Application, name)
            .with_version(bom.version().to_string())
            .with_bom_ref(bom_ref)
    }

    fn fallback_ref(component: &Component) -> String {
        let descriptor = SubjectDescriptor::new(
            component.group().map(String::from),
            Some(component.name().to_string()),
            component.version().map(String::from),
        );
        descriptor.bom_ref()
    }

    /// Reserves `base`, or `base#<n>` when it is already taken
    fn claim_namespace(base: String, used: &mut HashSet<String>) -> String {
        if used.insert(base.clone()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}#{}", base, n);
            if used.insert(candidate.clone()) {
                debug!(base, namespace = candidate, "Boundary ref collision, renamed");
                return candidate;
            }
            n += 1;
        }
    }
}
