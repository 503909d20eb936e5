use super::component_set::{resolve_alias, ComponentSet};
use super::service_set::ServiceSet;
use crate::bom_merge::domain::{
    Bom, DependencyGraph, Metadata, MergeOutcome, MergeStatistics, Tool,
};
use crate::bom_merge::policies::IdentityPolicy;
use tracing::debug;

/// FlatMerger domain service
///
/// Unions the components of every input document into a single flat list,
/// deduplicated under an [`IdentityPolicy`]. Nested components are pulled up
/// to the top level depth-first, and dependency edges are unioned after
/// rewriting every dropped duplicate's bom-ref to the kept one.
///
/// Services are unioned the same way. A component or service that is kept
/// while its bom-ref is already taken gets a `#<n>` suffix, and only the
/// dependency entries of its own document follow the rename.
///
/// Input subjects are not placed in the component list. They are returned
/// in [`MergeOutcome::input_subjects`] for the metadata reconciler to decide.
pub struct FlatMerger;

impl FlatMerger {
    /// Merges `inputs` in order; `None` entries are skipped
    pub fn merge(inputs: &[Option<Bom>], policy: IdentityPolicy) -> MergeOutcome {
        let mut statistics = MergeStatistics::default();
        let mut set = ComponentSet::new(policy);
        let mut service_set = ServiceSet::new(policy);
        let mut graph = DependencyGraph::new();
        let mut tools: Vec<Tool> = Vec::new();
        let mut input_subjects = Vec::new();

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
            if let Some(subject) = bom.subject() {
                input_subjects.push(subject.clone());
            }
            let mut renames =
                set.absorb_document(bom.components(), &|r| service_set.contains_ref(r));
            renames.extend(
                service_set.absorb_document(bom.services(), &|r| set.contains_ref(r)),
            );
            let document_graph = DependencyGraph::from_dependencies(bom.dependencies())
                .remap(|bom_ref| {
                    renames
                        .get(bom_ref)
                        .cloned()
                        .unwrap_or_else(|| bom_ref.to_string())
                });
            for dependency in document_graph.into_dependencies() {
                graph.add(&dependency);
            }
        }

        let (components, mut aliases) = set.into_parts();
        let (services, service_aliases) = service_set.into_parts();
        for (dropped, kept) in service_aliases {
            aliases.entry(dropped).or_insert(kept);
        }
        let graph = graph.remap(|bom_ref| resolve_alias(&aliases, bom_ref));
        statistics.aliases_collapsed = aliases.len();
        statistics.components_merged = components.len();

        debug!(
            components = components.len(),
            services = services.len(),
            dependencies = graph.len(),
            aliases = aliases.len(),
            "Flat merge complete"
        );

        let mut metadata = Metadata::new();
        if !tools.is_empty() {
            metadata = metadata.with_tools(tools);
        }
        let mut bom = Bom::default()
            .with_metadata(metadata)
            .with_components(components)
            .with_dependencies(graph.into_dependencies());
        if !services.is_empty() {
            bom = bom.with_services(services);
        }

        MergeOutcome {
            bom,
            input_subjects,
            aliases,
            statistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_merge::domain::{Component, ComponentType, Dependency, Service};
    use std::collections::HashSet;

    fn lib(name: &str, version: &str, bom_ref: &str) -> Component {
        Component::new(ComponentType::Library, name)
            .with_version(version)
            .with_bom_ref(bom_ref)
    }

    fn names(bom: &Bom) -> Vec<String> {
        bom.components().iter().map(Component::display_name).collect()
    }

    #[test]
    fn test_merge_skips_missing_documents() {
        let a = Bom::default().with_components(vec![lib("c1", "1", "c1")]);
        let b = Bom::default().with_components(vec![
            lib("c2", "1", "c2"),
            lib("c3", "1", "c3"),
        ]);

        let outcome = FlatMerger::merge(&[Some(a), None, Some(b)], IdentityPolicy::Descriptive);

        assert_eq!(names(&outcome.bom), vec!["c1@1", "c2@1", "c3@1"]);
        assert_eq!(outcome.statistics.documents_loaded, 2);
        assert_eq!(outcome.statistics.documents_skipped, 1);
        assert_eq!(outcome.statistics.components_merged, 3);
    }

    #[test]
    fn test_merge_of_nothing_is_empty() {
        let outcome = FlatMerger::merge(&[None, None], IdentityPolicy::Descriptive);
        assert!(outcome.bom.components().is_empty());
        assert!(outcome.bom.dependencies().is_empty());
        assert!(outcome.input_subjects.is_empty());
    }

    #[test]
    fn test_merge_deduplicates_and_rewrites_dependency_refs() {
        let a = Bom::default()
            .with_components(vec![lib("app-lib", "1", "a-lib"), lib("log", "0.4", "a-log")])
            .with_dependencies(vec![Dependency::new("a-lib", vec!["a-log".to_string()])]);
        let b = Bom::default()
            .with_components(vec![lib("log", "0.4", "b-log"), lib("serde", "1", "b-serde")])
            .with_dependencies(vec![Dependency::new("b-log", vec!["b-serde".to_string()])]);

        let outcome = FlatMerger::merge(&[Some(a), Some(b)], IdentityPolicy::Descriptive);
        let graph = DependencyGraph::from_dependencies(outcome.bom.dependencies());

        assert_eq!(names(&outcome.bom), vec!["app-lib@1", "log@0.4", "serde@1"]);
        assert_eq!(outcome.aliases.get("b-log").map(String::as_str), Some("a-log"));
        assert_eq!(graph.targets("a-lib"), ["a-log".to_string()]);
        assert_eq!(graph.targets("a-log"), ["b-serde".to_string()]);
        assert!(!graph.contains("b-log"));
        assert_eq!(outcome.statistics.aliases_collapsed, 1);
    }

    #[test]
    fn test_merge_unions_conflicting_dependency_entries() {
        let a = Bom::default()
            .with_components(vec![lib("x", "1", "x"), lib("y", "1", "y"), lib("z", "1", "z")])
            .with_dependencies(vec![Dependency::new("x", vec!["y".to_string()])]);
        let b = Bom::default()
            .with_components(vec![lib("x", "1", "x"), lib("z", "1", "z")])
            .with_dependencies(vec![Dependency::new("x", vec!["z".to_string()])]);

        let outcome = FlatMerger::merge(&[Some(a), Some(b)], IdentityPolicy::Descriptive);
        let graph = DependencyGraph::from_dependencies(outcome.bom.dependencies());

        assert_eq!(graph.targets("x"), ["y".to_string(), "z".to_string()]);
        assert_eq!(outcome.bom.dependencies().len(), 1);
    }

    #[test]
    fn test_merge_flattens_nested_components() {
        let a = Bom::default().with_components(vec![lib("outer", "1", "outer")
            .with_components(vec![lib("inner", "1", "inner")])]);
        let b = Bom::default().with_components(vec![lib("inner", "1", "inner")]);

        let outcome = FlatMerger::merge(&[Some(a), Some(b)], IdentityPolicy::Descriptive);

        assert_eq!(names(&outcome.bom), vec!["outer@1", "inner@1"]);
        assert!(outcome
            .bom
            .components()
            .iter()
            .all(|c| c.components_option().is_none()));
        assert_eq!(outcome.statistics.components_loaded, 3);
    }

    #[test]
    fn test_merge_collects_subjects_and_tools() {
        let tool = Tool::new(Some("acme".into()), "scanner", Some("2.0".into()));
        let a = Bom::default().with_metadata(
            Metadata::new()
                .with_component(Component::new(ComponentType::Application, "first"))
                .with_tools(vec![tool.clone()]),
        );
        let b = Bom::default().with_metadata(
            Metadata::new()
                .with_component(Component::new(ComponentType::Application, "second"))
                .with_tools(vec![tool.clone()]),
        );

        let outcome = FlatMerger::merge(&[Some(a), Some(b)], IdentityPolicy::Descriptive);

        let subjects: Vec<&str> = outcome.input_subjects.iter().map(Component::name).collect();
        assert_eq!(subjects, vec!["first", "second"]);
        assert_eq!(outcome.bom.tools(), [tool]);
        assert!(outcome.bom.components().is_empty());
    }

    #[test]
    fn test_self_merge_is_idempotent() {
        let doc = Bom::default()
            .with_components(vec![lib("a", "1", "a"), lib("b", "2", "b")])
            .with_dependencies(vec![Dependency::new("a", vec!["b".to_string()])]);

        let once = FlatMerger::merge(&[Some(doc.clone())], IdentityPolicy::Descriptive);
        let twice = FlatMerger::merge(&[Some(doc.clone()), Some(doc)], IdentityPolicy::Descriptive);

        assert_eq!(once.bom.components(), twice.bom.components());
        assert_eq!(once.bom.dependencies(), twice.bom.dependencies());
    }

    #[test]
    fn test_merge_is_associative() {
        let a = Bom::default()
            .with_components(vec![lib("a", "1", "a"), lib("shared", "1", "s-a")])
            .with_dependencies(vec![Dependency::new("a", vec!["s-a".to_string()])]);
        let b = Bom::default()
            .with_components(vec![lib("shared", "1", "s-b"), lib("b", "1", "b")])
            .with_dependencies(vec![Dependency::new("b", vec!["s-b".to_string()])]);
        let c = Bom::default()
            .with_components(vec![lib("c", "1", "c"), lib("b", "1", "b")])
            .with_dependencies(vec![Dependency::new("c", vec!["b".to_string()])]);
        let policy = IdentityPolicy::Descriptive;

        let all_at_once = FlatMerger::merge(&[Some(a.clone()), Some(b.clone()), Some(c.clone())], policy);
        let ab = FlatMerger::merge(&[Some(a), Some(b)], policy).bom;
        let stepwise = FlatMerger::merge(&[Some(ab), Some(c)], policy);

        assert_eq!(names(&all_at_once.bom), names(&stepwise.bom));
        assert_eq!(all_at_once.bom.dependencies(), stepwise.bom.dependencies());
    }

    #[test]
    fn test_exact_policy_keeps_same_tuple_with_different_refs() {
        let a = Bom::default().with_components(vec![lib("log", "0.4", "r1")]);
        let b = Bom::default().with_components(vec![lib("log", "0.4", "r2")]);

        let outcome = FlatMerger::merge(&[Some(a), Some(b)], IdentityPolicy::Exact);

        assert_eq!(outcome.bom.components().len(), 2);
        assert!(outcome.aliases.is_empty());
    }

    #[test]
    fn test_service_refs_survive_merge() {
        let doc = Bom::default()
            .with_components(vec![lib("app", "1", "app"), lib("lib", "1", "lib")])
            .with_services(vec![Service::new("api").with_bom_ref("svc-api")])
            .with_dependencies(vec![Dependency::new(
                "app",
                vec!["lib".to_string(), "svc-api".to_string()],
            )]);

        let outcome = FlatMerger::merge(&[Some(doc)], IdentityPolicy::Descriptive);
        let bom = &outcome.bom;
        let known: HashSet<&str> = bom.all_bom_refs().into_iter().collect();

        assert_eq!(bom.services().len(), 1);
        for dependency in bom.dependencies() {
            assert!(known.contains(dependency.bom_ref()));
            for target in dependency.depends_on() {
                assert!(known.contains(target.as_str()), "dangling target {}", target);
            }
        }
    }

    #[test]
    fn test_duplicate_services_are_unioned_with_aliases() {
        let a = Bom::default()
            .with_components(vec![lib("web", "1", "web")])
            .with_services(vec![Service::new("api").with_version("2").with_bom_ref("a-api")])
            .with_dependencies(vec![Dependency::new("web", vec!["a-api".to_string()])]);
        let b = Bom::default()
            .with_components(vec![lib("cli", "1", "cli")])
            .with_services(vec![Service::new("api").with_version("2").with_bom_ref("b-api")])
            .with_dependencies(vec![Dependency::new("cli", vec!["b-api".to_string()])]);

        let outcome = FlatMerger::merge(&[Some(a), Some(b)], IdentityPolicy::Descriptive);
        let graph = DependencyGraph::from_dependencies(outcome.bom.dependencies());

        assert_eq!(outcome.bom.services().len(), 1);
        assert_eq!(graph.targets("cli"), ["a-api".to_string()]);
    }

    #[test]
    fn test_exact_policy_renames_clashing_bom_ref_per_document() {
        let a = Bom::default()
            .with_components(vec![lib("x", "1", "1"), lib("p", "1", "p")])
            .with_dependencies(vec![Dependency::new("p", vec!["1".to_string()])]);
        let b = Bom::default()
            .with_components(vec![lib("y", "1", "1"), lib("q", "1", "q")])
            .with_dependencies(vec![Dependency::new("q", vec!["1".to_string()])]);

        let outcome = FlatMerger::merge(&[Some(a), Some(b)], IdentityPolicy::Exact);
        let bom = &outcome.bom;
        let graph = DependencyGraph::from_dependencies(bom.dependencies());

        let refs: Vec<&str> = bom.all_bom_refs();
        assert_eq!(refs, vec!["1", "p", "1#2", "q"]);
        assert_eq!(graph.targets("p"), ["1".to_string()]);
        assert_eq!(graph.targets("q"), ["1#2".to_string()]);
    }

    #[test]
    fn test_bom_ref_policy_keeps_component_with_new_ref_after_adoption() {
        let docs = [
            Some(Bom::default().with_components(vec![
                Component::new(ComponentType::Library, "log").with_version("0.4"),
            ])),
            Some(Bom::default().with_components(vec![lib("log", "0.4", "r1")])),
            Some(Bom::default().with_components(vec![lib("log", "0.4", "r2")])),
        ];

        let outcome = FlatMerger::merge(&docs, IdentityPolicy::BomRef);

        let refs: Vec<Option<&str>> = outcome.bom.components().iter().map(Component::bom_ref).collect();
        assert_eq!(refs, vec![Some("r1"), Some("r2")]);
        assert!(outcome.aliases.is_empty());
    }
}
