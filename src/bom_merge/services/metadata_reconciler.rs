use super::component_set::{flatten, resolve_alias, ComponentSet};
use crate::bom_merge::domain::{
    Bom, Component, DependencyGraph, Metadata, MergeMode, MergeOutcome, Service,
    SubjectDescriptor, Tool,
};
use crate::bom_merge::policies::IdentityPolicy;
use std::collections::HashSet;
use tracing::debug;

/// MetadataReconciler domain service
///
/// Settles the single subject of a merged document:
/// - an explicit [`SubjectDescriptor`] always wins;
/// - otherwise (flat mode only) the first input subject is adopted and
///   the remaining input subjects are merged in as ordinary components;
/// - any component that is the same as the subject is collapsed into it,
///   with dependency refs rewritten to the subject's bom-ref.
///
/// Also records this tool in `metadata.tools`.
pub struct MetadataReconciler;

impl MetadataReconciler {
    pub fn reconcile(
        outcome: MergeOutcome,
        mode: MergeMode,
        explicit: Option<&SubjectDescriptor>,
        policy: IdentityPolicy,
    ) -> Bom {
        let MergeOutcome {
            mut bom,
            input_subjects,
            ..
        } = outcome;
        let explicit = explicit.filter(|descriptor| descriptor.is_specified());

        match mode {
            MergeMode::Hierarchical => {
                if let Some(descriptor) = explicit {
                    bom.metadata_mut()
                        .get_or_insert_with(Metadata::new)
                        .set_component(Some(descriptor.to_component()));
                }
            }
            MergeMode::Flat => Self::reconcile_flat(&mut bom, input_subjects, explicit, policy),
        }

        bom.metadata_mut()
            .get_or_insert_with(Metadata::new)
            .add_tool(Tool::this_tool());
        bom
    }

    fn reconcile_flat(
        bom: &mut Bom,
        input_subjects: Vec<Component>,
        explicit: Option<&SubjectDescriptor>,
        policy: IdentityPolicy,
    ) {
        let mut candidates = input_subjects.into_iter();
        let mut subject = match explicit {
            Some(descriptor) => Some(descriptor.to_component()),
            None => candidates.next(),
        };
        let demoted: Vec<Component> = candidates.collect();
        let subject_children = subject
            .as_mut()
            .map(Component::take_components)
            .unwrap_or_default();

        if let Some(subject) = &subject {
            debug!(
                subject = %subject.display_name(),
                demoted = demoted.len(),
                "Reconciling flat merge subject"
            );
        }

        let components = bom.components_mut().take().unwrap_or_default();
        let service_refs: HashSet<String> = bom
            .services()
            .iter()
            .flat_map(Service::descendants)
            .filter_map(Service::bom_ref)
            .map(String::from)
            .collect();
        let reserved = |r: &str| service_refs.contains(r);
        let mut set = ComponentSet::new(policy);
        let incoming = components
            .into_iter()
            .chain(subject_children.iter().flat_map(flatten))
            .chain(demoted.iter().flat_map(flatten));

        for component in incoming {
            let collides = subject
                .as_ref()
                .is_some_and(|subject| Self::collides(&component, subject, policy));
            match subject.as_mut() {
                Some(subject) if collides => {
                    Self::collapse_into_subject(subject, &component, &mut set);
                }
                _ => {
                    set.absorb(component, &reserved);
                }
            }
        }

        let (components, aliases) = set.into_parts();
        let graph = DependencyGraph::from_dependencies(bom.dependencies())
            .remap(|bom_ref| resolve_alias(&aliases, bom_ref));

        *bom.components_mut() = Some(components);
        *bom.dependencies_mut() = Some(graph.into_dependencies());
        bom.metadata_mut()
            .get_or_insert_with(Metadata::new)
            .set_component(subject);
    }

    /// A shared bom-ref always collides, whatever the policy
    fn collides(component: &Component, subject: &Component, policy: IdentityPolicy) -> bool {
        let same_ref = matches!(
            (component.bom_ref(), subject.bom_ref()),
            (Some(a), Some(b)) if a == b
        );
        same_ref || policy.is_duplicate(component, subject)
    }

    fn collapse_into_subject(subject: &mut Component, component: &Component, set: &mut ComponentSet) {
        debug!(
            component = %component.display_name(),
            "Collapsing component into merged subject"
        );
        match (component.bom_ref(), subject.bom_ref()) {
            (Some(dropped), Some(kept)) => set.record_alias(dropped, kept),
            (Some(dropped), None) => subject.set_bom_ref(Some(dropped.to_string())),
            _ => {}
        }
    }
}
