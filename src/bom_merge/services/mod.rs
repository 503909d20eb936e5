mod bom_normalizer;
mod component_set;
mod flat_merger;
mod hierarchical_merger;
mod metadata_reconciler;
mod service_set;

pub use bom_normalizer::BomNormalizer;
pub use flat_merger::FlatMerger;
pub use hierarchical_merger::HierarchicalMerger;
pub use metadata_reconciler::MetadataReconciler;
