pub mod bom;
pub mod component;
pub mod dependency_graph;
pub mod merge_outcome;
pub mod service;
pub mod spec_version;
pub mod subject;
pub mod validation;

pub use bom::{Bom, Metadata, Tool};
pub use component::{Component, DescriptiveKey};
pub use dependency_graph::{Dependency, DependencyGraph};
pub use merge_outcome::{MergeMode, MergeOutcome, MergeStatistics};
pub use service::{Service, ServiceKey};
pub use spec_version::{ComponentType, SpecVersion};
pub use subject::SubjectDescriptor;
pub use validation::{ValidationMode, ValidationReport};
