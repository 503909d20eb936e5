//! cdx-merge - merge CycloneDX SBOMs into a single document
//!
//! This library merges any number of CycloneDX BOMs either flat (one
//! deduplicated component list) or hierarchically (each input nested under
//! its own boundary component), following hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`bom_merge`): Document model, merge services and policies
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use cdx_merge::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! // Create use case with injected adapters
//! let use_case = MergeBomsUseCase::new(
//!     FileSystemReader::new(),
//!     CycloneDxJsonCodec::new(),
//!     CycloneDxSchemaValidator::new(),
//!     FileSystemWriter::new(PathBuf::from("merged.json")),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let request = MergeRequest::builder()
//!     .input_files(vec![PathBuf::from("app.json"), PathBuf::from("lib.json")])
//!     .validation_mode(ValidationMode::Strict)
//!     .build()?;
//! let response = use_case.execute(request).await?;
//!
//! println!("{} components merged", response.statistics.components_merged);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod bom_merge;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::codec::CycloneDxJsonCodec;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::validation::CycloneDxSchemaValidator;
    pub use crate::application::dto::{MergeRequest, MergeResponse};
    pub use crate::application::use_cases::MergeBomsUseCase;
    pub use crate::bom_merge::domain::{
        Bom, Component, ComponentType, Dependency, MergeMode, MergeStatistics, Metadata, Service,
        SpecVersion, SubjectDescriptor, ValidationMode, ValidationReport,
    };
    pub use crate::bom_merge::policies::IdentityPolicy;
    pub use crate::bom_merge::services::{
        BomNormalizer, FlatMerger, HierarchicalMerger, MetadataReconciler,
    };
    pub use crate::ports::inbound::BomMergePort;
    pub use crate::ports::outbound::{
        BomReader, BomSerializer, InputListReader, OutputPresenter, ProgressReporter,
        SchemaValidator,
    };
    pub use crate::shared::error::{ExitCode, MergeError, MergeErrorKind};
    pub use crate::shared::Result;
}
