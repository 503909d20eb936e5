use crate::bom_merge::domain::{MergeMode, SpecVersion, SubjectDescriptor, ValidationMode};
use crate::bom_merge::policies::IdentityPolicy;
use crate::shared::error::MergeError;
use crate::shared::Result;
use std::path::PathBuf;

/// MergeRequest - Internal request DTO for the BOM merge use case
///
/// Built through [`MergeRequestBuilder`], which rejects contradictory
/// parameters before any file is touched.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Input documents, in merge order
    pub input_files: Vec<PathBuf>,
    pub mode: MergeMode,
    /// Caller-supplied subject; required (name and version) in hierarchical mode
    pub subject: Option<SubjectDescriptor>,
    pub validation_mode: ValidationMode,
    pub identity_policy: IdentityPolicy,
    /// Spec version stamped on the merged document
    pub output_spec_version: SpecVersion,
}

impl MergeRequest {
    pub fn builder() -> MergeRequestBuilder {
        MergeRequestBuilder::default()
    }
}

/// Builder for [`MergeRequest`]
#[derive(Debug, Default)]
#[must_use]
pub struct MergeRequestBuilder {
    input_files: Vec<PathBuf>,
    mode: MergeMode,
    subject: Option<SubjectDescriptor>,
    validation_mode: ValidationMode,
    identity_policy: IdentityPolicy,
    output_spec_version: SpecVersion,
}

impl MergeRequestBuilder {
    pub fn input_files(mut self, input_files: Vec<PathBuf>) -> Self {
        self.input_files = input_files;
        self
    }

    pub fn input_file(mut self, input_file: impl Into<PathBuf>) -> Self {
        self.input_files.push(input_file.into());
        self
    }

    pub fn mode(mut self, mode: MergeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the subject; a descriptor with nothing specified is dropped
    pub fn subject(mut self, subject: SubjectDescriptor) -> Self {
        self.subject = subject.is_specified().then_some(subject);
        self
    }

    pub fn validation_mode(mut self, validation_mode: ValidationMode) -> Self {
        self.validation_mode = validation_mode;
        self
    }

    pub fn identity_policy(mut self, identity_policy: IdentityPolicy) -> Self {
        self.identity_policy = identity_policy;
        self
    }

    pub fn output_spec_version(mut self, output_spec_version: SpecVersion) -> Self {
        self.output_spec_version = output_spec_version;
        self
    }

    /// Validates and builds the request
    ///
    /// # Errors
    /// Returns `MergeError::ParameterValidation` if:
    /// - No input files were given
    /// - Hierarchical mode lacks a subject name or version
    pub fn build(self) -> Result<MergeRequest> {
        if self.input_files.is_empty() {
            return Err(MergeError::parameter(
                "No input files given. Use --input-files, --input-files-list or --input-files-nul-list",
            )
            .into());
        }

        if self.mode == MergeMode::Hierarchical {
            self.subject
                .clone()
                .unwrap_or_default()
                .require_name_and_version()?;
        }

        Ok(MergeRequest {
            input_files: self.input_files,
            mode: self.mode,
            subject: self.subject,
            validation_mode: self.validation_mode,
            identity_policy: self.identity_policy,
            output_spec_version: self.output_spec_version,
        })
    }
}
