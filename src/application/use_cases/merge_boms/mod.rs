use crate::application::dto::{MergeRequest, MergeResponse};
use crate::bom_merge::domain::{
    Bom, MergeMode, MergeOutcome, MergeStatistics, SpecVersion, ValidationMode, ValidationReport,
};
use crate::bom_merge::policies::ValidationGate;
use crate::bom_merge::services::{
    BomNormalizer, FlatMerger, HierarchicalMerger, MetadataReconciler,
};
use crate::ports::inbound::BomMergePort;
use crate::ports::outbound::{
    BomReader, BomSerializer, OutputPresenter, ProgressReporter, SchemaValidator,
};
use crate::shared::error::MergeError;
use crate::shared::Result;
use async_trait::async_trait;
use futures::future::try_join_all;
use std::cell::Cell;
use std::path::PathBuf;
use tracing::debug;

/// MergeBomsUseCase - Core use case for merging BOM documents
///
/// This use case orchestrates the merge workflow using generic dependency
/// injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `R` - BomReader implementation
/// * `S` - BomSerializer implementation
/// * `V` - SchemaValidator implementation
/// * `O` - OutputPresenter implementation
/// * `P` - ProgressReporter implementation
pub struct MergeBomsUseCase<R, S, V, O, P> {
    bom_reader: R,
    serializer: S,
    schema_validator: V,
    output_presenter: O,
    progress_reporter: P,
}

impl<R, S, V, O, P> MergeBomsUseCase<R, S, V, O, P>
where
    R: BomReader,
    S: BomSerializer,
    V: SchemaValidator,
    O: OutputPresenter,
    P: ProgressReporter,
{
    /// Creates a new MergeBomsUseCase with injected dependencies
    pub fn new(
        bom_reader: R,
        serializer: S,
        schema_validator: V,
        output_presenter: O,
        progress_reporter: P,
    ) -> Self {
        Self {
            bom_reader,
            serializer,
            schema_validator,
            output_presenter,
            progress_reporter,
        }
    }

    /// Executes the merge use case
    ///
    /// # Arguments
    /// * `request` - Validated merge request
    ///
    /// # Returns
    /// MergeResponse with the merged document, its serialized content,
    /// statistics and the validation report
    ///
    /// # Errors
    /// Fails without producing output when a document cannot be loaded or
    /// the merge parameters are invalid. With `ValidationMode::Relaxed`, an
    /// invalid document is presented before `SchemaValidationFailed` is returned.
    pub async fn execute(&self, request: MergeRequest) -> Result<MergeResponse> {
        // Step 1: Load every input document before merging anything
        let documents = self.load_documents(&request.input_files).await?;

        // Step 2: Merge
        let outcome = self.merge_documents(&request, &documents)?;
        let mut statistics = outcome.statistics;

        // Step 3: Settle the subject
        let bom = MetadataReconciler::reconcile(
            outcome,
            request.mode,
            request.subject.as_ref(),
            request.identity_policy,
        );

        // Step 4: Normalize
        let bom = Self::normalize(bom, request.output_spec_version);
        statistics.components_merged = bom.component_count();

        // Step 5: Serialize
        let content = self.serializer.serialize(&bom)?;

        // Step 6: Validate and decide what happens to the output
        let validation =
            self.validate_if_requested(request.validation_mode, &content, bom.spec_version())?;
        let decision = ValidationGate::decide(request.validation_mode, validation.as_ref());
        debug!(?decision, mode = %request.validation_mode, "Validation gate decision");

        // Step 7: Present
        if decision.emit {
            self.output_presenter.present(&content)?;
        }
        if decision.fail {
            return Err(MergeError::SchemaValidationFailed {
                messages: validation.map(ValidationReport::into_messages).unwrap_or_default(),
                output_emitted: decision.emit,
            }
            .into());
        }

        self.report_summary(&statistics);
        Ok(MergeResponse::new(bom, content, statistics, validation))
    }

    /// Loads all documents concurrently, in input order
    ///
    /// Every read is issued at once; the first failure aborts the merge.
    /// Each finished read advances the progress reporter.
    async fn load_documents(&self, paths: &[PathBuf]) -> Result<Vec<Option<Bom>>> {
        let total = paths.len();
        self.progress_reporter
            .report(&format!("📖 Loading {} input BOM(s)...", total));

        let completed = Cell::new(0usize);
        let reads = paths.iter().map(|path| {
            let completed = &completed;
            async move {
                let document = self.bom_reader.read_bom(path).await;
                completed.set(completed.get() + 1);
                let label = path.display().to_string();
                self.progress_reporter
                    .report_progress(completed.get(), total, Some(&label));
                document
            }
        });
        let documents = try_join_all(reads).await?;

        self.report_loaded(paths, &documents);
        Ok(documents)
    }

    fn report_loaded(&self, paths: &[PathBuf], documents: &[Option<Bom>]) {
        for (path, document) in paths.iter().zip(documents) {
            if document.is_none() {
                self.progress_reporter.report_warning(&format!(
                    "⚠️  Warning: {} is empty and was skipped",
                    path.display()
                ));
            }
        }

        let loaded: Vec<&Bom> = documents.iter().flatten().collect();
        let components: usize = loaded.iter().map(|bom| bom.component_count()).sum();
        self.progress_reporter.report(&format!(
            "✅ Loaded {} document(s) with {} component(s)",
            loaded.len(),
            components
        ));
    }

    fn merge_documents(
        &self,
        request: &MergeRequest,
        documents: &[Option<Bom>],
    ) -> Result<MergeOutcome> {
        match request.mode {
            MergeMode::Flat => {
                self.progress_reporter.report(&format!(
                    "🔀 Merging documents (flat, identity: {})...",
                    request.identity_policy
                ));
                Ok(FlatMerger::merge(documents, request.identity_policy))
            }
            MergeMode::Hierarchical => {
                self.progress_reporter
                    .report("🌳 Merging documents (hierarchical)...");
                let subject = request.subject.clone().unwrap_or_default();
                HierarchicalMerger::merge(documents, &subject)
            }
        }
    }

    fn normalize(mut bom: Bom, spec_version: SpecVersion) -> Bom {
        bom.set_spec_version(spec_version);
        BomNormalizer::normalize(bom)
    }

    fn validate_if_requested(
        &self,
        mode: ValidationMode,
        content: &str,
        spec_version: SpecVersion,
    ) -> Result<Option<ValidationReport>> {
        if mode == ValidationMode::None {
            return Ok(None);
        }

        self.progress_reporter.report(&format!(
            "🔍 Validating merged BOM against CycloneDX {}...",
            spec_version
        ));
        let report = self.schema_validator.validate(content, spec_version)?;

        if report.is_valid() {
            self.progress_reporter.report("✅ Validation passed");
        } else {
            self.progress_reporter.report_warning(&format!(
                "⚠️  Warning: Validation found {} issue(s):",
                report.messages().len()
            ));
            for message in report.messages() {
                self.progress_reporter
                    .report_warning(&format!("   - {}", message));
            }
        }
        Ok(Some(report))
    }

    fn report_summary(&self, statistics: &MergeStatistics) {
        if statistics.documents_skipped > 0 {
            self.progress_reporter.report(&format!(
                "   - Skipped empty documents: {}",
                statistics.documents_skipped
            ));
        }
        if statistics.aliases_collapsed > 0 {
            self.progress_reporter.report(&format!(
                "   - Duplicate bom-refs collapsed: {}",
                statistics.aliases_collapsed
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Merge complete: {} component(s) from {} document(s) merged into {}",
            statistics.components_loaded, statistics.documents_loaded, statistics.components_merged
        ));
    }
}

#[async_trait(?Send)]
impl<R, S, V, O, P> BomMergePort for MergeBomsUseCase<R, S, V, O, P>
where
    R: BomReader,
    S: BomSerializer,
    V: SchemaValidator,
    O: OutputPresenter,
    P: ProgressReporter,
{
    async fn merge(&self, request: MergeRequest) -> Result<MergeResponse> {
        self.execute(request).await
    }
}
