use crate::ports::outbound::{InputListReader, ProgressReporter};
use crate::shared::error::MergeError;
use crate::shared::Result;
use std::collections::HashSet;
use std::path::PathBuf;

/// Where the caller said input documents are
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFileSources {
    /// Paths given directly
    pub direct: Vec<PathBuf>,
    /// Files listing one path per line
    pub lists: Vec<PathBuf>,
    /// Files listing NUL-separated paths
    pub nul_lists: Vec<PathBuf>,
}

impl InputFileSources {
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.lists.is_empty() && self.nul_lists.is_empty()
    }

    /// Reads every list file and returns the combined input paths
    ///
    /// # Errors
    /// Returns `MergeError::ParameterValidation` when no source was given,
    /// and any error from `reader` when a list file cannot be read.
    pub fn resolve(&self, reader: &impl InputListReader) -> Result<Vec<PathBuf>> {
        if self.is_empty() {
            return Err(MergeError::parameter(
                "No input files given. Use --input-files, --input-files-list or --input-files-nul-list",
            )
            .into());
        }

        let newline_lists = self
            .lists
            .iter()
            .map(|path| reader.read_list(path))
            .collect::<Result<Vec<_>>>()?;
        let nul_lists = self
            .nul_lists
            .iter()
            .map(|path| reader.read_list(path))
            .collect::<Result<Vec<_>>>()?;

        Ok(determine_input_files(&self.direct, &newline_lists, &nul_lists))
    }
}

/// Combines direct paths with the entries of already-read list files.
///
/// Direct paths come first, then newline lists, then NUL lists. Blank
/// entries are ignored and duplicates keep their first position.
pub fn determine_input_files(
    direct: &[PathBuf],
    newline_lists: &[String],
    nul_lists: &[String],
) -> Vec<PathBuf> {
    let from_lines = newline_lists
        .iter()
        .flat_map(|content| content.lines())
        .map(str::trim);
    let from_nul = nul_lists
        .iter()
        .flat_map(|content| content.split('\0'))
        .map(|entry| entry.trim_matches(|c| c == '\n' || c == '\r'));

    let listed = from_lines
        .chain(from_nul)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from);

    let mut seen = HashSet::new();
    direct
        .iter()
        .cloned()
        .chain(listed)
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Reports the resolved input files through the diagnostics channel
pub fn report_input_files(files: &[PathBuf], reporter: &impl ProgressReporter) {
    reporter.report(&format!("📄 Input files ({}):", files.len()));
    for file in files {
        reporter.report(&format!("   - {}", file.display()));
    }
}
