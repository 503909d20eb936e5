use super::{Bom, Component};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How input documents are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Union of all components, deduplicated by identity
    #[default]
    Flat,
    /// One sub-tree per input document under a common subject
    Hierarchical,
}

impl FromStr for MergeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(MergeMode::Flat),
            "hierarchical" => Ok(MergeMode::Hierarchical),
            _ => Err(format!(
                "Invalid merge mode: {}. Please specify 'flat' or 'hierarchical'",
                s
            )),
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeMode::Flat => write!(f, "flat"),
            MergeMode::Hierarchical => write!(f, "hierarchical"),
        }
    }
}

/// Counts gathered while merging, reported through the diagnostics channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStatistics {
    pub documents_loaded: usize,
    pub documents_skipped: usize,
    pub components_loaded: usize,
    pub components_merged: usize,
    pub aliases_collapsed: usize,
}

/// Result of running one of the mergers, before metadata reconciliation
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub bom: Bom,
    /// Subjects of the input documents, in input order (flat mode only)
    pub input_subjects: Vec<Component>,
    /// Dropped duplicate bom-ref -> canonical bom-ref
    pub aliases: HashMap<String, String>,
    pub statistics: MergeStatistics,
}
