use crate::bom_merge::domain::{ValidationMode, ValidationReport};

/// What to do with serialized output once validation has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// Hand the content to the output presenter
    pub emit: bool,
    /// Report `SchemaValidationFailed` to the caller (after emitting, if `emit`)
    pub fail: bool,
}

/// ValidationGate - decides emission and overall result from a validation report
///
/// | Mode      | Report  | emit  | fail  |
/// |-----------|---------|-------|-------|
/// | `None`    | -       | true  | false |
/// | any       | valid   | true  | false |
/// | `Strict`  | invalid | false | true  |
/// | `Relaxed` | invalid | true  | true  |
pub struct ValidationGate;

impl ValidationGate {
    /// `report` is `None` when validation did not run
    pub fn decide(mode: ValidationMode, report: Option<&ValidationReport>) -> GateDecision {
        let invalid = report.is_some_and(|r| !r.is_valid());
        match (mode, invalid) {
            (ValidationMode::None, _) | (_, false) => GateDecision {
                emit: true,
                fail: false,
            },
            (ValidationMode::Strict, true) => GateDecision {
                emit: false,
                fail: true,
            },
            (ValidationMode::Relaxed, true) => GateDecision {
                emit: true,
                fail: true,
            },
        }
    }
}
