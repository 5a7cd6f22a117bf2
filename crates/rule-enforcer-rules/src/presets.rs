//! The ordered detector set.

use crate::{
    AllowedImportsDetector, ExpectedFunctions, NoConsole, NoHelperFunctions, NoIfStatements,
    NoLoops, NoReassignment, ValidDeclarations,
};
use rule_enforcer_core::DetectorBox;

/// Returns every detector in report order.
///
/// Violations are reported detector by detector in this order:
/// 1. `expected-functions` (RE001)
/// 2. `valid-declarations` (RE002)
/// 3. `no-reassignment` (RE003)
/// 4. `no-loops` (RE004)
/// 5. `no-if-statements` (RE005)
/// 6. `no-console` (RE006)
/// 7. `no-helper-functions` (RE007)
/// 8. `allowed-imports` (RE008)
#[must_use]
pub fn all_detectors() -> Vec<DetectorBox> {
    vec![
        Box::new(ExpectedFunctions::new()),
        Box::new(ValidDeclarations::new()),
        Box::new(NoReassignment::new()),
        Box::new(NoLoops::new()),
        Box::new(NoIfStatements::new()),
        Box::new(NoConsole::new()),
        Box::new(NoHelperFunctions::new()),
        Box::new(AllowedImportsDetector::new()),
    ]
}

/// Looks a detector up by name or code.
#[must_use]
pub fn detector_by_name(name: &str) -> Option<DetectorBox> {
    all_detectors()
        .into_iter()
        .find(|d| d.name() == name || d.code().eq_ignore_ascii_case(name))
}
