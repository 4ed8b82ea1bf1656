//! Template set validation.
//!
//! Checks that are semantic rather than structural: the types rule out
//! unknown scalar values, but not undeclared flag bits, an empty flag axis,
//! or an unbuildable platform/toolchain pairing.

use std::collections::HashSet;
use std::fmt;

use crate::descriptor::TargetTemplate;
use crate::fragment::{BuildSystem, DevEnv, FlagAxis, Optimization, Platform};

/// How serious a [`ValidationIssue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A problem found in a template set.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Index of the template in the validated slice.
    pub template: usize,
    pub message: String,
}

fn check_flag_axis<A: FlagAxis>(
    set: A::Set,
    index: usize,
    template: &TargetTemplate,
    issues: &mut Vec<ValidationIssue>,
) {
    if A::has_undeclared_bits(set) {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            template: index,
            message: format!("template {template} has undeclared {} bits {set:?}", A::axis()),
        });
    } else if A::decompose(set).is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            template: index,
            message: format!("template {template} has no {} value set", A::axis()),
        });
    }
}

/// Validate a template set.
///
/// Returns `Ok(())` when there is nothing to report, or `Err(issues)`. Only
/// issues with [`Severity::Error`] prevent expansion.
pub fn validate_templates(templates: &[TargetTemplate]) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (index, template) in templates.iter().enumerate() {
        // 1. Every flag axis declares at least one value and no unknown bits
        check_flag_axis::<Optimization>(template.optimization, index, template, &mut issues);
        check_flag_axis::<BuildSystem>(template.build_system, index, template, &mut issues);

        // 2. Duplicate templates expand to duplicate targets
        if !seen.insert(*template) {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                template: index,
                message: format!("template {template} is declared more than once"),
            });
        }

        // 3. iOS projects are only buildable through Xcode
        if template.platform == Platform::Ios && template.dev_env != DevEnv::Xcode {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                template: index,
                message: format!(
                    "template {template} targets ios with {}; only xcode builds ios",
                    template.dev_env
                ),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}
