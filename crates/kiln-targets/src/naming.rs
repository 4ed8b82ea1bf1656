//! Derived target names.
//!
//! Each derived string is an ordered table of rules. A rule contributes one
//! part when its condition holds; parts are joined in table order. The tables
//! are the ordering contract: reordering `DIRECTORY_RULES` renames every
//! intermediate directory.

use crate::descriptor::Target;
use crate::fragment::{Blob, BuildSystem};

/// One naming rule: include `part(target)` when `applies(target)` holds.
#[derive(Clone, Copy)]
pub(crate) struct NameRule {
    pub(crate) field: &'static str,
    pub(crate) applies: fn(&Target) -> bool,
    pub(crate) part: fn(&Target) -> String,
}

fn always(_: &Target) -> bool {
    true
}

fn platform(t: &Target) -> String {
    t.platform().to_string()
}

fn optimization(t: &Target) -> String {
    t.optimization().to_string()
}

fn build_system(t: &Target) -> String {
    t.build_system().to_string()
}

fn blob(t: &Target) -> String {
    t.blob().to_string()
}

fn dev_env(t: &Target) -> String {
    t.dev_env().to_string()
}

fn is_fastbuild(t: &Target) -> bool {
    t.build_system() == BuildSystem::FastBuild
}

// Only this pair is disambiguated in solution platform listings.
fn is_fastbuild_noblob(t: &Target) -> bool {
    is_fastbuild(t) && t.blob() == Blob::NoBlob
}

fn is_non_default_dev_env(t: &Target) -> bool {
    !t.dev_env().is_default()
}

pub(crate) const DISPLAY_RULES: &[NameRule] = &[NameRule {
    field: "optimization",
    applies: always,
    part: optimization,
}];

pub(crate) const PLATFORM_LABEL_RULES: &[NameRule] = &[
    NameRule {
        field: "build-system",
        applies: always,
        part: build_system,
    },
    NameRule {
        field: "blob",
        applies: is_fastbuild_noblob,
        part: blob,
    },
];

pub(crate) const DIRECTORY_RULES: &[NameRule] = &[
    NameRule {
        field: "platform",
        applies: always,
        part: platform,
    },
    NameRule {
        field: "optimization",
        applies: always,
        part: optimization,
    },
    NameRule {
        field: "build-system",
        applies: is_fastbuild,
        part: build_system,
    },
    NameRule {
        field: "dev-env",
        applies: is_non_default_dev_env,
        part: dev_env,
    },
];

/// Apply `rules` in order and join the resulting parts with `sep`.
pub(crate) fn apply(rules: &[NameRule], target: &Target, sep: &str) -> String {
    rules
        .iter()
        .filter(|rule| (rule.applies)(target))
        .map(|rule| (rule.part)(target))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Fields that can appear in a directory name, in their fixed order.
pub fn directory_name_fields() -> Vec<&'static str> {
    DIRECTORY_RULES.iter().map(|rule| rule.field).collect()
}

pub(crate) fn display_name(target: &Target) -> String {
    apply(DISPLAY_RULES, target, " ").to_lowercase()
}

pub(crate) fn platform_label(target: &Target) -> String {
    apply(PLATFORM_LABEL_RULES, target, "_")
}

pub(crate) fn directory_name(target: &Target) -> String {
    apply(DIRECTORY_RULES, target, "_").to_lowercase()
}
