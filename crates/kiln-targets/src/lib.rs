//! Build-target descriptors for the Kiln project generator.
//!
//! A target is one point in the space
//! platform × toolchain × optimization × blob mode × build system:
//! - **Fragments:** scalar axes and flag axes ([`fragment`])
//! - **Templates:** descriptors whose flag axes may hold several values
//! - **Targets:** concrete descriptors with one value per axis, produced by
//!   [`expand`], carrying the derived display, platform, and directory names
//!
//! Everything here is pure and deterministic. The [`manifest`] module is the
//! only part that touches the filesystem.

mod defaults;
mod descriptor;
mod error;
mod expand;
pub mod fragment;
pub mod manifest;
mod naming;
mod record;
mod validate;

pub use defaults::{default_targets, ios_targets, platform_targets, SUPPORTED_PLATFORMS};
pub use descriptor::{Target, TargetOverrides, TargetTemplate, TemplateOverrides};
pub use error::{Result, TargetError};
pub use expand::{check_unique_directories, dedup_targets, expand};
pub use fragment::{
    Blob, BuildSystem, BuildSystemFlags, DevEnv, FlagAxis, Optimization, OptimizationFlags,
    Platform,
};
pub use manifest::Manifest;
pub use naming::directory_name_fields;
pub use record::{targets_to_json, TargetRecord};
pub use validate::{has_errors, validate_templates, Severity, ValidationIssue};
