//! Flat JSON records handed to project emission.

use serde::{Deserialize, Serialize};

use crate::descriptor::Target;
use crate::error::Result;
use crate::fragment::{Blob, BuildSystem, DevEnv, Optimization, Platform};

/// Raw fields and derived names of one concrete target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetRecord {
    pub platform: Platform,
    pub dev_env: DevEnv,
    pub optimization: Optimization,
    pub blob: Blob,
    pub build_system: BuildSystem,
    pub display_name: String,
    pub platform_label: String,
    pub directory_name: String,
}

impl From<&Target> for TargetRecord {
    fn from(target: &Target) -> Self {
        Self {
            platform: target.platform(),
            dev_env: target.dev_env(),
            optimization: target.optimization(),
            blob: target.blob(),
            build_system: target.build_system(),
            display_name: target.display_name(),
            platform_label: target.platform_label(),
            directory_name: target.directory_name(),
        }
    }
}

/// Pretty-printed JSON array of [`TargetRecord`]s.
pub fn targets_to_json(targets: &[Target]) -> Result<String> {
    let records: Vec<TargetRecord> = targets.iter().map(TargetRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
