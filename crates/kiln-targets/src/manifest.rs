//! `kiln.toml` manifest parsing.
//!
//! A manifest lists extra templates and chooses whether the default target
//! set is included:
//!
//! ```toml
//! [targets]
//! include-defaults = true
//!
//! [[template]]
//! platform = "win64"
//! dev-env = "vs2022"
//! optimization = ["Debug", "Release"]
//! blob = "Blob"
//! build-system = ["Default", "FastBuild"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::defaults::default_targets;
use crate::descriptor::TargetTemplate;
use crate::error::{Result, TargetError};
use crate::fragment::{parse_flags, Blob, BuildSystem, DevEnv, Optimization, Platform};

/// Manifest file name searched for by [`Manifest::find_and_load`].
pub const MANIFEST_FILE: &str = "kiln.toml";

/// Top-level manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    /// Target set options.
    #[serde(default)]
    pub targets: TargetsConfig,
    /// Additional templates, in declaration order.
    #[serde(rename = "template", default)]
    pub templates: Vec<TemplateEntry>,
}

/// `[targets]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetsConfig {
    /// Prepend the built-in default templates.
    #[serde(default = "default_true")]
    pub include_defaults: bool,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One `[[template]]` entry. Values are axis names, resolved by
/// [`TemplateEntry::resolve`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateEntry {
    pub platform: String,
    #[serde(default)]
    pub dev_env: Option<String>,
    pub optimization: Vec<String>,
    #[serde(default)]
    pub blob: Option<String>,
    #[serde(default = "default_build_system")]
    pub build_system: Vec<String>,
}

fn default_build_system() -> Vec<String> {
    vec![BuildSystem::Default.name().to_string()]
}

impl TemplateEntry {
    /// Resolve names into a template.
    ///
    /// Rejects unknown names and empty flag lists.
    pub fn resolve(&self) -> Result<TargetTemplate> {
        let platform: Platform = self.platform.parse()?;
        let dev_env = match &self.dev_env {
            Some(name) => name.parse()?,
            None => DevEnv::default(),
        };
        let blob = match &self.blob {
            Some(name) => name.parse()?,
            None => Blob::default(),
        };
        if self.optimization.is_empty() {
            return Err(TargetError::Validation {
                detail: format!("template for '{}' lists no optimization", self.platform),
            });
        }
        if self.build_system.is_empty() {
            return Err(TargetError::Validation {
                detail: format!("template for '{}' lists no build-system", self.platform),
            });
        }
        let optimization = parse_flags::<Optimization>(&self.optimization)?;
        let build_system = parse_flags::<BuildSystem>(&self.build_system)?;
        Ok(TargetTemplate::new(
            platform,
            dev_env,
            optimization,
            blob,
            build_system,
        ))
    }
}

impl Manifest {
    /// Parse a manifest from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a manifest from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(TargetError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let manifest = Self::parse(&content)?;
        info!(path = %path.display(), templates = manifest.templates.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Search upward from `start_dir` for `kiln.toml`, returning the manifest
    /// and the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let manifest = Self::load(&candidate)?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// All templates: defaults first when included, then manifest entries.
    pub fn templates(&self) -> Result<Vec<TargetTemplate>> {
        let mut templates = if self.targets.include_defaults {
            default_targets()
        } else {
            Vec::new()
        };
        for entry in &self.templates {
            templates.push(entry.resolve()?);
        }
        Ok(templates)
    }

    /// Template written by `kiln init`.
    pub fn template_text() -> String {
        r#"[targets]
include-defaults = true

# [[template]]
# platform = "win64"
# dev-env = "vs2022"
# optimization = ["Debug", "Release"]
# blob = "Blob"
# build-system = ["Default"]
"#
        .to_string()
    }
}
