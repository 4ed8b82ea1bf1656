//! Target descriptors.
//!
//! [`TargetTemplate`] is what a project declares: flag axes may hold several
//! bits. [`Target`] is one buildable variant with exactly one value per flag
//! axis. Targets are produced from templates by [`crate::expand`]; nothing
//! else narrows a flag set to a single value.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::fragment::{
    Blob, BuildSystem, BuildSystemFlags, DevEnv, FlagAxis, Optimization, OptimizationFlags,
    Platform,
};
use crate::naming;

/// A target descriptor whose flag axes may carry several values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetTemplate {
    pub platform: Platform,
    pub dev_env: DevEnv,
    pub optimization: OptimizationFlags,
    pub blob: Blob,
    pub build_system: BuildSystemFlags,
}

/// Field replacements for [`TargetTemplate::clone_with`].
///
/// Unset fields are copied from the source. A set field replaces the source
/// field wholesale; flag sets are not merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateOverrides {
    pub platform: Option<Platform>,
    pub dev_env: Option<DevEnv>,
    pub optimization: Option<OptimizationFlags>,
    pub blob: Option<Blob>,
    pub build_system: Option<BuildSystemFlags>,
}

impl TemplateOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn dev_env(mut self, dev_env: DevEnv) -> Self {
        self.dev_env = Some(dev_env);
        self
    }

    pub fn optimization(mut self, optimization: impl Into<OptimizationFlags>) -> Self {
        self.optimization = Some(optimization.into());
        self
    }

    pub fn blob(mut self, blob: Blob) -> Self {
        self.blob = Some(blob);
        self
    }

    pub fn build_system(mut self, build_system: impl Into<BuildSystemFlags>) -> Self {
        self.build_system = Some(build_system.into());
        self
    }

    /// Whether no field is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl TargetTemplate {
    /// Build a template. Semantic compatibility of platform and toolchain is
    /// not checked here; see [`crate::validate_templates`].
    pub fn new(
        platform: Platform,
        dev_env: DevEnv,
        optimization: impl Into<OptimizationFlags>,
        blob: Blob,
        build_system: impl Into<BuildSystemFlags>,
    ) -> Self {
        Self {
            platform,
            dev_env,
            optimization: optimization.into(),
            blob,
            build_system: build_system.into(),
        }
    }

    /// Copy this template, replacing the fields set in `overrides`.
    pub fn clone_with(&self, overrides: &TemplateOverrides) -> Self {
        Self {
            platform: overrides.platform.unwrap_or(self.platform),
            dev_env: overrides.dev_env.unwrap_or(self.dev_env),
            optimization: overrides.optimization.unwrap_or(self.optimization),
            blob: overrides.blob.unwrap_or(self.blob),
            build_system: overrides.build_system.unwrap_or(self.build_system),
        }
    }

    /// Whether every flag axis holds exactly one value.
    pub fn is_concrete(&self) -> bool {
        !Optimization::has_undeclared_bits(self.optimization)
            && !BuildSystem::has_undeclared_bits(self.build_system)
            && Optimization::decompose(self.optimization).len() == 1
            && BuildSystem::decompose(self.build_system).len() == 1
    }

    /// Number of concrete targets this template expands to.
    pub fn combination_count(&self) -> usize {
        Optimization::decompose(self.optimization).len()
            * BuildSystem::decompose(self.build_system).len()
    }
}

impl fmt::Display for TargetTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}_{}\" [{}] {} {}",
            self.platform,
            self.dev_env,
            Optimization::describe(self.optimization),
            self.blob,
            BuildSystem::describe(self.build_system),
        )
    }
}

impl From<Target> for TargetTemplate {
    fn from(target: Target) -> Self {
        Self {
            platform: target.platform,
            dev_env: target.dev_env,
            optimization: target.optimization.into(),
            blob: target.blob,
            build_system: target.build_system.into(),
        }
    }
}

/// One concrete build variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Target {
    platform: Platform,
    dev_env: DevEnv,
    optimization: Optimization,
    blob: Blob,
    build_system: BuildSystem,
}

/// Field replacements for [`Target::clone_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetOverrides {
    pub platform: Option<Platform>,
    pub dev_env: Option<DevEnv>,
    pub optimization: Option<Optimization>,
    pub blob: Option<Blob>,
    pub build_system: Option<BuildSystem>,
}

impl TargetOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn dev_env(mut self, dev_env: DevEnv) -> Self {
        self.dev_env = Some(dev_env);
        self
    }

    pub fn optimization(mut self, optimization: Optimization) -> Self {
        self.optimization = Some(optimization);
        self
    }

    pub fn blob(mut self, blob: Blob) -> Self {
        self.blob = Some(blob);
        self
    }

    pub fn build_system(mut self, build_system: BuildSystem) -> Self {
        self.build_system = Some(build_system);
        self
    }
}

impl Target {
    pub(crate) fn new(
        platform: Platform,
        dev_env: DevEnv,
        optimization: Optimization,
        blob: Blob,
        build_system: BuildSystem,
    ) -> Self {
        Self {
            platform,
            dev_env,
            optimization,
            blob,
            build_system,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn dev_env(&self) -> DevEnv {
        self.dev_env
    }

    pub fn optimization(&self) -> Optimization {
        self.optimization
    }

    pub fn blob(&self) -> Blob {
        self.blob
    }

    pub fn build_system(&self) -> BuildSystem {
        self.build_system
    }

    /// Copy this target, replacing the fields set in `overrides`.
    ///
    /// Single values replace single values, so the result stays concrete.
    pub fn clone_with(&self, overrides: &TargetOverrides) -> Self {
        Self {
            platform: overrides.platform.unwrap_or(self.platform),
            dev_env: overrides.dev_env.unwrap_or(self.dev_env),
            optimization: overrides.optimization.unwrap_or(self.optimization),
            blob: overrides.blob.unwrap_or(self.blob),
            build_system: overrides.build_system.unwrap_or(self.build_system),
        }
    }

    /// Short UI label, built from the optimization level only (`"debug"`).
    pub fn display_name(&self) -> String {
        naming::display_name(self)
    }

    /// Solution-level platform name (`"Default"`, `"FastBuild_NoBlob"`).
    pub fn platform_label(&self) -> String {
        naming::platform_label(self)
    }

    /// Filesystem-safe directory name (`"ios_debug_fastbuild"`).
    ///
    /// The component order is fixed: existing intermediate directories depend
    /// on it.
    pub fn directory_name(&self) -> String {
        naming::directory_name(self)
    }

    /// `root` joined with [`Self::directory_name`].
    pub fn intermediate_path(&self, root: &Path) -> PathBuf {
        root.join(self.directory_name())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}_{}\" {}",
            self.platform,
            self.dev_env,
            self.display_name()
        )
    }
}
