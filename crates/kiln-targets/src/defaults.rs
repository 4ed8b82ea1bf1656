//! Default target set for the product line.

use crate::descriptor::{TargetTemplate, TemplateOverrides};
use crate::fragment::{Blob, BuildSystem, DevEnv, OptimizationFlags, Platform};

/// Platforms the default target set covers.
pub const SUPPORTED_PLATFORMS: &[Platform] = &[Platform::Ios];

/// Baseline and FastBuild templates for every supported platform.
///
/// Templates are returned unexpanded; pass them to [`crate::expand`].
pub fn default_targets() -> Vec<TargetTemplate> {
    SUPPORTED_PLATFORMS
        .iter()
        .flat_map(|&platform| platform_targets(platform))
        .collect()
}

/// Templates for the iOS platform.
pub fn ios_targets() -> [TargetTemplate; 2] {
    platform_targets(Platform::Ios)
}

/// The baseline template for `platform` followed by its FastBuild sibling.
///
/// The baseline builds every optimization level with the default toolchain
/// and backend. The sibling swaps in the FastBuild backend without source
/// aggregation.
pub fn platform_targets(platform: Platform) -> [TargetTemplate; 2] {
    let baseline = TargetTemplate::new(
        platform,
        DevEnv::DEFAULT,
        OptimizationFlags::all(),
        Blob::NoBlob,
        BuildSystem::Default,
    );

    let fastbuild = baseline.clone_with(
        &TemplateOverrides::new()
            .blob(Blob::NoBlob)
            .build_system(BuildSystem::FastBuild),
    );

    [baseline, fastbuild]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::expand;
    use crate::fragment::BuildSystemFlags;

    #[test]
    fn two_templates_per_platform() {
        let templates = default_targets();
        assert_eq!(templates.len(), 2 * SUPPORTED_PLATFORMS.len());
    }

    #[test]
    fn baseline_then_fastbuild() {
        let [baseline, fastbuild] = ios_targets();
        assert_eq!(baseline.build_system, BuildSystemFlags::DEFAULT);
        assert_eq!(baseline.optimization, OptimizationFlags::all());
        assert_eq!(fastbuild.build_system, BuildSystemFlags::FAST_BUILD);
        assert_eq!(fastbuild.blob, Blob::NoBlob);
        assert_eq!(fastbuild.optimization, baseline.optimization);
        assert_eq!(fastbuild.dev_env, baseline.dev_env);
    }

    #[test]
    fn ios_expands_to_four_targets() {
        let targets = expand(&ios_targets()).unwrap();
        let dirs: Vec<String> = targets.iter().map(|t| t.directory_name()).collect();
        assert_eq!(
            dirs,
            vec![
                "ios_debug",
                "ios_release",
                "ios_debug_fastbuild",
                "ios_release_fastbuild",
            ]
        );
    }
}
