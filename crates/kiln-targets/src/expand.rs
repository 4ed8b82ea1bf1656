//! Template expansion.
//!
//! Expansion takes the Cartesian product of the values set on each flag
//! axis. Output order is deterministic: templates in input order, then
//! optimization (outer) and build system (inner), each in declaration order.

use std::collections::HashMap;
use std::collections::HashSet;

use tracing::{debug, trace};

use crate::descriptor::{Target, TargetTemplate};
use crate::error::{Result, TargetError};
use crate::fragment::{BuildSystem, FlagAxis, Optimization};

/// Values of axis `A` set on `template`, failing on undeclared bits or when
/// there are none.
fn axis_values<A: FlagAxis>(set: A::Set, template: &TargetTemplate) -> Result<Vec<A>> {
    if A::has_undeclared_bits(set) {
        return Err(TargetError::UnknownValue {
            axis: A::axis(),
            value: format!("{set:?}"),
        });
    }
    let values = A::decompose(set);
    if values.is_empty() {
        return Err(TargetError::EmptyFlagAxis {
            axis: A::axis(),
            template: template.to_string(),
        });
    }
    Ok(values)
}

impl TargetTemplate {
    /// Expand this template into its concrete targets.
    pub fn expand(&self) -> Result<Vec<Target>> {
        let optimizations = axis_values::<Optimization>(self.optimization, self)?;
        let build_systems = axis_values::<BuildSystem>(self.build_system, self)?;

        let mut targets = Vec::with_capacity(optimizations.len() * build_systems.len());
        for &optimization in &optimizations {
            for &build_system in &build_systems {
                let target = Target::new(
                    self.platform,
                    self.dev_env,
                    optimization,
                    self.blob,
                    build_system,
                );
                trace!(variant = %target, directory = %target.directory_name(), "expanded");
                targets.push(target);
            }
        }
        debug!(template = %self, count = targets.len(), "expanded template");
        Ok(targets)
    }
}

/// Expand every template into concrete targets.
///
/// Fails on the first template with an empty flag axis; no partial list is
/// returned.
pub fn expand(templates: &[TargetTemplate]) -> Result<Vec<Target>> {
    let mut targets = Vec::new();
    for template in templates {
        targets.extend(template.expand()?);
    }
    Ok(targets)
}

/// Drop structural duplicates, keeping the first occurrence.
pub fn dedup_targets(targets: Vec<Target>) -> Vec<Target> {
    let mut seen = HashSet::with_capacity(targets.len());
    targets.into_iter().filter(|t| seen.insert(*t)).collect()
}

/// Check that distinct targets never share a directory name.
pub fn check_unique_directories(targets: &[Target]) -> Result<()> {
    let mut owners: HashMap<String, &Target> = HashMap::with_capacity(targets.len());
    for target in targets {
        let directory = target.directory_name();
        match owners.get(&directory) {
            Some(first) if *first != target => {
                return Err(TargetError::DirectoryCollision {
                    directory,
                    first: first.to_string(),
                    second: target.to_string(),
                });
            }
            Some(_) => {}
            None => {
                owners.insert(directory, target);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TemplateOverrides;
    use crate::fragment::{Blob, BuildSystemFlags, DevEnv, OptimizationFlags, Platform};

    fn template(optimization: OptimizationFlags, build_system: BuildSystemFlags) -> TargetTemplate {
        TargetTemplate::new(
            Platform::Ios,
            DevEnv::Xcode,
            optimization,
            Blob::NoBlob,
            build_system,
        )
    }

    #[test]
    fn product_over_flag_axes_in_declared_order() {
        let t = template(OptimizationFlags::all(), BuildSystemFlags::all());
        let targets = t.expand().unwrap();
        let pairs: Vec<(Optimization, BuildSystem)> = targets
            .iter()
            .map(|t| (t.optimization(), t.build_system()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (Optimization::Debug, BuildSystem::Default),
                (Optimization::Debug, BuildSystem::FastBuild),
                (Optimization::Release, BuildSystem::Default),
                (Optimization::Release, BuildSystem::FastBuild),
            ]
        );
        assert!(targets.iter().all(|x| x.platform() == Platform::Ios
            && x.dev_env() == DevEnv::Xcode
            && x.blob() == Blob::NoBlob));
    }

    #[test]
    fn every_expanded_target_is_concrete() {
        let t = template(OptimizationFlags::all(), BuildSystemFlags::all());
        for target in t.expand().unwrap() {
            assert!(TargetTemplate::from(target).is_concrete());
        }
    }

    #[test]
    fn expanding_concrete_templates_is_identity() {
        let targets = template(OptimizationFlags::all(), BuildSystemFlags::all())
            .expand()
            .unwrap();
        let lifted: Vec<TargetTemplate> = targets.iter().copied().map(TargetTemplate::from).collect();
        assert_eq!(expand(&lifted).unwrap(), targets);
    }

    #[test]
    fn empty_optimization_axis_is_rejected() {
        let t = template(OptimizationFlags::empty(), BuildSystemFlags::DEFAULT);
        let err = expand(&[t]).unwrap_err();
        assert!(matches!(
            err,
            TargetError::EmptyFlagAxis { axis: "optimization", .. }
        ));
    }

    #[test]
    fn empty_axis_fails_whole_expansion() {
        let good = template(OptimizationFlags::all(), BuildSystemFlags::DEFAULT);
        let bad = good.clone_with(&TemplateOverrides::new().build_system(BuildSystemFlags::empty()));
        let err = expand(&[good, bad]).unwrap_err();
        assert!(matches!(
            err,
            TargetError::EmptyFlagAxis { axis: "build-system", .. }
        ));
    }

    #[test]
    fn undeclared_bit_is_rejected() {
        let t = template(
            OptimizationFlags::from_bits_retain(0b101),
            BuildSystemFlags::DEFAULT,
        );
        assert!(!t.is_concrete());
        let err = t.expand().unwrap_err();
        assert!(matches!(
            err,
            TargetError::UnknownValue { axis: "optimization", .. }
        ));
    }

    #[test]
    fn undeclared_bit_from_json_is_rejected() {
        let json = r#"{
            "platform": "ios",
            "dev-env": "xcode",
            "optimization": "DEBUG | 0x4",
            "blob": "NoBlob",
            "build-system": "DEFAULT"
        }"#;
        let t: TargetTemplate = serde_json::from_str(json).unwrap();
        assert!(!t.is_concrete());
        assert!(matches!(
            expand(&[t]).unwrap_err(),
            TargetError::UnknownValue { axis: "optimization", .. }
        ));
    }

    #[test]
    fn expand_preserves_template_order() {
        let a = template(OptimizationFlags::RELEASE, BuildSystemFlags::DEFAULT);
        let b = a.clone_with(&TemplateOverrides::new().platform(Platform::Mac));
        let names: Vec<String> = expand(&[b, a])
            .unwrap()
            .iter()
            .map(|t| t.directory_name())
            .collect();
        assert_eq!(names, vec!["mac_release", "ios_release"]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let t = template(OptimizationFlags::all(), BuildSystemFlags::DEFAULT);
        let mut targets = t.expand().unwrap();
        targets.extend(t.expand().unwrap());
        let unique = dedup_targets(targets);
        assert_eq!(unique, t.expand().unwrap());
    }

    #[test]
    fn directory_collision_is_reported() {
        let a = template(OptimizationFlags::DEBUG, BuildSystemFlags::FAST_BUILD);
        let b = a.clone_with(&TemplateOverrides::new().blob(Blob::FastBuildUnitys));
        let targets = expand(&[a, b]).unwrap();
        let err = check_unique_directories(&targets).unwrap_err();
        match err {
            TargetError::DirectoryCollision { directory, .. } => {
                assert_eq!(directory, "ios_debug_fastbuild")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn repeated_target_is_not_a_collision() {
        let a = template(OptimizationFlags::all(), BuildSystemFlags::all());
        let mut targets = a.expand().unwrap();
        targets.push(targets[0]);
        assert!(check_unique_directories(&targets).is_ok());
    }
}
