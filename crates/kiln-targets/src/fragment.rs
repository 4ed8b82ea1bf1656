//! Fragment axes.
//!
//! A fragment is one orthogonal configuration dimension of a build target.
//! Scalar axes (platform, toolchain, blob mode) carry exactly one value per
//! descriptor. Flag axes (optimization, build system) come in two shapes: a
//! closed enum naming one value, used by concrete targets, and a `bitflags`
//! set of those values, used by templates that mean "build all of these".

use std::fmt;
use std::str::FromStr;

use bitflags::{bitflags, Flags};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};

/// Declares a closed axis enum with canonical names, `Display`, and a
/// case-insensitive `FromStr`.
macro_rules! axis_enum {
    (
        $(#[$meta:meta])*
        pub enum $ty:ident : $axis:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $name:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $ty {
            $( $(#[$vmeta])* #[serde(rename = $name)] $variant, )+
        }

        impl $ty {
            /// Axis name used in diagnostics.
            pub const AXIS: &'static str = $axis;

            /// Every value of the axis, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Canonical name of the value.
            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = TargetError;

            fn from_str(s: &str) -> Result<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| TargetError::UnknownValue {
                        axis: $axis,
                        value: s.to_string(),
                    })
            }
        }
    };
}

axis_enum! {
    /// Target platform.
    pub enum Platform: "platform" {
        Win64 => "win64",
        Linux => "linux",
        Mac => "mac",
        Ios => "ios",
        Android => "android",
    }
}

axis_enum! {
    /// Development environment (toolchain) the project files are generated for.
    pub enum DevEnv: "dev-env" {
        Vs2019 => "vs2019",
        Vs2022 => "vs2022",
        Xcode => "xcode",
        Make => "make",
    }
}

impl DevEnv {
    /// The toolchain left implicit in directory names.
    pub const DEFAULT: DevEnv = DevEnv::Xcode;

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl Default for DevEnv {
    fn default() -> Self {
        Self::DEFAULT
    }
}

axis_enum! {
    /// Source aggregation (unity build) strategy.
    pub enum Blob: "blob" {
        /// Sources merged into blob files by the generator.
        Blob => "Blob",
        /// Every source compiled on its own.
        NoBlob => "NoBlob",
        /// Unity files produced by the FastBuild backend.
        FastBuildUnitys => "FastBuildUnitys",
    }
}

impl Default for Blob {
    fn default() -> Self {
        Blob::NoBlob
    }
}

axis_enum! {
    /// Optimization level of a concrete target.
    pub enum Optimization: "optimization" {
        Debug => "Debug",
        Release => "Release",
    }
}

axis_enum! {
    /// Build backend of a concrete target.
    pub enum BuildSystem: "build-system" {
        /// The generator's native project format.
        Default => "Default",
        FastBuild => "FastBuild",
    }
}

bitflags! {
    /// Set of optimization levels carried by a template.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct OptimizationFlags: u32 {
        const DEBUG = 1 << 0;
        const RELEASE = 1 << 1;
    }
}

bitflags! {
    /// Set of build backends carried by a template.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct BuildSystemFlags: u32 {
        const DEFAULT = 1 << 0;
        const FAST_BUILD = 1 << 1;
    }
}

/// A flag axis: a closed enum of single values paired with its bit-set type.
pub trait FlagAxis: Copy + Eq + fmt::Display + 'static {
    /// The bit-set type a template stores for this axis.
    type Set: Flags + Copy + fmt::Debug;

    /// Axis name used in diagnostics.
    fn axis() -> &'static str;

    /// Every value of the axis, in bit declaration order.
    fn all() -> &'static [Self];

    /// The single bit standing for `self`.
    fn to_flags(self) -> Self::Set;

    /// The declared values present in `set`, in declaration order.
    fn decompose(set: Self::Set) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|v| set.contains(v.to_flags()))
            .collect()
    }

    /// Whether `set` carries bits outside the declared values.
    fn has_undeclared_bits(set: Self::Set) -> bool {
        Self::Set::from_bits(set.bits()).is_none()
    }

    /// Union of the bits for `values`.
    fn combine(values: impl IntoIterator<Item = Self>) -> Self::Set {
        values
            .into_iter()
            .fold(Self::Set::empty(), |acc, v| acc.union(v.to_flags()))
    }

    /// Render a set as `Debug|Release`, or `(none)` when empty.
    fn describe(set: Self::Set) -> String {
        let names: Vec<String> = Self::decompose(set).iter().map(|v| v.to_string()).collect();
        if names.is_empty() {
            "(none)".to_string()
        } else {
            names.join("|")
        }
    }
}

impl FlagAxis for Optimization {
    type Set = OptimizationFlags;

    fn axis() -> &'static str {
        Self::AXIS
    }

    fn all() -> &'static [Self] {
        Self::ALL
    }

    fn to_flags(self) -> OptimizationFlags {
        match self {
            Optimization::Debug => OptimizationFlags::DEBUG,
            Optimization::Release => OptimizationFlags::RELEASE,
        }
    }
}

impl FlagAxis for BuildSystem {
    type Set = BuildSystemFlags;

    fn axis() -> &'static str {
        Self::AXIS
    }

    fn all() -> &'static [Self] {
        Self::ALL
    }

    fn to_flags(self) -> BuildSystemFlags {
        match self {
            BuildSystem::Default => BuildSystemFlags::DEFAULT,
            BuildSystem::FastBuild => BuildSystemFlags::FAST_BUILD,
        }
    }
}

impl From<Optimization> for OptimizationFlags {
    fn from(value: Optimization) -> Self {
        value.to_flags()
    }
}

impl From<BuildSystem> for BuildSystemFlags {
    fn from(value: BuildSystem) -> Self {
        value.to_flags()
    }
}

/// Parse a list of value names into a flag set for axis `A`.
///
/// Unknown names are rejected; an empty list yields an empty set and is left
/// for the caller to reject.
pub fn parse_flags<A>(names: &[String]) -> Result<A::Set>
where
    A: FlagAxis + FromStr<Err = TargetError>,
{
    let values = names
        .iter()
        .map(|n| n.parse::<A>())
        .collect::<Result<Vec<A>>>()?;
    Ok(A::combine(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_bits_are_distinct_powers_of_two() {
        let opt: Vec<u32> = Optimization::ALL.iter().map(|o| o.to_flags().bits()).collect();
        assert_eq!(opt, vec![1, 2]);
        let bs: Vec<u32> = BuildSystem::ALL.iter().map(|b| b.to_flags().bits()).collect();
        assert_eq!(bs, vec![1, 2]);
    }

    #[test]
    fn decompose_follows_declaration_order() {
        let set = OptimizationFlags::RELEASE | OptimizationFlags::DEBUG;
        assert_eq!(
            Optimization::decompose(set),
            vec![Optimization::Debug, Optimization::Release]
        );
        assert!(Optimization::decompose(OptimizationFlags::empty()).is_empty());
    }

    #[test]
    fn combine_is_union() {
        let set = BuildSystem::combine([BuildSystem::FastBuild, BuildSystem::Default]);
        assert_eq!(set, BuildSystemFlags::all());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("IOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("noblob".parse::<Blob>().unwrap(), Blob::NoBlob);
        assert_eq!("fastbuild".parse::<BuildSystem>().unwrap(), BuildSystem::FastBuild);
    }

    #[test]
    fn parse_rejects_unknown_value() {
        let err = "ps5".parse::<Platform>().unwrap_err();
        assert!(matches!(
            err,
            TargetError::UnknownValue { axis: "platform", .. }
        ));
    }

    #[test]
    fn parse_flags_from_names() {
        let names = vec!["Debug".to_string(), "release".to_string()];
        let set = parse_flags::<Optimization>(&names).unwrap();
        assert_eq!(set, OptimizationFlags::all());
        assert!(parse_flags::<Optimization>(&["Profile".to_string()]).is_err());
    }

    #[test]
    fn undeclared_bits_are_detected() {
        assert!(!Optimization::has_undeclared_bits(OptimizationFlags::all()));
        assert!(!Optimization::has_undeclared_bits(OptimizationFlags::empty()));
        assert!(Optimization::has_undeclared_bits(
            OptimizationFlags::from_bits_retain(0b101)
        ));
        assert!(BuildSystem::has_undeclared_bits(
            BuildSystemFlags::from_bits_retain(1 << 7)
        ));
    }

    #[test]
    fn describe_lists_set_bits() {
        assert_eq!(Optimization::describe(OptimizationFlags::all()), "Debug|Release");
        assert_eq!(BuildSystem::describe(BuildSystemFlags::empty()), "(none)");
    }

    #[test]
    fn xcode_is_default_toolchain() {
        assert!(DevEnv::default().is_default());
        assert!(!DevEnv::Vs2022.is_default());
    }
}
