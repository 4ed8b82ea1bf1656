//! `kiln targets` — template and target listing.

use anyhow::{bail, Context, Result};
use kiln_targets::{
    check_unique_directories, dedup_targets, directory_name_fields, expand, has_errors,
    targets_to_json, validate_templates, Target, TargetTemplate,
};

/// Expand, deduplicate, and check directory uniqueness.
fn resolve(templates: &[TargetTemplate]) -> Result<Vec<Target>> {
    let targets = dedup_targets(expand(templates).context("expanding templates")?);
    check_unique_directories(&targets)?;
    Ok(targets)
}

/// List the templates before expansion.
pub fn templates(templates: &[TargetTemplate]) -> Result<()> {
    println!("Templates:");
    println!();
    for (index, template) in templates.iter().enumerate() {
        println!(
            "  {index:>2}  {template}  ({} targets)",
            template.combination_count()
        );
    }
    Ok(())
}

/// Text table of concrete targets.
pub(crate) fn render_table(targets: &[Target]) -> String {
    let mut out = format!("  {:<32} {:<20} {}\n", "DIRECTORY", "PLATFORM", "NAME");
    for target in targets {
        out.push_str(&format!(
            "  {:<32} {:<20} {}\n",
            target.directory_name(),
            target.platform_label(),
            target.display_name()
        ));
    }
    out
}

/// Expand templates and list the concrete targets.
pub fn list(templates: &[TargetTemplate], format: Option<&str>) -> Result<()> {
    let targets = resolve(templates)?;
    match format.unwrap_or("text") {
        "text" => {
            print!("{}", render_table(&targets));
            println!();
            println!("{} targets", targets.len());
        }
        "json" => println!("{}", targets_to_json(&targets)?),
        other => bail!("unknown format '{other}' (expected text or json)"),
    }
    Ok(())
}

/// Find a concrete target by directory name.
pub(crate) fn find<'a>(targets: &'a [Target], directory: &str) -> Option<&'a Target> {
    targets
        .iter()
        .find(|t| t.directory_name().eq_ignore_ascii_case(directory))
}

/// Describe one concrete target in detail.
pub fn describe(templates: &[TargetTemplate], directory: &str) -> Result<()> {
    let targets = resolve(templates)?;
    let Some(target) = find(&targets, directory) else {
        bail!("unknown target: '{directory}'. Use 'kiln targets list' to see available targets.");
    };

    println!("=== Target: {target} ===");
    println!("  Platform:      {}", target.platform());
    println!("  Dev env:       {}", target.dev_env());
    println!("  Optimization:  {}", target.optimization());
    println!("  Blob:          {}", target.blob());
    println!("  Build system:  {}", target.build_system());
    println!();
    println!("  Display name:   {}", target.display_name());
    println!("  Platform label: {}", target.platform_label());
    println!("  Directory:      {}", target.directory_name());
    println!("  (directory order: {})", directory_name_fields().join(", "));
    Ok(())
}

/// Validate templates, failing when any error is found.
pub fn validate(templates: &[TargetTemplate]) -> Result<()> {
    match validate_templates(templates) {
        Ok(()) => {
            println!("{} templates OK", templates.len());
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                println!("  [{}] #{}: {}", issue.severity, issue.template, issue.message);
            }
            if has_errors(&issues) {
                bail!("template validation failed");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_targets::{default_targets, OptimizationFlags, TemplateOverrides};

    #[test]
    fn table_lists_every_default_target() {
        let targets = resolve(&default_targets()).unwrap();
        let table = render_table(&targets);
        assert!(table.contains("ios_debug "));
        assert!(table.contains("ios_release_fastbuild"));
        assert!(table.contains("FastBuild_NoBlob"));
        assert_eq!(table.lines().count(), targets.len() + 1);
        assert!(table.starts_with("  DIRECTORY"));
        assert!(table.ends_with('\n'));
    }

    #[test]
    fn describe_known_target() {
        assert!(describe(&default_targets(), "ios_debug_fastbuild").is_ok());
    }

    #[test]
    fn describe_unknown_target() {
        assert!(describe(&default_targets(), "win64_debug").is_err());
    }

    #[test]
    fn list_rejects_unknown_format() {
        assert!(list(&default_targets(), Some("yaml")).is_err());
    }

    #[test]
    fn validate_fails_on_empty_axis() {
        let bad = default_targets()[0]
            .clone_with(&TemplateOverrides::new().optimization(OptimizationFlags::empty()));
        assert!(validate(&[bad]).is_err());
        assert!(validate(&default_targets()).is_ok());
    }

    #[test]
    fn find_is_case_insensitive() {
        let targets = resolve(&default_targets()).unwrap();
        assert!(find(&targets, "IOS_RELEASE").is_some());
        assert!(find(&targets, "ios_profile").is_none());
    }
}
