//! `kiln init` — manifest scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use kiln_targets::manifest::{Manifest, MANIFEST_FILE};

/// Write a template `kiln.toml` into `dir`.
pub fn run(dir: &Path) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }
    fs::write(&path, Manifest::template_text())
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_loadable_manifest() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
        let manifest = Manifest::load(&dir.path().join(MANIFEST_FILE)).unwrap();
        assert!(manifest.targets.include_defaults);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
        assert!(run(dir.path()).is_err());
    }
}
