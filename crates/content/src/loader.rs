//! Team file loader.

use std::path::Path;

use crate::spec::TeamSpec;

/// Loader for team definitions from RON files.
pub struct TeamLoader;

impl TeamLoader {
    /// Load and validate a team definition from a RON file.
    pub fn load(path: &Path) -> anyhow::Result<TeamSpec> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read team file {}: {}", path.display(), e))?;
        Self::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load team from {}: {}", path.display(), e))
    }

    /// Parse and validate a team definition from RON text.
    pub fn from_str(content: &str) -> anyhow::Result<TeamSpec> {
        let spec: TeamSpec =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse team RON: {e}"))?;
        spec.validate()?;
        Ok(spec)
    }
}
