//! `pyproject.toml` discovery and the `[tool.pymisc]` options table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;
use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Options {
    pub select: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,
    pub repeat: Option<bool>,
    pub exclude: Option<Vec<String>>,
    pub allowed_encodings: Option<Vec<String>>,
    pub copyright_min_file_size: Option<usize>,
    pub copyright_author: Option<String>,
    pub builtins_exempt: Option<Vec<String>>,
    pub builtins_aliases: Option<HashMap<String, Vec<String>>>,
    pub required_future_imports: Option<Vec<String>>,
    pub commented_code_aggressive: Option<bool>,
    pub commented_code_whitelist: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Tools {
    pymisc: Option<Options>,
}

#[derive(Debug, Deserialize)]
struct Pyproject {
    tool: Option<Tools>,
}

/// Parse the `[tool.pymisc]` table out of a `pyproject.toml`.
pub fn parse_pyproject_toml(path: &Path) -> Result<Option<Options>> {
    let contents = std::fs::read_to_string(path)?;
    let pyproject: Pyproject = toml::from_str(&contents)?;
    Ok(pyproject.tool.and_then(|tools| tools.pymisc))
}

/// Find the closest `pyproject.toml` at or above the given path.
pub fn find_pyproject_toml(path: &Path) -> Option<PathBuf> {
    let start = if path.is_dir() { path } else { path.parent()? };
    for directory in start.ancestors() {
        let candidate = directory.join("pyproject.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Resolve the options for a run: an explicit `--config` path, or the
/// closest `pyproject.toml`, or the defaults.
pub fn load_options(config: Option<&Path>, paths: &[PathBuf]) -> Result<Options> {
    if let Some(config) = config {
        return Ok(parse_pyproject_toml(config)?.unwrap_or_default());
    }
    let anchor = paths
        .first()
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    match find_pyproject_toml(&anchor) {
        Some(pyproject) => {
            debug!("Found pyproject.toml at: {pyproject:?}");
            Ok(parse_pyproject_toml(&pyproject)?.unwrap_or_default())
        }
        None => {
            debug!("Unable to find pyproject.toml; using default settings...");
            Ok(Options::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::{Options, Pyproject};

    #[test]
    fn parses_tool_table() -> Result<()> {
        let pyproject: Pyproject = toml::from_str(
            r#"
[tool.pymisc]
select = ["M1"]
ignore = ["M"]
repeat = true
copyright-author = "Example Corp"
required-future-imports = ["annotations"]
"#,
        )?;
        let options: Options = pyproject.tool.and_then(|tools| tools.pymisc).unwrap();
        assert_eq!(options.select, Some(vec!["M1".to_string()]));
        assert_eq!(options.repeat, Some(true));
        assert_eq!(options.copyright_author, Some("Example Corp".to_string()));
        Ok(())
    }

    #[test]
    fn missing_table_is_none() -> Result<()> {
        let pyproject: Pyproject = toml::from_str(
            r#"
[tool.other]
key = "value"
"#,
        )?;
        assert!(pyproject.tool.and_then(|tools| tools.pymisc).is_none());
        Ok(())
    }
}
