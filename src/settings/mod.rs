//! Effective checker settings, resolved from `pyproject.toml` and CLI
//! overrides.

pub mod configuration;

use std::collections::BTreeSet;

use anyhow::Result;
use glob::Pattern;
use regex::Regex;
use rustc_hash::FxHashMap;
use strum::IntoEnumIterator;

use crate::registry::CheckCode;
use crate::settings::configuration::Options;

pub const DEFAULT_ALLOWED_ENCODINGS: &[&str] = &["latin-1", "utf-8"];
pub const DEFAULT_BUILTINS_EXEMPT: &[&str] = &["__name__", "__doc__"];
pub const DEFAULT_COMMENTED_CODE_WHITELIST: &[&str] = &[
    "pylint",
    "pyright",
    "noqa",
    r"type:\s*ignore",
    "TODO",
    "FIXME",
    "-\\*-",
];

#[derive(Debug)]
pub struct Settings {
    pub select: Vec<String>,
    pub ignore: Vec<String>,
    pub repeat: bool,
    /// The codes left enabled by the select/ignore prefix computation.
    pub enabled: BTreeSet<CheckCode>,
    pub exclude: Vec<Pattern>,
    pub allowed_encodings: Vec<String>,
    pub copyright_min_file_size: usize,
    pub copyright_author: String,
    pub builtins_exempt: Vec<String>,
    /// Builtin names that may be rebound to the listed compatibility
    /// aliases (e.g. `str = unicode`).
    pub builtins_aliases: FxHashMap<String, Vec<String>>,
    pub required_future_imports: BTreeSet<String>,
    pub commented_code_aggressive: bool,
    pub commented_code_whitelist: Vec<Regex>,
}

/// A code is suppressed iff it starts with any ignored prefix and does not
/// start with any selected prefix; select wins over ignore at the prefix
/// level.
fn resolve_enabled(select: &[String], ignore: &[String]) -> BTreeSet<CheckCode> {
    CheckCode::iter()
        .filter(|code| {
            let code = code.as_str();
            !(ignore.iter().any(|prefix| code.starts_with(prefix.as_str()))
                && !select.iter().any(|prefix| code.starts_with(prefix.as_str())))
        })
        .collect()
}

fn default_builtins_aliases() -> FxHashMap<String, Vec<String>> {
    FxHashMap::from_iter([
        ("chr".to_string(), vec!["unichr".to_string()]),
        ("str".to_string(), vec!["unicode".to_string()]),
    ])
}

impl Settings {
    pub fn from_options(options: Options) -> Result<Self> {
        let select = options.select.unwrap_or_default();
        let ignore = options.ignore.unwrap_or_default();
        let enabled = resolve_enabled(&select, &ignore);
        let whitelist = options.commented_code_whitelist.unwrap_or_else(|| {
            DEFAULT_COMMENTED_CODE_WHITELIST
                .iter()
                .map(|pattern| (*pattern).to_string())
                .collect()
        });
        Ok(Self {
            select,
            ignore,
            repeat: options.repeat.unwrap_or_default(),
            enabled,
            exclude: options
                .exclude
                .unwrap_or_default()
                .iter()
                .map(|pattern| Pattern::new(pattern).map_err(anyhow::Error::from))
                .collect::<Result<Vec<_>>>()?,
            allowed_encodings: options.allowed_encodings.unwrap_or_else(|| {
                DEFAULT_ALLOWED_ENCODINGS
                    .iter()
                    .map(|encoding| (*encoding).to_string())
                    .collect()
            }),
            copyright_min_file_size: options.copyright_min_file_size.unwrap_or_default(),
            copyright_author: options.copyright_author.unwrap_or_default(),
            builtins_exempt: options.builtins_exempt.unwrap_or_else(|| {
                DEFAULT_BUILTINS_EXEMPT
                    .iter()
                    .map(|name| (*name).to_string())
                    .collect()
            }),
            builtins_aliases: options
                .builtins_aliases
                .map(|aliases| aliases.into_iter().collect())
                .unwrap_or_else(default_builtins_aliases),
            required_future_imports: options
                .required_future_imports
                .map(|names| names.into_iter().collect())
                .unwrap_or_default(),
            commented_code_aggressive: options.commented_code_aggressive.unwrap_or(true),
            commented_code_whitelist: whitelist
                .iter()
                .map(|pattern| Regex::new(pattern).map_err(anyhow::Error::from))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    /// Settings with exactly the given codes enabled.
    pub fn for_codes(codes: &[CheckCode]) -> Self {
        let mut settings = Self::default();
        settings.select = codes.iter().map(|code| code.as_str().to_string()).collect();
        settings.ignore = vec![String::new()];
        settings.enabled = resolve_enabled(&settings.select, &settings.ignore);
        settings
    }

    /// Settings with exactly one code enabled.
    pub fn for_code(code: CheckCode) -> Self {
        Self::for_codes(&[code])
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_options(Options::default()).expect("default settings are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_enabled, Settings};
    use crate::registry::CheckCode;

    #[test]
    fn empty_lists_enable_everything() {
        let enabled = resolve_enabled(&[], &[]);
        assert!(enabled.contains(&CheckCode::M101));
        assert!(enabled.contains(&CheckCode::M901));
    }

    #[test]
    fn ignore_prefix_suppresses_family() {
        let enabled = resolve_enabled(&[], &["M8".to_string()]);
        assert!(!enabled.contains(&CheckCode::M811));
        assert!(enabled.contains(&CheckCode::M101));
    }

    #[test]
    fn select_overrides_ignore() {
        let enabled = resolve_enabled(&["M811".to_string()], &["M8".to_string()]);
        assert!(enabled.contains(&CheckCode::M811));
        assert!(!enabled.contains(&CheckCode::M821));
    }

    #[test]
    fn for_code_enables_exactly_one() {
        let settings = Settings::for_code(CheckCode::M811);
        assert_eq!(settings.enabled.len(), 1);
        assert!(settings.enabled.contains(&CheckCode::M811));
    }
}
