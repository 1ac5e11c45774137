//! M111, M112: the copyright notice at the top of the file.

use std::cmp;

use anyhow::Result;
use log::error;
use regex::Regex;
use rustpython_parser::ast::Location;

use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

fn copyright_regex(author: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r"(?i)copyright\s+(\(c\)\s+)?\d{{4}}\s+{author}"
    ))?)
}

/// The notice is only required once the file reaches the configured
/// minimum size, and is searched for in the leading byte window.
pub fn copyright_notice(checker: &mut Checker) {
    let settings = checker.settings;
    let source = checker.lines.join("\n");

    let min_size = settings.copyright_min_file_size;
    if source.len() < min_size {
        return;
    }

    let mut window = cmp::min(cmp::max(1024, min_size), source.len());
    while !source.is_char_boundary(window) {
        window -= 1;
    }
    let top_of_file = &source[..window];

    let present = match copyright_regex(".*") {
        Ok(regex) => regex.is_match(top_of_file),
        Err(err) => {
            error!("Failed to compile copyright regex: {err}");
            return;
        }
    };
    if !present {
        checker.report(Check::new(CheckKind::MissingCopyright, Location::new(1, 0)));
        return;
    }

    if !settings.copyright_author.is_empty() {
        match copyright_regex(&regex::escape(&settings.copyright_author)) {
            Ok(regex) => {
                if !regex.is_match(top_of_file) {
                    checker.report(Check::new(
                        CheckKind::WrongCopyrightHolder,
                        Location::new(1, 0),
                    ));
                }
            }
            Err(err) => error!("Failed to compile copyright regex: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::checker::check_source;
    use crate::registry::CheckCode;
    use crate::settings::Settings;

    fn run(contents: &str, min_size: usize, author: &str) -> Vec<CheckCode> {
        let lines: Vec<&str> = contents.lines().collect();
        let mut settings = Settings::for_codes(&[CheckCode::M111, CheckCode::M112]);
        settings.copyright_min_file_size = min_size;
        settings.copyright_author = author.to_string();
        check_source("test.py", &lines, &settings, &[])
            .checks
            .iter()
            .map(|check| *check.kind.code())
            .collect()
    }

    #[test]
    fn reports_missing_notice() {
        assert_eq!(run("x = 1\n", 0, ""), vec![CheckCode::M111]);
    }

    #[test]
    fn accepts_a_notice() {
        assert!(run("# Copyright (c) 2024 Example Corp\nx = 1\n", 0, "").is_empty());
        assert!(run("# copyright 2024 somebody\nx = 1\n", 0, "").is_empty());
    }

    #[test]
    fn small_files_are_exempt() {
        assert!(run("x = 1\n", 1024, "").is_empty());
    }

    #[test]
    fn checks_the_configured_author() {
        let contents = "# Copyright (c) 2024 Example Corp\nx = 1\n";
        assert!(run(contents, 0, "Example Corp").is_empty());
        assert_eq!(
            run(contents, 0, "Other Author"),
            vec![CheckCode::M112]
        );
    }
}
