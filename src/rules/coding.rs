//! M101, M102: the coding magic comment.

use once_cell::sync::Lazy;
use regex::Regex;
use rustpython_parser::ast::Location;

use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

static CODING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)coding[:=]\s*([-\w.]+)").expect("Invalid regex"));

/// Only the first five lines are searched for a coding marker.
pub fn coding_comment(checker: &mut Checker) {
    let lines = checker.lines;
    let settings = checker.settings;
    for (lineno, line) in lines.iter().take(5).enumerate() {
        if let Some(captures) = CODING_REGEX.captures(line) {
            let coding = captures.get(1).map_or("", |group| group.as_str());
            if !settings
                .allowed_encodings
                .iter()
                .any(|encoding| encoding.eq_ignore_ascii_case(coding))
            {
                checker.report(Check::new(
                    CheckKind::UnknownEncoding(coding.to_string()),
                    Location::new(lineno + 1, 0),
                ));
            }
            return;
        }
    }
    checker.report(Check::new(CheckKind::MissingCoding, Location::new(1, 0)));
}

#[cfg(test)]
mod tests {
    use crate::checker::check_source;
    use crate::registry::CheckCode;
    use crate::settings::Settings;

    fn run(contents: &str) -> Vec<CheckCode> {
        let lines: Vec<&str> = contents.lines().collect();
        let settings = Settings::for_codes(&[CheckCode::M101, CheckCode::M102]);
        check_source("test.py", &lines, &settings, &[])
            .checks
            .iter()
            .map(|check| *check.kind.code())
            .collect()
    }

    #[test]
    fn reports_missing_marker() {
        assert_eq!(run("x = 1\n"), vec![CheckCode::M101]);
    }

    #[test]
    fn accepts_allowed_encodings() {
        assert!(run("# -*- coding: utf-8 -*-\nx = 1\n").is_empty());
        assert!(run("# -*- coding: UTF-8 -*-\nx = 1\n").is_empty());
        assert!(run("# coding=latin-1\nx = 1\n").is_empty());
    }

    #[test]
    fn reports_unknown_encoding() {
        assert_eq!(run("# -*- coding: cp1252 -*-\nx = 1\n"), vec![CheckCode::M102]);
    }

    #[test]
    fn marker_must_be_in_the_first_five_lines() {
        let contents = "a = 1\nb = 2\nc = 3\nd = 4\ne = 5\n# -*- coding: utf-8 -*-\n";
        assert_eq!(run(contents), vec![CheckCode::M101]);
    }
}
