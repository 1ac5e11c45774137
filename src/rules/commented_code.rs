//! M841: commented-out code.

use once_cell::sync::Lazy;
use regex::Regex;
use rustpython_parser::ast::Location;

use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

static CODE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Imports.
        r"^(?:from\s+\S+\s+)?import\s+\w",
        // Definitions and flow-control headers.
        r"^(?:def|class)\s+\w+\s*\(?",
        r"^(?:if|elif|while|for|with|try|except|finally|else|return|raise|yield|del|print)\b\s*[\w('\[{]?.*$",
        r"^(?:pass|break|continue)\s*$",
        // Assignments.
        r#"^[\w.\[\]'"]+\s*(?:[-+*/|&^]|//|\*\*|>>|<<)?=\s*\S"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid regex"))
    .collect()
});

static AGGRESSIVE_CODE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Bare calls and attribute chains.
        r"^\w+(?:\.\w+)*\s*\(.*\)\s*$",
        // Container displays.
        r"^[\[({].*[\])}],?\s*$",
        // Block headers that lost their body.
        r":\s*$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid regex"))
    .collect()
});

/// Find the start of a comment on the line, skipping `#` characters that
/// sit inside string literals.
fn find_comment(line: &str) -> Option<usize> {
    let mut in_string: Option<char> = None;
    let mut escaped = false;
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\'' | '"' => match in_string {
                Some(quote) if quote == c => in_string = None,
                Some(_) => {}
                None => in_string = Some(c),
            },
            '#' if in_string.is_none() => return Some(index),
            _ => {}
        }
    }
    None
}

pub fn commented_code(checker: &mut Checker) {
    let lines = checker.lines;
    let settings = checker.settings;
    for (lineno, line) in lines.iter().enumerate() {
        let Some(start) = find_comment(line) else {
            continue;
        };
        // Shebang line.
        if lineno == 0 && line.starts_with("#!") {
            continue;
        }
        let text = line[start..].trim_start_matches('#').trim();
        if text.is_empty() {
            continue;
        }
        if settings
            .commented_code_whitelist
            .iter()
            .any(|pattern| pattern.is_match(text))
        {
            continue;
        }
        let mut looks_like_code = CODE_PATTERNS.iter().any(|pattern| pattern.is_match(text));
        if !looks_like_code && settings.commented_code_aggressive {
            looks_like_code = AGGRESSIVE_CODE_PATTERNS
                .iter()
                .any(|pattern| pattern.is_match(text));
        }
        if looks_like_code {
            let column = line[..start].chars().count();
            checker.report(Check::new(
                CheckKind::CommentedCode,
                Location::new(lineno + 1, column),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::checker::check_source;
    use crate::registry::CheckCode;
    use crate::settings::Settings;

    fn run(contents: &str) -> usize {
        let lines: Vec<&str> = contents.lines().collect();
        let mut settings = Settings::for_code(CheckCode::M841);
        settings.repeat = true;
        check_source("test.py", &lines, &settings, &[]).checks.len()
    }

    #[test]
    fn reports_commented_statements() {
        assert_eq!(run("# x = 1\npass\n"), 1);
        assert_eq!(run("# import os\npass\n"), 1);
        assert_eq!(run("# def f():\npass\n"), 1);
        assert_eq!(run("# return value\npass\n"), 1);
    }

    #[test]
    fn keeps_prose_comments() {
        assert_eq!(run("# compute the next value\nx = 1\n"), 0);
        assert_eq!(run("# handles the empty case, too\nx = 1\n"), 0);
    }

    #[test]
    fn whitelisted_markers_are_kept() {
        assert_eq!(run("x = 1  # noqa: M841\n"), 0);
        assert_eq!(run("# TODO: frobnicate = True\nx = 1\n"), 0);
        assert_eq!(run("# type: ignore\nx = 1\n"), 0);
    }

    #[test]
    fn shebang_and_percent_in_strings_are_kept() {
        assert_eq!(run("#!/usr/bin/env python\nx = 1\n"), 0);
        assert_eq!(run("x = 'no # comment here'\n"), 0);
    }
}
