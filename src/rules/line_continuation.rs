//! M831: backslash line continuations.

use rustpython_parser::ast::Location;

use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

/// Return `true` if the trailing backslash is code-level: not part of a
/// comment, and not inside a string literal.
fn is_code_continuation(line: &str) -> bool {
    let mut in_string: Option<char> = None;
    let mut escaped = false;
    for c in line.chars() {
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
            '#' if in_string.is_none() => return false,
            _ => {}
        }
    }
    in_string.is_none()
}

fn first_keyword(line: &str) -> &str {
    let trimmed = line.trim_start();
    trimmed
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .next()
        .unwrap_or("")
}

/// Continuations are tolerated for `assert` and `with` statements, which
/// had no parenthesized form historically.
pub fn line_continuation(checker: &mut Checker) {
    let lines = checker.lines;
    let mut logical_start = 0;
    let mut continued = false;
    for (lineno, line) in lines.iter().enumerate() {
        if !continued {
            logical_start = lineno;
        }
        let trimmed = line.trim_end();
        continued = trimmed.ends_with('\\') && is_code_continuation(trimmed);
        if !continued {
            continue;
        }
        let keyword = first_keyword(lines[logical_start]);
        if keyword != "assert" && keyword != "with" {
            checker.report(Check::new(
                CheckKind::LineContinuation,
                Location::new(lineno + 1, trimmed.chars().count() - 1),
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
        let mut settings = Settings::for_code(CheckCode::M831);
        settings.repeat = true;
        check_source("test.py", &lines, &settings, &[]).checks.len()
    }

    #[test]
    fn reports_continuation_in_assignment() {
        assert_eq!(run("x = 1 + \\\n    2\n"), 1);
    }

    #[test]
    fn allows_assert_and_with() {
        assert_eq!(run("assert x == 1 and \\\n    y == 2\n"), 0);
        assert_eq!(run("with open('a') as a, \\\n    open('b') as b:\n    pass\n"), 0);
    }

    #[test]
    fn keyword_applies_to_the_whole_logical_line() {
        // Both continuation lines belong to the assert statement.
        assert_eq!(run("assert x and \\\n    y and \\\n    z\n"), 0);
    }

    #[test]
    fn ignores_backslash_inside_strings() {
        assert_eq!(run("x = 'ends with \\\\'\n"), 0);
    }

    #[test]
    fn ignores_backslash_inside_comments() {
        assert_eq!(run("x = 1  # see C:\\path \\\ny = 2\n"), 0);
    }
}
