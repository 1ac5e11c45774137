//! M601: printf-style `%` formatting.

use once_cell::sync::Lazy;
use regex::Regex;
use rustpython_parser::ast::Location;

use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

// A `%` operator directly following a (possibly whitespace-separated)
// closing string quote, or a line that starts with `%` (a continuation of
// such an expression). Quoted runs are consumed pairwise so that `%`
// characters inside other string literals don't match.
static PERCENT_FORMAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?:[^'"]*['"][^'"]*['"])+\s*%|^\s*%"#).expect("Invalid regex")
});

const CONVERSION_TYPES: &str = "diouxXeEfFgGcrs";

/// Find the first format specifier on the line, e.g. `%s` or `%(name)s`.
fn find_format_specifier(line: &str) -> Option<(usize, String)> {
    for (index, _) in line.match_indices('%') {
        let rest = &line[index + 1..];
        let mut chars = rest.chars();
        match chars.next() {
            Some('(') => {
                if let Some(end) = rest.find(')') {
                    if let Some(conversion) = rest[end + 1..].chars().next() {
                        if CONVERSION_TYPES.contains(conversion) {
                            let mut formatter = "%".to_string();
                            formatter.push_str(&rest[..=end]);
                            formatter.push(conversion);
                            return Some((index, formatter));
                        }
                    }
                }
            }
            Some(conversion) if CONVERSION_TYPES.contains(conversion) => {
                return Some((index, format!("%{conversion}")));
            }
            _ => {}
        }
    }
    None
}

pub fn percent_format(checker: &mut Checker) {
    let lines = checker.lines;
    for (lineno, line) in lines.iter().enumerate() {
        if !PERCENT_FORMAT_REGEX.is_match(line) {
            continue;
        }
        if let Some((offset, formatter)) = find_format_specifier(line) {
            let column = line[..offset].chars().count();
            checker.report(Check::new(
                CheckKind::PercentFormat(formatter),
                Location::new(lineno + 1, column),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::checker::check_source;
    use crate::registry::{CheckCode, CheckKind};
    use crate::settings::Settings;

    fn run(contents: &str) -> Vec<CheckKind> {
        let lines: Vec<&str> = contents.lines().collect();
        let settings = Settings::for_code(CheckCode::M601);
        check_source("test.py", &lines, &settings, &[])
            .checks
            .into_iter()
            .map(|check| check.kind)
            .collect()
    }

    #[test]
    fn reports_string_percent_formatting() {
        assert_eq!(
            run("x = \"hello %s\" % name\n"),
            vec![CheckKind::PercentFormat("%s".to_string())]
        );
    }

    #[test]
    fn reports_mapping_key_formatting() {
        assert_eq!(
            run("x = 'hello %(name)s' % values\n"),
            vec![CheckKind::PercentFormat("%(name)s".to_string())]
        );
    }

    #[test]
    fn ignores_modulo_arithmetic() {
        assert!(run("x = a % b\n").is_empty());
        assert!(run("x = 10 % 3\n").is_empty());
    }

    #[test]
    fn ignores_percent_inside_strings() {
        assert!(run("x = 'all % are literal'\n").is_empty());
    }
}
