//! The checker orchestrator: parses one file and drives the check
//! families in a fixed order, collecting diagnostics and occurrence
//! counts through a shared report primitive.

use rustc_hash::FxHashMap;
use rustpython_parser::parser;

use crate::registry::{Check, CheckCode, CheckKind};
use crate::rules;
use crate::settings::Settings;

/// The result of checking one file.
#[derive(Debug, Default)]
pub struct Checked {
    /// Diagnostics in emission order: family order, then traversal order
    /// within a family.
    pub checks: Vec<Check>,
    /// Occurrence counts per code, including suppressed occurrences.
    /// Codes that never fired are absent.
    pub counts: FxHashMap<CheckCode, usize>,
}

pub struct Checker<'a> {
    pub(crate) settings: &'a Settings,
    pub(crate) lines: &'a [&'a str],
    expected: &'a [String],
    checks: Vec<Check>,
    counts: FxHashMap<CheckCode, usize>,
}

impl<'a> Checker<'a> {
    fn new(settings: &'a Settings, lines: &'a [&'a str], expected: &'a [String]) -> Self {
        Self {
            settings,
            lines,
            expected,
            checks: vec![],
            counts: FxHashMap::default(),
        }
    }

    pub(crate) fn enabled(&self, code: &CheckCode) -> bool {
        self.settings.enabled.contains(code)
    }

    pub(crate) fn any_enabled(&self, codes: &[CheckCode]) -> bool {
        codes.iter().any(|code| self.enabled(code))
    }

    /// The shared report primitive: count every occurrence of an enabled
    /// code; append to the diagnostic list unless the code is expected
    /// in-file, and then only on first occurrence or when repeat
    /// reporting is on.
    pub(crate) fn report(&mut self, check: Check) {
        let code = check.kind.code();
        if !self.enabled(code) {
            return;
        }
        let count = self.counts.entry(*code).or_insert(0);
        *count += 1;
        if self.expected.iter().any(|expected| expected == code.as_str()) {
            return;
        }
        if self.settings.repeat || *count == 1 {
            self.checks.push(check);
        }
    }

    pub(crate) fn report_all(&mut self, checks: Vec<Check>) {
        for check in checks {
            self.report(check);
        }
    }

    fn into_checked(self) -> Checked {
        Checked {
            checks: self.checks,
            counts: self.counts,
        }
    }
}

/// Check a single file, supplied as decoded source lines.
///
/// An empty `filename` is a no-op. The `expected` codes are counted but
/// never reported.
pub fn check_source(
    filename: &str,
    lines: &[&str],
    settings: &Settings,
    expected: &[String],
) -> Checked {
    if filename.is_empty() {
        return Checked::default();
    }
    if settings.enabled.is_empty() {
        return Checked::default();
    }

    let mut checker = Checker::new(settings, lines, expected);
    let contents = lines.join("\n");

    match parser::parse_program(&contents, filename) {
        Ok(python_ast) => {
            use crate::registry::CheckCode::*;

            if checker.any_enabled(&[M101, M102]) {
                rules::coding::coding_comment(&mut checker);
            }
            if checker.any_enabled(&[M111, M112]) {
                rules::copyrights::copyright_notice(&mut checker);
            }
            if checker.any_enabled(&[M131, M132]) {
                rules::builtins::builtin_shadowing(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[
                M181, M182, M183, M184, M185, M186, M187, M188, M189, M191, M192, M193, M194,
                M195, M196, M197, M198,
            ]) {
                rules::comprehensions::comprehensions(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[M201]) {
                rules::sort_keys::dict_sort_keys(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[M601]) {
                rules::percent_format::percent_format(&mut checker);
            }
            if checker.any_enabled(&[M611, M612, M613, M621, M622, M623, M624, M625]) {
                rules::format_string::format_string(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[M701, M702]) {
                rules::future_imports::future_imports(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[M711]) {
                rules::gettext::gettext_alias(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[M801]) {
                rules::print_calls::print_calls(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[M811]) {
                rules::tuples::one_element_tuples(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[M821, M822]) {
                rules::mutable_defaults::mutable_defaults(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[M831]) {
                rules::line_continuation::line_continuation(&mut checker);
            }
            if checker.any_enabled(&[M841]) {
                rules::commented_code::commented_code(&mut checker);
            }
            if checker.any_enabled(&[M651, M652, M653, M654, M655]) {
                rules::logging_calls::logging_calls(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[
                M501, M502, M503, M504, M505, M506, M507, M508, M509, M511, M512, M513,
            ]) {
                rules::bugbear::bug_patterns(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[M851, M852, M853, M854]) {
                rules::returns::return_statements(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[
                M301, M302, M303, M304, M305, M306, M307, M308, M311, M312, M313, M314, M315,
                M321,
            ]) {
                rules::datetimez::datetime_calls(&mut checker, &python_ast);
            }
            if checker.any_enabled(&[
                M401, M402, M403, M411, M412, M413, M414, M421, M422, M423,
            ]) {
                rules::sys_version::sys_version(&mut checker, &python_ast);
            }
        }
        Err(parse_error) => {
            checker.report(Check::new(
                CheckKind::SyntaxError(
                    "SyntaxError".to_string(),
                    parse_error.error.to_string(),
                ),
                parse_error.location,
            ));
        }
    }

    checker.into_checked()
}

#[cfg(test)]
mod tests {
    use rustpython_parser::ast::Location;

    use super::{check_source, Checked};
    use crate::registry::CheckCode;
    use crate::settings::configuration::Options;
    use crate::settings::Settings;

    fn check_str(contents: &str, settings: &Settings) -> Checked {
        let lines: Vec<&str> = contents.lines().collect();
        check_source("test.py", &lines, settings, &[])
    }

    fn codes(checked: &Checked) -> Vec<&'static str> {
        checked
            .checks
            .iter()
            .map(|check| check.kind.code().as_str())
            .collect()
    }

    #[test]
    fn empty_filename_is_a_noop() {
        let settings = Settings::default();
        let checked = check_source("", &["x = ("], &settings, &[]);
        assert!(checked.checks.is_empty());
        assert!(checked.counts.is_empty());
    }

    #[test]
    fn parse_failure_yields_exactly_one_m901() {
        let settings = Settings::default();
        let checked = check_str("def f(:\n    pass\n", &settings);
        assert_eq!(codes(&checked), vec!["M901"]);
        assert_eq!(checked.counts.len(), 1);
        assert_eq!(checked.counts[&CheckCode::M901], 1);
    }

    #[test]
    fn repeat_off_reports_each_code_once_but_counts_all() {
        let settings = Settings::for_code(CheckCode::M811);
        let checked = check_str("x = (1,)\ny = (2,)\nz = (3,)\n", &settings);
        assert_eq!(codes(&checked), vec!["M811"]);
        assert_eq!(checked.counts[&CheckCode::M811], 3);
    }

    #[test]
    fn repeat_on_reports_every_occurrence() {
        let mut settings = Settings::for_code(CheckCode::M811);
        settings.repeat = true;
        let checked = check_str("x = (1,)\ny = (2,)\nz = (3,)\n", &settings);
        assert_eq!(codes(&checked), vec!["M811", "M811", "M811"]);
        assert_eq!(checked.counts[&CheckCode::M811], 3);
    }

    #[test]
    fn expected_codes_are_counted_but_not_reported() {
        let mut settings = Settings::for_code(CheckCode::M811);
        settings.repeat = true;
        let lines = vec!["x = (1,)", "y = (2,)"];
        let checked = check_source("test.py", &lines, &settings, &["M811".to_string()]);
        assert!(checked.checks.is_empty());
        assert_eq!(checked.counts[&CheckCode::M811], 2);
    }

    #[test]
    fn checker_runs_are_idempotent() {
        let settings = Settings::default();
        let contents = "import datetime\nx = (1,)\nlist = [1, 2, 3]\ndatetime.datetime.now()\n";
        let first = check_str(contents, &settings);
        let second = check_str(contents, &settings);
        assert_eq!(first.checks, second.checks);
        assert_eq!(first.counts, second.counts);
    }

    #[test]
    fn ignored_category_is_never_emitted() {
        let settings = Settings::from_options(Options {
            ignore: Some(vec!["M".to_string()]),
            ..Options::default()
        })
        .unwrap();
        let checked = check_str("x = (1,)\n", &settings);
        assert!(checked.checks.is_empty());
        assert!(checked.counts.is_empty());
    }

    #[test]
    fn missing_coding_scenario() {
        let settings = Settings::for_codes(&[CheckCode::M101, CheckCode::M102]);
        let checked = check_str("x = 1\n", &settings);
        assert_eq!(codes(&checked), vec!["M101"]);
        assert_eq!(checked.checks[0].location, Location::new(1, 0));
    }

    #[test]
    fn shadowed_builtin_scenario() {
        let settings = Settings::for_code(CheckCode::M131);
        let checked = check_str("list = [1, 2, 3]\n", &settings);
        assert_eq!(codes(&checked), vec!["M131"]);
        assert_eq!(
            checked.checks[0].kind.body(),
            "`list` is a Python builtin and is being shadowed; consider renaming the variable"
        );
    }

    #[test]
    fn one_element_tuple_scenario() {
        let settings = Settings::for_code(CheckCode::M811);
        let checked = check_str("x = (1,)\n", &settings);
        assert_eq!(codes(&checked), vec!["M811"]);
    }

    #[test]
    fn mutable_default_scenario() {
        let settings = Settings::for_codes(&[CheckCode::M821, CheckCode::M822]);
        let checked = check_str("def f(x=[]):\n    pass\n", &settings);
        assert_eq!(codes(&checked), vec!["M821"]);
        assert_eq!(
            checked.checks[0].kind.body(),
            "mutable default argument of type list"
        );
    }

    #[test]
    fn naive_datetime_scenario() {
        let settings = Settings::default();
        let checked = check_str("import datetime\ndatetime.datetime.now()\n", &settings);
        assert_eq!(
            checked
                .checks
                .iter()
                .filter(|check| *check.kind.code() == CheckCode::M305)
                .count(),
            1
        );
    }

    #[test]
    fn future_import_scenario() {
        let mut settings = Settings::for_codes(&[CheckCode::M701, CheckCode::M702]);
        settings.required_future_imports = ["division".to_string()].into_iter().collect();

        let checked = check_str("x = 1\n", &settings);
        assert_eq!(codes(&checked), vec!["M702"]);
        assert_eq!(
            checked.checks[0].kind.body(),
            "expected these `__future__` imports: division; found none"
        );

        let checked = check_str("from __future__ import division\nx = 1\n", &settings);
        assert!(checked.checks.is_empty());
    }

    #[test]
    fn emission_follows_family_order() {
        // M811 (statements family) runs before the datetime family, even
        // though the datetime call appears earlier in the source.
        let settings = Settings::for_codes(&[CheckCode::M305, CheckCode::M811]);
        let contents = "import datetime\ndatetime.datetime.now()\nx = (1,)\n";
        let checked = check_str(contents, &settings);
        assert_eq!(codes(&checked), vec!["M811", "M305"]);
    }
}
