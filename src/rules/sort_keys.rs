//! M201: dictionary literals with unsorted string keys.

use rustpython_parser::ast::{Expr, ExprKind, Suite};

use crate::ast::helpers::as_const_str;
use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::noqa::{extract_noqa_directive, Directive};
use crate::registry::{Check, CheckKind};

struct SortKeysVisitor<'a> {
    lines: &'a [&'a str],
    checks: Vec<Check>,
}

impl<'a> SortKeysVisitor<'a> {
    /// The check only applies to dicts whose keys are all string
    /// constants, each written on its own source line.
    fn check_dict(&mut self, keys: &'a [Expr]) {
        let mut entries: Vec<(&str, &Expr)> = vec![];
        for key in keys {
            match as_const_str(key) {
                Some(value) => entries.push((value, key)),
                None => return,
            }
        }
        for window in entries.windows(2) {
            if window[0].1.location.row() == window[1].1.location.row() {
                return;
            }
        }
        let lines = self.lines;
        let marked = |key: &Expr| {
            lines.get(key.location.row() - 1).map_or(false, |line| {
                !matches!(extract_noqa_directive(line), Directive::None)
            })
        };
        let unsuppressed: Vec<(&str, &Expr)> = entries
            .into_iter()
            .filter(|(_, key)| !marked(key))
            .collect();
        for window in unsuppressed.windows(2) {
            let (previous, _) = window[0];
            let (current, key) = window[1];
            if current < previous {
                self.checks.push(Check::new(
                    CheckKind::UnsortedDictKeys(current.to_string(), previous.to_string()),
                    key.location,
                ));
            }
        }
    }
}

impl<'a> Visitor<'a> for SortKeysVisitor<'a> {
    fn visit_expr(&mut self, expr: &'a Expr) {
        if let ExprKind::Dict { keys, .. } = &expr.node {
            self.check_dict(keys);
        }
        visitor::walk_expr(self, expr);
    }
}

pub fn dict_sort_keys(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = SortKeysVisitor {
        lines: checker.lines,
        checks: vec![],
    };
    visitor.visit_body(python_ast);
    checker.report_all(visitor.checks);
}

#[cfg(test)]
mod tests {
    use crate::checker::check_source;
    use crate::registry::{CheckCode, CheckKind};
    use crate::settings::Settings;

    fn run(contents: &str) -> Vec<CheckKind> {
        let lines: Vec<&str> = contents.lines().collect();
        let mut settings = Settings::for_code(CheckCode::M201);
        settings.repeat = true;
        check_source("test.py", &lines, &settings, &[])
            .checks
            .into_iter()
            .map(|check| check.kind)
            .collect()
    }

    #[test]
    fn reports_out_of_order_keys() {
        let contents = "d = {\n    'beta': 1,\n    'alpha': 2,\n}\n";
        assert_eq!(
            run(contents),
            vec![CheckKind::UnsortedDictKeys(
                "alpha".to_string(),
                "beta".to_string()
            )]
        );
    }

    #[test]
    fn sorted_keys_are_quiet() {
        assert!(run("d = {\n    'alpha': 1,\n    'beta': 2,\n}\n").is_empty());
    }

    #[test]
    fn single_line_dicts_are_exempt() {
        assert!(run("d = {'beta': 1, 'alpha': 2}\n").is_empty());
    }

    #[test]
    fn non_string_keys_disable_the_check() {
        assert!(run("d = {\n    'beta': 1,\n    2: 2,\n    'alpha': 3,\n}\n").is_empty());
    }

    #[test]
    fn noqa_marker_suppresses_a_key() {
        let contents = "d = {\n    'beta': 1,\n    'alpha': 2,  # noqa\n}\n";
        assert!(run(contents).is_empty());
    }
}
