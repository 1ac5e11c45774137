//! M811: one-element tuples.

use rustpython_parser::ast::{Expr, ExprContext, ExprKind, Suite};

use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

#[derive(Default)]
struct TupleVisitor {
    checks: Vec<Check>,
}

impl<'a> Visitor<'a> for TupleVisitor {
    fn visit_expr(&mut self, expr: &'a Expr) {
        // Store-context tuples are unpacking targets (`x, = f()`), not
        // literals.
        if let ExprKind::Tuple {
            elts,
            ctx: ExprContext::Load,
        } = &expr.node
        {
            if elts.len() == 1 {
                self.checks
                    .push(Check::new(CheckKind::OneElementTuple, expr.location));
            }
        }
        visitor::walk_expr(self, expr);
    }
}

pub fn one_element_tuples(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = TupleVisitor::default();
    visitor.visit_body(python_ast);
    checker.report_all(visitor.checks);
}

#[cfg(test)]
mod tests {
    use crate::checker::check_source;
    use crate::registry::CheckCode;
    use crate::settings::Settings;

    fn run(contents: &str) -> usize {
        let lines: Vec<&str> = contents.lines().collect();
        let mut settings = Settings::for_code(CheckCode::M811);
        settings.repeat = true;
        check_source("test.py", &lines, &settings, &[]).checks.len()
    }

    #[test]
    fn reports_one_element_tuples() {
        assert_eq!(run("x = (1,)\n"), 1);
        assert_eq!(run("f((1,))\n"), 1);
    }

    #[test]
    fn longer_tuples_are_fine() {
        assert_eq!(run("x = (1, 2)\n"), 0);
        assert_eq!(run("x = ()\n"), 0);
    }

    #[test]
    fn unpacking_targets_are_fine() {
        assert_eq!(run("x, = f()\n"), 0);
    }
}
