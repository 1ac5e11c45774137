//! M801: `print` calls.

use rustpython_parser::ast::{Expr, ExprKind, Suite};

use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

#[derive(Default)]
struct PrintVisitor {
    checks: Vec<Check>,
}

impl<'a> Visitor<'a> for PrintVisitor {
    fn visit_expr(&mut self, expr: &'a Expr) {
        if let ExprKind::Call { func, .. } = &expr.node {
            if matches!(&func.node, ExprKind::Name { id, .. } if id == "print") {
                self.checks
                    .push(Check::new(CheckKind::PrintFound, expr.location));
            }
        }
        visitor::walk_expr(self, expr);
    }
}

pub fn print_calls(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = PrintVisitor::default();
    visitor.visit_body(python_ast);
    checker.report_all(visitor.checks);
}
