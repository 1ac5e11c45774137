//! M851-M854: return-statement hygiene.

use rustc_hash::FxHashMap;
use rustpython_parser::ast::{Expr, ExprKind, Stmt, StmtKind, Suite};

use crate::ast::helpers::is_const_none;
use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

/// Per-function tracking state.
#[derive(Default)]
struct Frame<'a> {
    /// Assignment lines per name; loop-nested assignments are excluded,
    /// since they may run zero or many times.
    assigns: FxHashMap<&'a str, Vec<usize>>,
    /// Reference lines per name.
    refs: FxHashMap<&'a str, Vec<usize>>,
    returns: Vec<(&'a Stmt, Option<&'a Expr>)>,
    loop_depth: usize,
}

struct ReturnVisitor<'a> {
    stack: Vec<Frame<'a>>,
    checks: Vec<Check>,
}

/// Walk the tail position of a body: return the statement at which
/// control can fall off the end, if any. `return`, `raise`, `while` and
/// `try` terminate a path; `if`/`for`-else/`with` are recursed into.
fn implicit_return_tail<'a>(stmt: &'a Stmt) -> Option<&'a Stmt> {
    match &stmt.node {
        StmtKind::Return { .. }
        | StmtKind::Raise { .. }
        | StmtKind::While { .. }
        | StmtKind::Try { .. } => None,
        StmtKind::If { body, orelse, .. } => {
            if orelse.is_empty() {
                Some(stmt)
            } else {
                body.last()
                    .and_then(implicit_return_tail)
                    .or_else(|| orelse.last().and_then(implicit_return_tail))
            }
        }
        StmtKind::For { orelse, .. } | StmtKind::AsyncFor { orelse, .. } => {
            if orelse.is_empty() {
                Some(stmt)
            } else {
                orelse.last().and_then(implicit_return_tail)
            }
        }
        StmtKind::With { body, .. } | StmtKind::AsyncWith { body, .. } => {
            body.last().and_then(implicit_return_tail)
        }
        _ => Some(stmt),
    }
}

impl<'a> ReturnVisitor<'a> {
    fn analyze(&mut self, frame: &Frame<'a>, body: &'a [Stmt]) {
        let has_value = frame
            .returns
            .iter()
            .any(|(_, value)| value.map_or(false, |value| !is_const_none(value)));

        if !has_value {
            // Every return is bare or `return None`: flag the explicit
            // `None`s as superfluous.
            for (stmt, value) in &frame.returns {
                if value.is_some() {
                    self.checks
                        .push(Check::new(CheckKind::UnnecessaryReturnNone, stmt.location));
                }
            }
            return;
        }

        for (stmt, value) in &frame.returns {
            if value.is_none() {
                self.checks
                    .push(Check::new(CheckKind::ImplicitReturnValue, stmt.location));
            }
        }

        if let Some(tail) = body.last().and_then(implicit_return_tail) {
            self.checks
                .push(Check::new(CheckKind::ImplicitReturn, tail.location));
        }

        for (stmt, value) in &frame.returns {
            let Some(value) = value else {
                continue;
            };
            let ExprKind::Name { id, .. } = &value.node else {
                continue;
            };
            let Some(assign_lines) = frame.assigns.get(id.as_str()) else {
                continue;
            };
            let return_line = stmt.location.row();
            let Some(&last_assign) = assign_lines
                .iter()
                .filter(|line| **line < return_line)
                .max()
            else {
                continue;
            };
            let referenced_between = frame.refs.get(id.as_str()).map_or(false, |lines| {
                lines
                    .iter()
                    .any(|&line| line > last_assign && line < return_line)
            });
            if !referenced_between {
                self.checks.push(Check::new(
                    CheckKind::UnnecessaryAssign(id.to_string()),
                    stmt.location,
                ));
            }
        }
    }

    fn record_assign_targets(&mut self, targets: &'a [Expr]) {
        if self.stack.is_empty() {
            return;
        }
        for target in targets {
            if let ExprKind::Name { id, .. } = &target.node {
                let Some(frame) = self.stack.last_mut() else {
                    return;
                };
                if frame.loop_depth == 0 {
                    frame
                        .assigns
                        .entry(id.as_str())
                        .or_default()
                        .push(target.location.row());
                } else {
                    // A loop-nested assignment disqualifies the name from
                    // the assign-then-return simplification.
                    frame
                        .refs
                        .entry(id.as_str())
                        .or_default()
                        .push(target.location.row());
                }
            } else {
                // Unpacking targets are tracked as references so they
                // block the simplification, too.
                visitor::walk_expr(self, target);
            }
        }
    }
}

impl<'a> Visitor<'a> for ReturnVisitor<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.node {
            StmtKind::FunctionDef {
                body,
                args,
                decorator_list,
                ..
            }
            | StmtKind::AsyncFunctionDef {
                body,
                args,
                decorator_list,
                ..
            } => {
                // Defaults and decorators belong to the enclosing scope.
                for expr in decorator_list {
                    self.visit_expr(expr);
                }
                visitor::walk_arguments(self, args);
                self.stack.push(Frame::default());
                self.visit_body(body);
                let frame = self.stack.pop().expect("function frame was pushed above");
                self.analyze(&frame, body);
            }
            StmtKind::Return { value } => {
                if let Some(frame) = self.stack.last_mut() {
                    frame.returns.push((stmt, value.as_deref()));
                }
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
            StmtKind::Assign { targets, value, .. } => {
                self.visit_expr(value);
                self.record_assign_targets(targets);
            }
            StmtKind::For { .. }
            | StmtKind::AsyncFor { .. }
            | StmtKind::While { .. } => {
                if let Some(frame) = self.stack.last_mut() {
                    frame.loop_depth += 1;
                }
                visitor::walk_stmt(self, stmt);
                if let Some(frame) = self.stack.last_mut() {
                    frame.loop_depth -= 1;
                }
            }
            _ => visitor::walk_stmt(self, stmt),
        }
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        if let ExprKind::Name { id, .. } = &expr.node {
            if let Some(frame) = self.stack.last_mut() {
                frame
                    .refs
                    .entry(id.as_str())
                    .or_default()
                    .push(expr.location.row());
            }
        }
        visitor::walk_expr(self, expr);
    }
}

pub fn return_statements(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = ReturnVisitor {
        stack: vec![],
        checks: vec![],
    };
    visitor.visit_body(python_ast);
    checker.report_all(visitor.checks);
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::checker::check_source;
    use crate::registry::CheckCode;
    use crate::settings::Settings;

    fn run(contents: &str, code: CheckCode) -> usize {
        let lines: Vec<&str> = contents.lines().collect();
        let mut settings = Settings::for_code(code);
        settings.repeat = true;
        check_source("test.py", &lines, &settings, &[]).checks.len()
    }

    #[test_case(
        "def f():\n    if not x:\n        return None\n    do()\n",
        CheckCode::M851,
        1;
        "superfluous none"
    )]
    #[test_case(
        "def f():\n    if not x:\n        return\n    do()\n",
        CheckCode::M851,
        0;
        "bare return stays"
    )]
    #[test_case(
        "def f():\n    if x:\n        return\n    return 1\n",
        CheckCode::M852,
        1;
        "bare return needs value"
    )]
    #[test_case(
        "def f():\n    if x:\n        return None\n    return 1\n",
        CheckCode::M852,
        0;
        "explicit none is a value"
    )]
    #[test_case(
        "def f():\n    if x:\n        return 1\n    do()\n",
        CheckCode::M853,
        1;
        "fallthrough after if"
    )]
    #[test_case(
        "def f():\n    if x:\n        return 1\n    return 2\n",
        CheckCode::M853,
        0;
        "all paths return"
    )]
    #[test_case(
        "def f():\n    if x:\n        return 1\n    raise ValueError(x)\n",
        CheckCode::M853,
        0;
        "raise terminates"
    )]
    #[test_case(
        "def f():\n    if x:\n        return 1\n    else:\n        return 2\n",
        CheckCode::M853,
        0;
        "both branches return"
    )]
    #[test_case(
        "def f():\n    if x:\n        return 1\n    while True:\n        spin()\n",
        CheckCode::M853,
        0;
        "while loop terminates"
    )]
    #[test_case(
        "def f():\n    result = compute()\n    return result\n",
        CheckCode::M854,
        1;
        "assign then return"
    )]
    #[test_case(
        "def f():\n    result = compute()\n    log(result)\n    return result\n",
        CheckCode::M854,
        0;
        "reference in between"
    )]
    #[test_case(
        "def f():\n    result = 0\n    for i in items:\n        result = result + i\n    return result\n",
        CheckCode::M854,
        0;
        "loop assignment"
    )]
    #[test_case(
        "def f():\n    return compute()\n",
        CheckCode::M854,
        0;
        "direct return"
    )]
    fn cases(contents: &str, code: CheckCode, expected: usize) {
        assert_eq!(run(contents, code), expected, "for: {contents}");
    }

    #[test]
    fn nested_functions_are_analyzed_separately() {
        let contents = "def outer():\n    def inner():\n        return 1\n    return inner()\n";
        assert_eq!(run(contents, CheckCode::M853), 0);
    }
}
