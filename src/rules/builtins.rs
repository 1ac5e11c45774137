//! M131, M132: shadowing of Python builtins.

use rustpython_parser::ast::{Arguments, Expr, ExprKind, Stmt, StmtKind, Suite};

use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::python::builtins::is_builtin;
use crate::registry::{Check, CheckKind};
use crate::settings::Settings;

fn collect_target_names<'a>(expr: &'a Expr, names: &mut Vec<(&'a str, &'a Expr)>) {
    match &expr.node {
        ExprKind::Name { id, .. } => names.push((id, expr)),
        ExprKind::Tuple { elts, .. } | ExprKind::List { elts, .. } => {
            for elt in elts {
                collect_target_names(elt, names);
            }
        }
        ExprKind::Starred { value, .. } => collect_target_names(value, names),
        _ => {}
    }
}

/// `name = other` assignments listed in the compatibility alias map
/// (e.g. `str = unicode`) are intentional rebindings and stay silent.
fn is_compat_alias(targets: &[Expr], value: &Expr, settings: &Settings) -> bool {
    if let [target] = targets {
        if let (ExprKind::Name { id: target_id, .. }, ExprKind::Name { id: value_id, .. }) =
            (&target.node, &value.node)
        {
            return settings
                .builtins_aliases
                .get(target_id.as_str())
                .map_or(false, |aliases| aliases.contains(value_id));
        }
    }
    false
}

struct BuiltinsVisitor<'a> {
    settings: &'a Settings,
    checks: Vec<Check>,
}

impl<'a> BuiltinsVisitor<'a> {
    fn shadows(&self, name: &str) -> bool {
        is_builtin(name)
            && !self
                .settings
                .builtins_exempt
                .iter()
                .any(|exempt| exempt == name)
    }

    fn check_target(&mut self, target: &'a Expr) {
        let mut names = vec![];
        collect_target_names(target, &mut names);
        for (name, expr) in names {
            if self.shadows(name) {
                self.checks.push(Check::new(
                    CheckKind::BuiltinShadowing(name.to_string()),
                    expr.location,
                ));
            }
        }
    }

    fn check_arguments(&mut self, arguments: &'a Arguments) {
        let all_args = arguments
            .posonlyargs
            .iter()
            .chain(&arguments.args)
            .chain(arguments.vararg.as_deref())
            .chain(&arguments.kwonlyargs)
            .chain(arguments.kwarg.as_deref());
        for arg in all_args {
            let name = arg.node.arg.as_str();
            if self.shadows(name) {
                self.checks.push(Check::new(
                    CheckKind::BuiltinArgumentShadowing(name.to_string()),
                    arg.location,
                ));
            }
        }
    }
}

impl<'a> Visitor<'a> for BuiltinsVisitor<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.node {
            StmtKind::Assign { targets, value, .. } => {
                if !is_compat_alias(targets, value, self.settings) {
                    for target in targets {
                        self.check_target(target);
                    }
                }
            }
            StmtKind::For { target, .. } | StmtKind::AsyncFor { target, .. } => {
                self.check_target(target);
            }
            _ => {}
        }
        visitor::walk_stmt(self, stmt);
    }

    fn visit_arguments(&mut self, arguments: &'a Arguments) {
        self.check_arguments(arguments);
        visitor::walk_arguments(self, arguments);
    }
}

pub fn builtin_shadowing(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = BuiltinsVisitor {
        settings: checker.settings,
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
        let mut settings = Settings::for_codes(&[CheckCode::M131, CheckCode::M132]);
        settings.repeat = true;
        check_source("test.py", &lines, &settings, &[])
            .checks
            .into_iter()
            .map(|check| check.kind)
            .collect()
    }

    #[test]
    fn reports_shadowing_assignments() {
        assert_eq!(
            run("list = [1, 2, 3]\n"),
            vec![CheckKind::BuiltinShadowing("list".to_string())]
        );
    }

    #[test]
    fn reports_tuple_unpacking_and_loop_targets() {
        assert_eq!(
            run("dict, x = a, b\n"),
            vec![CheckKind::BuiltinShadowing("dict".to_string())]
        );
        assert_eq!(
            run("for id in range(3):\n    pass\n"),
            vec![CheckKind::BuiltinShadowing("id".to_string())]
        );
    }

    #[test]
    fn reports_argument_shadowing() {
        assert_eq!(
            run("def f(type):\n    pass\n"),
            vec![CheckKind::BuiltinArgumentShadowing("type".to_string())]
        );
        assert_eq!(
            run("g = lambda filter: filter\n"),
            vec![CheckKind::BuiltinArgumentShadowing("filter".to_string())]
        );
    }

    #[test]
    fn compat_aliases_are_allowed() {
        assert!(run("str = unicode\n").is_empty());
        assert!(run("chr = unichr\n").is_empty());
        assert_eq!(
            run("str = bytes\n"),
            vec![CheckKind::BuiltinShadowing("str".to_string())]
        );
    }
}
