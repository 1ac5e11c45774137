//! M711: translation functions imported under the `_` alias.

use rustpython_parser::ast::{Stmt, StmtKind, Suite};

use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

#[derive(Default)]
struct GettextVisitor {
    checks: Vec<Check>,
}

impl<'a> Visitor<'a> for GettextVisitor {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        if let StmtKind::ImportFrom { names, .. } = &stmt.node {
            for alias in names {
                if alias.node.asname.as_deref() == Some("_") {
                    self.checks.push(Check::new(
                        CheckKind::GettextImportAlias(alias.node.name.to_string()),
                        stmt.location,
                    ));
                }
            }
        }
        visitor::walk_stmt(self, stmt);
    }
}

pub fn gettext_alias(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = GettextVisitor::default();
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
        let settings = Settings::for_code(CheckCode::M711);
        check_source("test.py", &lines, &settings, &[])
            .checks
            .into_iter()
            .map(|check| check.kind)
            .collect()
    }

    #[test]
    fn reports_underscore_alias() {
        assert_eq!(
            run("from gettext import gettext as _\n"),
            vec![CheckKind::GettextImportAlias("gettext".to_string())]
        );
    }

    #[test]
    fn other_aliases_are_fine() {
        assert!(run("from gettext import gettext as translate\n").is_empty());
        assert!(run("import gettext\n").is_empty());
    }
}
