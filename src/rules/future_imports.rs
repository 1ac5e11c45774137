//! M701, M702: required `__future__` imports.

use std::collections::BTreeSet;

use rustpython_parser::ast::{Constant, ExprKind, Location, StmtKind, Suite};

use crate::checker::Checker;
use crate::python::future::ALL_FEATURE_NAMES;
use crate::registry::{Check, CheckKind};

fn join(names: &BTreeSet<&str>) -> String {
    names.iter().copied().collect::<Vec<_>>().join(", ")
}

/// Scan the leading statements of the module: docstrings and bare string
/// literals are allowed before the `__future__` imports, anything else is
/// "real code" and ends the scan.
pub fn future_imports(checker: &mut Checker, python_ast: &Suite) {
    // Configured names that aren't `__future__` features could never be
    // satisfied; drop them.
    let required: BTreeSet<&str> = checker
        .settings
        .required_future_imports
        .iter()
        .map(String::as_str)
        .filter(|name| ALL_FEATURE_NAMES.contains(name))
        .collect();
    if required.is_empty() {
        return;
    }

    let mut imports: BTreeSet<&str> = BTreeSet::new();
    let mut has_code = false;
    for stmt in python_ast {
        match &stmt.node {
            StmtKind::ImportFrom {
                module: Some(module),
                names,
                ..
            } if module == "__future__" => {
                imports.extend(names.iter().map(|alias| alias.node.name.as_str()));
            }
            StmtKind::Expr { value }
                if matches!(
                    &value.node,
                    ExprKind::Constant {
                        value: Constant::Str(..),
                        ..
                    }
                ) => {}
            _ => {
                has_code = true;
                break;
            }
        }
    }

    if imports.is_empty() {
        if has_code {
            checker.report(Check::new(
                CheckKind::NoFutureImports(join(&required)),
                Location::new(1, 0),
            ));
        }
    } else {
        let missing: BTreeSet<&str> = required.difference(&imports).copied().collect();
        if !missing.is_empty() {
            checker.report(Check::new(
                CheckKind::MissingFutureImports(join(&required), join(&imports)),
                Location::new(1, 0),
            ));
        }
    }
}
