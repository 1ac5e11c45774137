//! M821, M822: mutable default arguments.

use rustc_hash::{FxHashMap, FxHashSet};
use rustpython_parser::ast::{Arguments, Expr, ExprKind, Stmt, StmtKind, Suite};

use crate::ast::helpers::{collect_call_paths, dealias_call_path, match_call_path};
use crate::ast::visitor::{self, Visitor};
use crate::checker::Checker;
use crate::registry::{Check, CheckKind};

const MUTABLE_FUNCS: &[(&str, &str)] = &[
    ("", "dict"),
    ("", "list"),
    ("", "set"),
    ("collections", "Counter"),
    ("collections", "OrderedDict"),
    ("collections", "defaultdict"),
    ("collections", "deque"),
];

const IMMUTABLE_FUNCS: &[(&str, &str)] = &[
    ("", "bool"),
    ("", "bytes"),
    ("", "complex"),
    ("", "float"),
    ("", "frozenset"),
    ("", "int"),
    ("", "object"),
    ("", "range"),
    ("", "str"),
    ("", "tuple"),
    ("datetime", "date"),
    ("datetime", "datetime"),
    ("datetime", "time"),
    ("datetime", "timedelta"),
];

struct DefaultsVisitor<'a> {
    from_imports: FxHashMap<&'a str, FxHashSet<&'a str>>,
    import_aliases: FxHashMap<&'a str, &'a str>,
    checks: Vec<Check>,
}

impl<'a> DefaultsVisitor<'a> {
    fn literal_type(expr: &Expr) -> Option<&'static str> {
        match &expr.node {
            ExprKind::List { .. } => Some("list"),
            ExprKind::Dict { .. } => Some("dict"),
            ExprKind::Set { .. } => Some("set"),
            ExprKind::ListComp { .. } => Some("list comprehension"),
            ExprKind::DictComp { .. } => Some("dict comprehension"),
            ExprKind::SetComp { .. } => Some("set comprehension"),
            _ => None,
        }
    }

    fn check_default(&mut self, default: &'a Expr) {
        if let Some(obj_type) = Self::literal_type(default) {
            self.checks.push(Check::new(
                CheckKind::MutableDefaultArgument(obj_type.to_string()),
                default.location,
            ));
            return;
        }
        if let ExprKind::Call { func, .. } = &default.node {
            let call_path = dealias_call_path(collect_call_paths(func), &self.import_aliases);
            if call_path.is_empty() {
                return;
            }
            if let Some((_, member)) = MUTABLE_FUNCS.iter().find(|(module, member)| {
                match_call_path(&call_path, module, member, &self.from_imports)
            }) {
                self.checks.push(Check::new(
                    CheckKind::MutableDefaultArgument((*member).to_string()),
                    default.location,
                ));
            } else if !IMMUTABLE_FUNCS.iter().any(|(module, member)| {
                match_call_path(&call_path, module, member, &self.from_imports)
            }) {
                self.checks.push(Check::new(
                    CheckKind::UnverifiedDefaultArgument(call_path.join(".")),
                    default.location,
                ));
            }
        }
    }

    fn check_defaults(&mut self, arguments: &'a Arguments) {
        for default in arguments.defaults.iter().chain(&arguments.kw_defaults) {
            self.check_default(default);
        }
    }
}

impl<'a> Visitor<'a> for DefaultsVisitor<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.node {
            StmtKind::Import { names } => {
                for alias in names {
                    if let Some(asname) = &alias.node.asname {
                        self.import_aliases
                            .insert(asname.as_str(), alias.node.name.as_str());
                    }
                }
            }
            StmtKind::ImportFrom {
                module: Some(module),
                names,
                ..
            } => {
                for alias in names {
                    self.from_imports
                        .entry(module.as_str())
                        .or_default()
                        .insert(alias.node.name.as_str());
                    if let Some(asname) = &alias.node.asname {
                        self.import_aliases
                            .insert(asname.as_str(), alias.node.name.as_str());
                    }
                }
            }
            StmtKind::FunctionDef { args, .. } | StmtKind::AsyncFunctionDef { args, .. } => {
                self.check_defaults(args);
            }
            _ => {}
        }
        visitor::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        if let ExprKind::Lambda { args, .. } = &expr.node {
            self.check_defaults(args);
        }
        visitor::walk_expr(self, expr);
    }
}

pub fn mutable_defaults(checker: &mut Checker, python_ast: &Suite) {
    let mut visitor = DefaultsVisitor {
        from_imports: FxHashMap::default(),
        import_aliases: FxHashMap::default(),
        checks: vec![],
    };
    visitor.visit_body(python_ast);
    checker.report_all(visitor.checks);
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::checker::check_source;
    use crate::registry::{CheckCode, CheckKind};
    use crate::settings::Settings;

    fn run(contents: &str) -> Vec<CheckKind> {
        let lines: Vec<&str> = contents.lines().collect();
        let mut settings = Settings::for_codes(&[CheckCode::M821, CheckCode::M822]);
        settings.repeat = true;
        check_source("test.py", &lines, &settings, &[])
            .checks
            .into_iter()
            .map(|check| check.kind)
            .collect()
    }

    #[test_case("def f(x=[]):\n    pass\n", "list"; "list literal")]
    #[test_case("def f(x={}):\n    pass\n", "dict"; "dict literal")]
    #[test_case("def f(x={1}):\n    pass\n", "set"; "set literal")]
    #[test_case("def f(x=list()):\n    pass\n", "list"; "list call")]
    #[test_case("def f(*, x=dict()):\n    pass\n", "dict"; "keyword only dict call")]
    fn reports_mutable_defaults(contents: &str, obj_type: &str) {
        assert_eq!(
            run(contents),
            vec![CheckKind::MutableDefaultArgument(obj_type.to_string())]
        );
    }

    #[test]
    fn reports_collections_types() {
        assert_eq!(
            run("import collections\ndef f(x=collections.defaultdict(list)):\n    pass\n"),
            vec![CheckKind::MutableDefaultArgument("defaultdict".to_string())]
        );
        assert_eq!(
            run("from collections import deque\ndef f(x=deque()):\n    pass\n"),
            vec![CheckKind::MutableDefaultArgument("deque".to_string())]
        );
    }

    #[test]
    fn immutable_defaults_are_fine() {
        assert!(run("def f(x=1, y=(), z='a'):\n    pass\n").is_empty());
        assert!(run("def f(x=tuple()):\n    pass\n").is_empty());
        assert!(run("def f(x=int('1')):\n    pass\n").is_empty());
    }

    #[test]
    fn unrecognized_calls_get_their_own_code() {
        assert_eq!(
            run("def f(x=make_config()):\n    pass\n"),
            vec![CheckKind::UnverifiedDefaultArgument("make_config".to_string())]
        );
    }

    #[test]
    fn lambda_defaults_are_checked() {
        assert_eq!(
            run("f = lambda x=[]: x\n"),
            vec![CheckKind::MutableDefaultArgument("list".to_string())]
        );
    }
}
